//! End-to-end runs of the `postgres-ssl-check` binary without a server.

use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn test_unreachable_server_exits_1_without_seeding() {
    let mut cmd = cargo_bin_cmd!("postgres-ssl-check");
    cmd.env("POSTGRES_HOST", "127.0.0.1")
        .env("POSTGRES_PORT", "1")
        .env("POSTGRES_USER", "admin")
        .env("POSTGRES_PASSWORD", "s3cret-pass")
        .env("POSTGRES_DB", "maindb")
        .env_remove("POSTGRES_SSL_ROOT_CERT")
        .env("RUST_LOG", "off");

    let output = cmd.output().expect("Failed to run command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}");
    assert!(stdout.trim_end().ends_with("✗ Connection test failed"), "stdout:\n{stdout}");
    assert!(stdout.contains("✗ Database error:"), "stdout:\n{stdout}");
    assert!(!stdout.contains("Error creating sample data"), "stdout:\n{stdout}");
    assert!(!stdout.contains("Inserted"), "stdout:\n{stdout}");
    assert!(!stdout.contains("s3cret-pass"), "stdout:\n{stdout}");
}

#[test]
fn test_invalid_port_exits_1() {
    let mut cmd = cargo_bin_cmd!("postgres-ssl-check");
    cmd.env("POSTGRES_HOST", "127.0.0.1")
        .env("POSTGRES_PORT", "not-a-port")
        .env("RUST_LOG", "off");

    let output = cmd.output().expect("Failed to run command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}");
    assert!(stdout.contains("✗ Unexpected error: invalid configuration"), "stdout:\n{stdout}");
    assert!(!stdout.contains("Connected to PostgreSQL"), "stdout:\n{stdout}");
}

//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration from environment variables.

use std::env;

/// Extension trait for reading environment variables.
///
/// A variable that is set always wins over the default, even when it is set
/// to an empty string.
pub trait ConfigExt {
    /// Get an environment variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let host = String::env_or("POSTGRES_HOST", "localhost");
    /// ```
    fn env_or(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    /// Get an optional environment variable.
    ///
    /// Unset and empty variables both yield `None`.
    fn env_opt(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        env::remove_var("COMMON_TEST_UNSET_VAR");
        assert_eq!(String::env_or("COMMON_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_env_or_prefers_set_value_even_if_empty() {
        env::set_var("COMMON_TEST_EMPTY_VAR", "");
        assert_eq!(String::env_or("COMMON_TEST_EMPTY_VAR", "fallback"), "");
        env::remove_var("COMMON_TEST_EMPTY_VAR");
    }

    #[test]
    fn test_env_opt_ignores_empty() {
        env::set_var("COMMON_TEST_OPT_VAR", "");
        assert_eq!(String::env_opt("COMMON_TEST_OPT_VAR"), None);
        env::set_var("COMMON_TEST_OPT_VAR", "/etc/ssl/root.crt");
        assert_eq!(
            String::env_opt("COMMON_TEST_OPT_VAR").as_deref(),
            Some("/etc/ssl/root.crt")
        );
        env::remove_var("COMMON_TEST_OPT_VAR");
    }
}

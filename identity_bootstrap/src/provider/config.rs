//! Identity provider endpoint configuration

use std::{env, sync::LazyLock};

/// Base URL of the identity provider, e.g. "https://xyzcompany.example.co"
pub(super) static PROVIDER_BASE_URL: LazyLock<String> =
    LazyLock::new(|| env::var("PROVIDER_BASE_URL").expect("PROVIDER_BASE_URL must be set"));

/// Publishable API key sent alongside every provider request
pub(super) static PROVIDER_API_KEY: LazyLock<String> =
    LazyLock::new(|| env::var("PROVIDER_API_KEY").expect("PROVIDER_API_KEY must be set"));

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::env;

    // The LazyLock statics may already be initialized by another test, so
    // the env-var handling is exercised through the same expressions the
    // statics use.
    #[test]
    #[serial]
    fn test_provider_env_parsing() {
        unsafe {
            env::set_var("PROVIDER_BASE_URL", "http://localhost:9999");
            env::set_var("PROVIDER_API_KEY", "anon-key");
        }

        let base_url = env::var("PROVIDER_BASE_URL").expect("PROVIDER_BASE_URL must be set");
        let api_key = env::var("PROVIDER_API_KEY").expect("PROVIDER_API_KEY must be set");

        assert_eq!(base_url, "http://localhost:9999");
        assert_eq!(api_key, "anon-key");

        unsafe {
            env::remove_var("PROVIDER_BASE_URL");
            env::remove_var("PROVIDER_API_KEY");
        }
    }
}

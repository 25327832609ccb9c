//! Central configuration for the identity-bootstrap crate

use std::collections::HashSet;
use std::sync::LazyLock;

/// Base URL of the frontend application
///
/// Unauthenticated redirects land here (e.g. the sign-in view after a
/// failed email-confirmation callback).
/// Default: "http://localhost:8080"
pub static FRONTEND_BASE_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("FRONTEND_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
});

/// Parse the admin allow-list from the `ADMIN_EMAILS` environment variable.
///
/// Comma-separated, entries trimmed, empties dropped. The result is read
/// once at process start and handed to [`crate::SessionBootstrap::new`];
/// the allow-list is deliberately not a process-global.
pub fn admin_emails_from_env() -> HashSet<String> {
    std::env::var("ADMIN_EMAILS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_admin_emails_parsing() {
        unsafe {
            env::set_var("ADMIN_EMAILS", " ada@example.com ,, grace@example.com,");
        }

        let emails = admin_emails_from_env();

        assert_eq!(emails.len(), 2);
        assert!(emails.contains("ada@example.com"));
        assert!(emails.contains("grace@example.com"));

        unsafe {
            env::remove_var("ADMIN_EMAILS");
        }
    }

    #[test]
    #[serial]
    fn test_admin_emails_unset_is_empty() {
        unsafe {
            env::remove_var("ADMIN_EMAILS");
        }

        assert!(admin_emails_from_env().is_empty());
    }
}

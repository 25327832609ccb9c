use std::time::Duration;

use url::Url;

/// Delay before redirecting after a successful confirmation, long enough
/// for the success message to render
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Delay before redirecting to sign-in after an exhausted fallback chain
pub const ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// States of the callback reconciler; `Success` and `Error` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackState {
    Loading,
    Success,
    Error,
}

/// Where the client should navigate once the redirect delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Dashboard,
    SignIn,
}

/// Session payload handed back by a successful token exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangedSession {
    pub session_token: String,
    pub email: String,
}

/// Token material extracted from the provider's redirect URL
///
/// The provider puts tokens in the URL fragment; some flows carry the
/// confirmation type in the query string instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackRequest {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub fragment_type: Option<String>,
    pub query_type: Option<String>,
}

impl CallbackRequest {
    /// Extract tokens and type markers from a redirect URL
    pub fn parse(url: &Url) -> Self {
        let mut request = Self::default();

        if let Some(fragment) = url.fragment() {
            for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
                match key.as_ref() {
                    "access_token" => request.access_token = Some(value.into_owned()),
                    "refresh_token" => request.refresh_token = Some(value.into_owned()),
                    "type" => request.fragment_type = Some(value.into_owned()),
                    _ => {}
                }
            }
        }

        for (key, value) in url.query_pairs() {
            if key == "type" {
                request.query_type = Some(value.into_owned());
            }
        }

        request
    }

    /// Whether either the fragment or the query marks this redirect as a
    /// signup confirmation
    pub fn is_signup_confirmation(&self) -> bool {
        self.fragment_type.as_deref() == Some("signup")
            || self.query_type.as_deref() == Some("signup")
    }
}

/// Terminal result of a reconciliation run
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackOutcome {
    pub state: CallbackState,
    pub message: String,
    pub redirect: RedirectTarget,
    pub delay: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_tokens() {
        let url = Url::parse(
            "https://app.example.com/confirm#access_token=tok-a&refresh_token=tok-r&type=signup",
        )
        .expect("url should parse");

        let request = CallbackRequest::parse(&url);

        assert_eq!(request.access_token.as_deref(), Some("tok-a"));
        assert_eq!(request.refresh_token.as_deref(), Some("tok-r"));
        assert_eq!(request.fragment_type.as_deref(), Some("signup"));
        assert!(request.is_signup_confirmation());
    }

    #[test]
    fn test_parse_query_type_counts_as_signup() {
        let url = Url::parse("https://app.example.com/confirm?type=signup#access_token=tok-a")
            .expect("url should parse");

        let request = CallbackRequest::parse(&url);

        assert_eq!(request.fragment_type, None);
        assert_eq!(request.query_type.as_deref(), Some("signup"));
        assert!(request.is_signup_confirmation());
    }

    #[test]
    fn test_parse_empty_url() {
        let url = Url::parse("https://app.example.com/confirm").expect("url should parse");

        let request = CallbackRequest::parse(&url);

        assert_eq!(request, CallbackRequest::default());
        assert!(!request.is_signup_confirmation());
    }

    #[test]
    fn test_other_type_is_not_signup() {
        let url = Url::parse("https://app.example.com/confirm#access_token=tok-a&type=recovery")
            .expect("url should parse");

        let request = CallbackRequest::parse(&url);

        assert!(!request.is_signup_confirmation());
    }

    #[test]
    fn test_fragment_values_are_percent_decoded() {
        let url = Url::parse("https://app.example.com/confirm#access_token=a%2Bb&type=signup")
            .expect("url should parse");

        let request = CallbackRequest::parse(&url);

        assert_eq!(request.access_token.as_deref(), Some("a+b"));
    }
}

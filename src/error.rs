//! Error types for ip-api operations.

use std::time::Duration;

use thiserror::Error;

/// Error returned by ip-api client operations.
///
/// A response body with `"status": "fail"` is not an error; it decodes into a
/// normal [`Response`](crate::Response).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IpApiError {
    /// The request URL could not be built.
    #[error("invalid url: {message}")]
    InvalidUrl {
        /// Description of what is invalid.
        message: String,
    },

    /// The HTTP transport failed (connect, TLS, read, ...).
    ///
    /// The request URL is stripped from the wrapped error since its query
    /// string carries the API key.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    /// The configured per-request timeout elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller's cancellation token fired before the request completed.
    #[error("request cancelled")]
    Cancelled,

    /// The response body was not the expected JSON shape.
    #[error("decoding error: {0}")]
    Decoding(
        #[from]
        #[source]
        serde_json::Error,
    ),

    /// A field name that is not part of the ip-api field registry.
    #[error("unknown field: {name}")]
    UnknownField {
        /// The rejected name.
        name: String,
    },
}

impl IpApiError {
    /// Creates an InvalidUrl error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        IpApiError::InvalidUrl {
            message: message.into(),
        }
    }

    /// Creates an UnknownField error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        IpApiError::UnknownField { name: name.into() }
    }
}

impl From<reqwest::Error> for IpApiError {
    fn from(err: reqwest::Error) -> Self {
        IpApiError::Http(err.without_url())
    }
}

impl From<url::ParseError> for IpApiError {
    fn from(err: url::ParseError) -> Self {
        IpApiError::invalid_url(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", IpApiError::invalid_url("cannot be a base")),
            "invalid url: cannot be a base".to_owned(),
        );
        assert_eq!(
            format!("{}", IpApiError::Timeout(Duration::from_secs(5))),
            "request timed out after 5s".to_owned(),
        );
        assert_eq!(
            format!("{}", IpApiError::Cancelled),
            "request cancelled".to_owned(),
        );
        assert_eq!(
            format!("{}", IpApiError::unknown_field("nonAllowed")),
            "unknown field: nonAllowed".to_owned(),
        );

        let parse_err = url::Url::parse("not a url").unwrap_err();
        assert_eq!(
            format!("{}", IpApiError::from(parse_err)),
            "invalid url: relative URL without a base".to_owned(),
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IpApiError::from(json_err);
        assert!(matches!(err, IpApiError::Decoding(_)));
        assert!(err.to_string().starts_with("decoding error: "));
    }
}

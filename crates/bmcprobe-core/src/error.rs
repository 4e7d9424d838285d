use thiserror::Error;
use url::Url;

/// Errors raised while setting up a harness run.
///
/// Check failures are never errors; they are recorded as failed results.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("INVALID_BASE_URL: '{url}' is not a valid URL: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("UNSUPPORTED_SCHEME: '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },

    #[error("URL_CANNOT_BE_A_BASE: {url}")]
    CannotBeABase { url: Url },

    #[error("HTTP_CLIENT_BUILD_FAILED: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_code_prefix() {
        let err = ProbeError::UnsupportedScheme {
            scheme: "ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "UNSUPPORTED_SCHEME: 'ftp' (expected http or https)"
        );

        let url = Url::parse("mailto:cat@example.com").unwrap();
        let err = ProbeError::CannotBeABase { url };
        assert!(err.to_string().starts_with("URL_CANNOT_BE_A_BASE:"));
    }

    #[test]
    fn test_invalid_base_url_keeps_source() {
        use std::error::Error as _;

        let source = Url::parse("not a url").unwrap_err();
        let err = ProbeError::InvalidBaseUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().contains("'not a url'"));
        assert!(err.source().is_some());
    }
}

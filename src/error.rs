use thiserror::Error;

/// Error type produced by an HTTP transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by every [`Client`](crate::Client) call.
///
/// A call either yields a decoded JSON value or exactly one of these.
#[derive(Debug, Error)]
pub enum PosterousError {
    /// No site id was configured (or it is empty).
    #[error("missing site_id")]
    MissingSiteId,

    /// No API token was configured (or it is empty).
    #[error("missing api_token")]
    MissingToken,

    /// The server answered with a status other than 200.
    #[error("HTTP error code {code}: request to Posterous failed")]
    Http { code: u16 },

    /// The 200 response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    InvalidJsonResponse(#[source] serde_json::Error),

    /// Connection, DNS, TLS or timeout failure reported by the transport.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    #[error("invalid request URL ({url}): {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A configuration file existed but could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PosterousError {
    /// HTTP status code for [`PosterousError::Http`], `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            PosterousError::Http { code } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterousError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_embeds_code() {
        let err = PosterousError::Http { code: 404 };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn status_is_none_for_other_kinds() {
        assert_eq!(PosterousError::MissingSiteId.status(), None);
        assert_eq!(PosterousError::MissingToken.status(), None);
    }

    #[test]
    fn transport_keeps_source_message() {
        let err = PosterousError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport failure: connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}

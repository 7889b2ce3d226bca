//! Error type shared by every client operation.

use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;

/// Errors returned by [`Client`](crate::Client) and [`ClientBuilder`](crate::ClientBuilder).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied email address is malformed. Nothing was sent.
    #[error("invalid email address: {0:?}")]
    Validation(String),

    /// The request never got a 200 back.
    ///
    /// `status` is set when the server answered with anything other than 200,
    /// `source` when the request or the body read failed at the network level.
    #[error("could not send message to API")]
    Transport {
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The server answered 200 but the body is not a JSON object.
    #[error("failed to decode API response")]
    Decode(#[source] serde_json::Error),

    /// The server answered 200 with a `status` other than `ok`.
    #[error("API error: {message}")]
    Api { message: String },

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request payload")]
    Encode(#[source] serde_json::Error),

    /// The API key contains bytes that cannot be sent in a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] InvalidHeaderValue),

    /// The underlying HTTP client could not be configured.
    #[error("failed to build HTTP client")]
    Http(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn status(status: StatusCode) -> Self {
        Error::Transport {
            status: Some(status),
            source: None,
        }
    }

    pub(crate) fn network(source: reqwest::Error) -> Self {
        Error::Transport {
            status: source.status(),
            source: Some(source),
        }
    }

    /// The API's failure message, if this is an [`Error::Api`].
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn transport_message_is_generic() {
        let err = Error::status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "could not send message to API");
        assert!(err.source().is_none());
    }

    #[test]
    fn api_message_is_exposed() {
        let err = Error::Api {
            message: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "API error: bad key");
        assert_eq!(err.api_message(), Some("bad key"));
        assert_eq!(Error::Validation("x".into()).api_message(), None);
    }

    #[test]
    fn decode_keeps_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Decode(cause);
        assert!(err.source().is_some());
    }
}

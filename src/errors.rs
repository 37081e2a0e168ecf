/// Why a bridge reply failed the `[{"success": {...}}]` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The reply was an empty array.
    #[error("no data in response")]
    NoData,

    /// The first entry has no `success` object (the bridge may have sent an
    /// `error` entry instead).
    #[error("success key not found or not a map")]
    MissingSuccess,
}

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to complete the request (connection refused,
    /// DNS failure, timeout, truncated body).
    #[error("network {action} error: {err}")]
    Network {
        action: String,
        err: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to serialize a request body to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// The response body is not JSON or does not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(serde_json::Error),

    /// The bridge did not grant a username.
    #[error("pairing failed: {0}")]
    Pairing(Rejection),

    /// A command reply did not acknowledge success.
    #[error("unexpected bridge response: {0}")]
    Protocol(Rejection),

    /// A request URL could not be built from the bridge address.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The light id cannot be used as a path segment.
    #[error("invalid light id {0:?}")]
    InvalidLightId(String),
}

impl Error {
    /// Create a new network error
    pub fn network<E>(action: &str, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Network {
            action: action.to_string(),
            err: err.into(),
        }
    }

    /// Create a new invalid URL error
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Error::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The rejection carried by a pairing or protocol error.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Error::Pairing(r) | Error::Protocol(r) => Some(*r),
            _ => None,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Error::Pairing(Rejection::NoData).to_string(),
            "pairing failed: no data in response"
        );
        assert_eq!(
            Error::Protocol(Rejection::MissingSuccess).to_string(),
            "unexpected bridge response: success key not found or not a map"
        );
    }

    #[test]
    fn test_network_error() {
        let err = Error::network("send", "connection refused");
        assert_eq!(err.to_string(), "network send error: connection refused");
        assert!(err.rejection().is_none());
    }

    #[test]
    fn test_invalid_url_error() {
        let err = Error::invalid_url("http://[bad/api", "invalid IPv6 address");
        assert_eq!(err.to_string(), "invalid url http://[bad/api: invalid IPv6 address");
    }
}

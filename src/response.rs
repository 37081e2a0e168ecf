//! Decoding of bridge reply arrays.
//!
//! Write operations answer with a JSON array whose entries are either
//! `{"success": {...}}` or `{"error": {"type": .., "address": .., "description": ..}}`.
//! Only the first entry is inspected.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Rejection};

type Result<T> = std::result::Result<T, Error>;

/// An error entry reported by the bridge itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: u32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of a reply array, tried as success first, then error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ReplyEntry<T> {
    Success { success: T },
    Error { error: ApiError },
    Other(Value),
}

/// Success payload of a pairing request.
#[derive(Debug, Deserialize)]
pub(crate) struct PairingSuccess {
    #[serde(default)]
    pub username: Option<String>,
}

/// Decodes `body` as a reply array and returns the first entry's success
/// payload. Contract violations are wrapped with `reject`, which picks
/// between [`Error::Pairing`] and [`Error::Protocol`].
pub(crate) fn first_success<T>(body: &[u8], reject: fn(Rejection) -> Error) -> Result<T>
where
    T: DeserializeOwned,
{
    let entries: Vec<ReplyEntry<T>> = serde_json::from_slice(body).map_err(Error::Decode)?;

    match entries.into_iter().next() {
        None => Err(reject(Rejection::NoData)),
        Some(ReplyEntry::Success { success }) => Ok(success),
        Some(ReplyEntry::Error { error }) => {
            warn!(
                "bridge returned error {} for {}: {}",
                error.kind, error.address, error.description
            );
            Err(reject(Rejection::MissingSuccess))
        }
        Some(ReplyEntry::Other(entry)) => {
            debug!("unexpected reply entry: {}", entry);
            Err(reject(Rejection::MissingSuccess))
        }
    }
}

//! Bridge discovery through the vendor's cloud endpoint.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

use crate::bridge::Bridge;
use crate::errors::Error;
use crate::transport::{Method, Request, Transport};

type Result<T> = std::result::Result<T, Error>;

/// A bridge record returned by the discovery endpoint.
///
/// Only the address is required. Optional fields with an unexpected type are
/// treated as absent.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredBridge {
    /// Bridge address on the local network
    #[serde(rename = "internalipaddress")]
    pub address: String,
    /// Bridge identifier, if reported
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub id: Option<String>,
    /// HTTPS port, if reported
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub port: Option<u16>,
}

impl DiscoveredBridge {
    /// Convert this record into an unpaired [`Bridge`] using `transport`.
    pub fn into_bridge(self, transport: Arc<dyn Transport>) -> Bridge {
        Bridge::new(&self.address, transport)
    }
}

/// Ask the discovery endpoint at `discovery_url` for the bridges on the
/// caller's network.
///
/// An empty list is a valid answer. Records keep the order the endpoint
/// returned them in.
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use hue_bridge_rs::{Config, HttpTransport, discover_bridges};
///
/// let transport = Arc::new(HttpTransport::new()?);
/// for bridge in discover_bridges(transport.as_ref(), Config::DISCOVERY_URL)? {
///     println!("{} ({:?})", bridge.address, bridge.id);
/// }
/// ```
pub fn discover_bridges(
    transport: &dyn Transport,
    discovery_url: &str,
) -> Result<Vec<DiscoveredBridge>> {
    debug!("discovering bridges via {}", discovery_url);
    let response = transport.execute(&Request::new(Method::Get, discovery_url))?;
    let bridges: Vec<DiscoveredBridge> =
        serde_json::from_slice(&response.body).map_err(Error::Decode)?;
    debug!("discovery returned {} bridge(s)", bridges.len());
    Ok(bridges)
}

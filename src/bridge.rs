//! Bridge discovery, pairing and light control.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use reqwest::Url;
use serde_json::{Map, Value, json};

use crate::config::Config;
use crate::discovery::discover_bridges;
use crate::errors::Error;
use crate::light::{Light, LightRecord};
use crate::response::{PairingSuccess, first_success};
use crate::transport::{HttpTransport, Method, Request, Transport};
use crate::user::User;

type Result<T> = std::result::Result<T, Error>;

/// Base API URL for a bridge at `address`.
///
/// Without a user this is the unauthenticated `http://{address}/api` used for
/// pairing; with one, the username is appended.
///
/// ```
/// use hue_bridge_rs::{User, resolve};
///
/// assert_eq!(resolve("237.84.2.178", None), "http://237.84.2.178/api");
/// assert_eq!(
///     resolve("237.84.2.178", Some(&User::new("ABC123"))),
///     "http://237.84.2.178/api/ABC123"
/// );
/// ```
pub fn resolve(address: &str, user: Option<&User>) -> String {
    match user {
        None => format!("http://{}/api", address),
        Some(user) => format!("http://{}/api/{}", address, user.username()),
    }
}

/// A Hue bridge on the local network.
///
/// Every operation is a single blocking round trip through the bridge's
/// [`Transport`]. The URL is derived from the current user on each call, so
/// pairing or [`set_user`](Bridge::set_user) takes effect immediately.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use hue_bridge_rs::{Bridge, Request, Response, Result, User};
///
/// let transport = Arc::new(|_: &Request| -> Result<Response> { Ok(Response::ok("{}")) });
/// let bridge = Bridge::new("192.168.1.2", transport);
/// assert_eq!(bridge.url(), "http://192.168.1.2/api");
///
/// bridge.set_user(User::new("ABC123"));
/// assert_eq!(bridge.url(), "http://192.168.1.2/api/ABC123");
/// assert!(bridge.lights().unwrap().is_empty());
/// ```
pub struct Bridge {
    address: String,
    device_type: String,
    user: RwLock<Option<User>>,
    transport: Arc<dyn Transport>,
}

impl Bridge {
    /// Create an unpaired bridge at `address` (bare host or IP).
    pub fn new(address: &str, transport: Arc<dyn Transport>) -> Self {
        Bridge {
            address: String::from(address),
            device_type: Config::DEVICE_TYPE.to_string(),
            user: RwLock::new(None),
            transport,
        }
    }

    /// Set the application identifier sent by [`pair`](Bridge::pair).
    pub fn with_device_type(mut self, device_type: &str) -> Self {
        self.device_type = device_type.to_string();
        self
    }

    /// Discover bridges with the default configuration over HTTP.
    pub fn discover() -> Result<Vec<Bridge>> {
        let config = Config::default();
        let transport = Arc::new(HttpTransport::with_timeout(config.timeout)?);
        Self::discover_with(&config, transport)
    }

    /// Discover bridges at `config.discovery_url` through `transport`.
    ///
    /// The returned bridges are unpaired, share `transport` and pair using
    /// `config.device_type`.
    pub fn discover_with(config: &Config, transport: Arc<dyn Transport>) -> Result<Vec<Bridge>> {
        let records = discover_bridges(transport.as_ref(), &config.discovery_url)?;
        Ok(records
            .into_iter()
            .map(|record| {
                record
                    .into_bridge(Arc::clone(&transport))
                    .with_device_type(&config.device_type)
            })
            .collect())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Attach a previously obtained user.
    pub fn set_user(&self, user: User) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Drop the user; later calls use the unauthenticated URL.
    pub fn clear_user(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current base URL, see [`resolve`].
    pub fn url(&self) -> String {
        let user = self.user.read().unwrap_or_else(PoisonError::into_inner);
        resolve(&self.address, user.as_ref())
    }

    /// Request a username from the bridge.
    ///
    /// The bridge only grants one shortly after its link button was pressed;
    /// otherwise it answers with an error entry, reported as
    /// [`Rejection::MissingSuccess`](crate::Rejection::MissingSuccess). No
    /// retry is attempted. On success the user is attached to this bridge
    /// and returned.
    ///
    /// A success entry without a username yields a user with an empty token.
    pub fn pair(&self) -> Result<User> {
        let request = Request::new(Method::Post, &self.url())
            .json(&json!({"devicetype": self.device_type}))?;
        let response = self.send(&request)?;
        let success: PairingSuccess = first_success(&response.body, Error::Pairing)?;

        let username = success.username.unwrap_or_else(|| {
            warn!("bridge {} granted pairing without a username", self.address);
            String::new()
        });
        let user = User::new(&username);
        self.set_user(user.clone());
        info!("paired with bridge {}", self.address);
        Ok(user)
    }

    /// List all lights known to the bridge.
    ///
    /// The order of the returned lights is unspecified.
    pub fn lights(&self) -> Result<Vec<Light<'_>>> {
        let request = Request::new(Method::Get, &self.endpoint(&["lights"])?);
        let response = self.send(&request)?;
        let records: HashMap<String, LightRecord> =
            serde_json::from_slice(&response.body).map_err(Error::Decode)?;

        Ok(records
            .into_iter()
            .map(|(id, record)| Light::new(id, record.state, self))
            .collect())
    }

    /// Fetch a single light by id.
    pub fn light(&self, id: &str) -> Result<Light<'_>> {
        let request = Request::new(Method::Get, &self.light_endpoint(id, &[])?);
        let response = self.send(&request)?;
        let record: LightRecord = serde_json::from_slice(&response.body).map_err(Error::Decode)?;
        Ok(Light::new(id.to_string(), record.state, self))
    }

    pub fn set_light_on(&self, id: &str) -> Result<()> {
        self.set_light_state(id, true)
    }

    /// Switch light `id` on or off.
    pub fn set_light_state(&self, id: &str, on: bool) -> Result<()> {
        let url = self.light_endpoint(id, &["state"])?;
        let request = Request::new(Method::Put, &url).json(&json!({"on": on}))?;
        let response = self.send(&request)?;
        first_success::<Map<String, Value>>(&response.body, Error::Protocol)?;
        Ok(())
    }

    /// Current base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let base = self.url();
        let mut url = Url::parse(&base).map_err(|e| Error::invalid_url(&base, e))?;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_url(&base, "not a hierarchical url"))?
            .extend(segments);
        Ok(url.into())
    }

    fn light_endpoint(&self, id: &str, rest: &[&str]) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(Error::InvalidLightId(id.to_string()));
        }
        let mut segments = vec!["lights", id];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    fn send(&self, request: &Request) -> Result<crate::transport::Response> {
        debug!("{} {}", request.method, request.url);
        self.transport.execute(request)
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("address", &self.address)
            .field("device_type", &self.device_type)
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

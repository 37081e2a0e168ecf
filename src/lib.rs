//! # hue_bridge_rs
//!
//! A blocking Rust client for Philips Hue bridges.
//!
//! The library covers the three steps needed to control lights through a
//! bridge's local HTTP API: finding the bridge, pairing with it to obtain a
//! username, and sending commands to its lights.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_bridge_rs::Bridge;
//!
//! fn control_lights() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridges = Bridge::discover()?;
//!     let bridge = bridges.first().ok_or("no bridge found")?;
//!
//!     // Press the link button on the bridge first.
//!     let user = bridge.pair()?;
//!     println!("keep this username: {}", user);
//!
//!     for light in bridge.lights()? {
//!         light.turn_on()?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Transport
//!
//! All requests go through a [`Transport`]. [`HttpTransport`] issues real
//! HTTP calls with a per-request timeout (5 seconds by default); any
//! `Fn(&Request) -> Result<Response>` closure can stand in for it, which is
//! how the protocol is tested without a network.
//!
//! ## Errors
//!
//! Failures are reported as [`Error`]: transport failures as
//! [`Error::Network`], malformed bodies as [`Error::Decode`], and replies
//! that do not acknowledge success as [`Error::Pairing`] or
//! [`Error::Protocol`] carrying a [`Rejection`]. Nothing is retried.

mod bridge;
mod config;
mod discovery;
mod errors;
mod light;
mod response;
mod transport;
mod user;

// Re-export public API
pub use bridge::{Bridge, resolve};
pub use config::Config;
pub use discovery::{DiscoveredBridge, discover_bridges};
pub use errors::{Error, Rejection};
pub use light::{Light, LightState};
pub use response::ApiError;
pub use transport::{HttpTransport, Method, Request, Response, Transport};
pub use user::User;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Light snapshots returned by a bridge.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bridge::Bridge;
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// State attributes of a light as reported by the bridge.
///
/// Missing attributes decode as zero, the same as a light that does not
/// support them. Values are kept as reported, even outside the documented
/// ranges.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    /// Brightness (1-254)
    #[serde(rename = "bri")]
    pub brightness: i32,
    /// Hue (0-65535)
    pub hue: i32,
    /// Saturation (0-254)
    #[serde(rename = "sat")]
    pub saturation: i32,
}

/// Entry of the `/lights` map. Fields other than `state` are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LightRecord {
    #[serde(default)]
    pub state: LightState,
}

/// A read snapshot of one light, tied to the bridge that listed it.
///
/// Changing the snapshot does not change the device; use
/// [`turn_on`](Light::turn_on) and [`turn_off`](Light::turn_off), which
/// route through the owning bridge with its current credential. Do not keep
/// snapshots around across a credential change.
#[derive(Debug, Clone)]
pub struct Light<'a> {
    id: String,
    state: LightState,
    bridge: &'a Bridge,
}

impl<'a> Light<'a> {
    pub(crate) fn new(id: String, state: LightState, bridge: &'a Bridge) -> Self {
        Light { id, state, bridge }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.on
    }

    pub fn bridge(&self) -> &'a Bridge {
        self.bridge
    }

    pub fn turn_on(&self) -> Result<()> {
        self.bridge.set_light_on(&self.id)
    }

    pub fn turn_off(&self) -> Result<()> {
        self.bridge.set_light_state(&self.id, false)
    }
}

impl fmt::Display for Light<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

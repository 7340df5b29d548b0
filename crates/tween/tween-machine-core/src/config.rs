//! Per-call engine configuration.
//!
//! Settings the host used to keep in ambient option variables are passed in
//! explicitly here.

use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::tangent::TangentPair;

/// Whether written keys are regular keys or breakdowns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    #[default]
    Key,
    Breakdown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// Fallback tangents used when a neighbour has a fixed tangent. `None` reads
    /// the host's global defaults once per call.
    #[serde(default)]
    pub default_tangents: Option<TangentPair>,
    /// Mark written keys with the distinctive timeline tick.
    #[serde(default)]
    pub special_tick: bool,
    #[serde(default)]
    pub key_mode: KeyMode,
}

impl TweenConfig {
    pub fn from_json(s: &str) -> Result<Self, TweenError> {
        serde_json::from_str(s).map_err(|e| TweenError::Parse(format!("config: {e}")))
    }
}

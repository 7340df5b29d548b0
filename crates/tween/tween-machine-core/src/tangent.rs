//! Tangent types as tagged by the host animation system.
//!
//! The set is opaque to the engine except for two distinguished members:
//! `Fixed` (user-locked handles, forces a fallback to the global defaults)
//! and `Step` (propagates forward onto the new key's out-tangent).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TangentType {
    Linear,
    Flat,
    Step,
    StepNext,
    Spline,
    Clamped,
    Fixed,
    Plateau,
    Auto,
}

impl TangentType {
    pub const ALL: [TangentType; 9] = [
        TangentType::Linear,
        TangentType::Flat,
        TangentType::Step,
        TangentType::StepNext,
        TangentType::Spline,
        TangentType::Clamped,
        TangentType::Fixed,
        TangentType::Plateau,
        TangentType::Auto,
    ];

    #[inline]
    pub fn is_fixed(self) -> bool {
        self == TangentType::Fixed
    }

    #[inline]
    pub fn is_step(self) -> bool {
        self == TangentType::Step
    }

    /// Host tag string (e.g. `"stepnext"`).
    pub fn as_str(self) -> &'static str {
        match self {
            TangentType::Linear => "linear",
            TangentType::Flat => "flat",
            TangentType::Step => "step",
            TangentType::StepNext => "stepnext",
            TangentType::Spline => "spline",
            TangentType::Clamped => "clamped",
            TangentType::Fixed => "fixed",
            TangentType::Plateau => "plateau",
            TangentType::Auto => "auto",
        }
    }
}

impl fmt::Display for TangentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TangentType {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TangentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TweenError::UnknownTangent { tag: s.to_string() })
    }
}

/// In/out tangent types read from (or written to) a single key.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TangentPair {
    #[serde(rename = "in")]
    pub in_tangent: TangentType,
    #[serde(rename = "out")]
    pub out_tangent: TangentType,
}

impl TangentPair {
    pub fn new(in_tangent: TangentType, out_tangent: TangentType) -> Self {
        Self {
            in_tangent,
            out_tangent,
        }
    }

    #[inline]
    pub fn has_fixed(&self) -> bool {
        self.in_tangent.is_fixed() || self.out_tangent.is_fixed()
    }
}

impl Default for TangentPair {
    /// Host factory defaults (auto in, auto out).
    fn default() -> Self {
        Self::new(TangentType::Auto, TangentType::Auto)
    }
}

//! Output contracts from the tween engine.

use serde::{Deserialize, Serialize};

use crate::tangent::TangentType;

/// Which rule decided the new key's tangents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TangentRule {
    /// in = previous key's out, out = next key's in.
    Neighbours,
    /// A neighbour tangent was fixed; both sides use the global defaults.
    FixedFallback,
    /// The next key steps out, so the new key steps out too.
    StepForward,
}

/// Key computed for one curve before it is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedKey {
    pub time: f64,
    pub value: f64,
    pub in_tangent: TangentType,
    pub out_tangent: TangentType,
    pub rule: TangentRule,
}

impl PlannedKey {
    /// A step in-tangent is left to the host's default and never written.
    #[inline]
    pub fn writes_in_tangent(&self) -> bool {
        !self.in_tangent.is_step()
    }
}

/// One written key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyChange<C> {
    pub curve: C,
    pub key: PlannedKey,
}

/// Result of one tween call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TweenReport<C> {
    #[serde(default)]
    pub written: Vec<KeyChange<C>>,
    /// Curves without a key on both sides of the requested time.
    #[serde(default)]
    pub skipped: Vec<C>,
}

impl<C> Default for TweenReport<C> {
    fn default() -> Self {
        Self {
            written: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<C> TweenReport<C> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.skipped.is_empty()
    }

    pub fn key_for(&self, curve: &C) -> Option<&PlannedKey>
    where
        C: PartialEq,
    {
        self.written
            .iter()
            .find(|c| &c.curve == curve)
            .map(|c| &c.key)
    }
}

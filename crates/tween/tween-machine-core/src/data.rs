//! Keyframe/curve data model used by the in-memory host and fixtures.
//!
//! A real host owns its curves; the engine only ever sees them through
//! [`crate::host::CurveAccess`]. These types back [`crate::memory::MemoryHost`]
//! and the JSON curve-set loader.

use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::tangent::{TangentPair, TangentType};

/// A single key on an animation curve.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    #[serde(rename = "in")]
    pub in_tangent: TangentType,
    #[serde(rename = "out")]
    pub out_tangent: TangentType,
    /// Breakdown keys are regular keys flagged for the host's dope sheet.
    #[serde(default)]
    pub breakdown: bool,
}

impl Keyframe {
    pub fn new(time: f64, value: f64, in_tangent: TangentType, out_tangent: TangentType) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            breakdown: false,
        }
    }

    #[inline]
    pub fn tangents(&self) -> TangentPair {
        TangentPair::new(self.in_tangent, self.out_tangent)
    }
}

/// A time-ordered sequence of keys on one animatable attribute.
///
/// Deserialization goes through [`AnimationCurve::with_keys`], so a curve read
/// from JSON is sorted and validated like one built in code.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCurve")]
pub struct AnimationCurve {
    /// Attribute path, e.g. "pCube1.translateX".
    pub name: String,
    keys: Vec<Keyframe>,
}

#[derive(Deserialize)]
struct RawCurve {
    name: String,
    #[serde(default)]
    keys: Vec<Keyframe>,
}

impl TryFrom<RawCurve> for AnimationCurve {
    type Error = TweenError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        AnimationCurve::with_keys(raw.name, raw.keys)
    }
}

impl AnimationCurve {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Build a curve from unordered keys. Keys are sorted by time; duplicate or
    /// non-finite times are rejected.
    pub fn with_keys(name: impl Into<String>, mut keys: Vec<Keyframe>) -> Result<Self, TweenError> {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        let curve = Self {
            name: name.into(),
            keys,
        };
        curve.validate_basic()?;
        Ok(curve)
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exact-time lookup.
    pub fn key_at(&self, time: f64) -> Option<&Keyframe> {
        let idx = self.keys.partition_point(|k| k.time < time);
        self.keys.get(idx).filter(|k| k.time == time)
    }

    fn key_at_mut(&mut self, time: f64) -> Option<&mut Keyframe> {
        let idx = self.keys.partition_point(|k| k.time < time);
        self.keys.get_mut(idx).filter(|k| k.time == time)
    }

    /// Latest key strictly before `time` and earliest key strictly after it.
    /// A key sitting exactly on `time` bounds neither side.
    pub fn bounding_keys(&self, time: f64) -> Option<(&Keyframe, &Keyframe)> {
        let before = self.keys.partition_point(|k| k.time < time);
        let after = self.keys.partition_point(|k| k.time <= time);
        let prev = before.checked_sub(1).and_then(|i| self.keys.get(i))?;
        let next = self.keys.get(after)?;
        Some((prev, next))
    }

    /// Insert a key, replacing any existing key at the same time.
    pub fn upsert_key(&mut self, key: Keyframe) {
        let idx = self.keys.partition_point(|k| k.time < key.time);
        match self.keys.get_mut(idx) {
            Some(existing) if existing.time == key.time => *existing = key,
            _ => self.keys.insert(idx, key),
        }
    }

    /// Set the in-tangent of the key at `time`. Returns false if no such key exists.
    pub fn set_in_tangent(&mut self, time: f64, tangent: TangentType) -> bool {
        match self.key_at_mut(time) {
            Some(k) => {
                k.in_tangent = tangent;
                true
            }
            None => false,
        }
    }

    /// Flag the key at `time` as a breakdown. Returns false if no such key exists.
    pub fn set_breakdown(&mut self, time: f64, breakdown: bool) -> bool {
        match self.key_at_mut(time) {
            Some(k) => {
                k.breakdown = breakdown;
                true
            }
            None => false,
        }
    }

    /// Validate basic invariants (finite times/values, strictly increasing times).
    pub fn validate_basic(&self) -> Result<(), TweenError> {
        let mut last = f64::NEG_INFINITY;
        for k in &self.keys {
            if !k.time.is_finite() || !k.value.is_finite() {
                return Err(TweenError::InvalidCurve {
                    curve: self.name.clone(),
                    reason: format!("key at time {} is not finite", k.time),
                });
            }
            if k.time <= last {
                return Err(TweenError::InvalidCurve {
                    curve: self.name.clone(),
                    reason: format!("key times must be strictly increasing (at {})", k.time),
                });
            }
            last = k.time;
        }
        Ok(())
    }
}

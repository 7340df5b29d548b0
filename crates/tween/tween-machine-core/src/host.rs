//! Capability traits the engine needs from the host animation system.
//!
//! Adapters implement these over the real host API (or [`crate::memory::MemoryHost`]
//! in tests) and pass themselves into [`crate::engine::TweenEngine::tween`].

use std::fmt::Debug;

use crate::error::HostError;
use crate::tangent::{TangentPair, TangentType};

/// Narrow, typed view over the host's animation curves.
pub trait CurveAccess {
    /// Opaque curve handle (an attribute path, a node pointer, an index...).
    type Curve: Clone + Debug;

    /// Times of the latest key strictly before `time` and the earliest key strictly
    /// after it. `None` means the curve is not bounded at `time`.
    fn find_bounding_keys(&self, curve: &Self::Curve, time: f64) -> Option<(f64, f64)>;

    fn read_tangents(&self, curve: &Self::Curve, time: f64) -> Result<TangentPair, HostError>;

    fn read_value(&self, curve: &Self::Curve, time: f64) -> Result<f64, HostError>;

    /// Write (or overwrite) a key carrying `out_tangent`. The in-tangent is left
    /// to the host's default for the new key.
    fn write_keyframe(
        &mut self,
        curve: &Self::Curve,
        time: f64,
        value: f64,
        out_tangent: TangentType,
    ) -> Result<(), HostError>;

    fn write_in_tangent(
        &mut self,
        curve: &Self::Curve,
        time: f64,
        in_tangent: TangentType,
    ) -> Result<(), HostError>;

    /// The host's global default in/out tangent types.
    fn global_default_tangents(&self) -> Result<TangentPair, HostError>;

    /// Flag the key at `time` as a breakdown. Hosts without breakdown keys ignore it.
    fn mark_breakdown(&mut self, _curve: &Self::Curve, _time: f64) -> Result<(), HostError> {
        Ok(())
    }

    /// Draw the distinctive timeline tick for keys written at `time`.
    fn mark_special_tick(&mut self, _curves: &[Self::Curve], _time: f64) -> Result<(), HostError> {
        Ok(())
    }
}

/// Playback position and the "busy" indicator shown while a batch runs.
pub trait Timeline {
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, time: f64);

    fn begin_busy(&mut self);

    fn end_busy(&mut self);
}

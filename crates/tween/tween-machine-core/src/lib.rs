//! Tween Machine core (host-agnostic)
//!
//! Inserts a linearly interpolated key between the neighbouring keys of each
//! requested animation curve and derives the new key's tangent types from
//! those neighbours. The host animation system is reached only through the
//! [`CurveAccess`] and [`Timeline`] traits; [`MemoryHost`] is an in-memory
//! implementation of both.

pub mod bias;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod guard;
pub mod host;
pub mod ids;
pub mod memory;
pub mod outputs;
pub mod plan;
pub mod request;
pub mod stored_curves;
pub mod tangent;

// Re-exports for consumers (adapters)
pub use bias::{Bias, SLIDER_PRESETS};
pub use config::{KeyMode, TweenConfig};
pub use data::{AnimationCurve, Keyframe};
pub use engine::TweenEngine;
pub use error::{HostError, TweenError};
pub use guard::TimelineGuard;
pub use host::{CurveAccess, Timeline};
pub use ids::CurveId;
pub use memory::{Fault, MemoryHost, SpecialTick};
pub use outputs::{KeyChange, PlannedKey, TangentRule, TweenReport};
pub use plan::{plan_key, Neighbour};
pub use request::TweenRequest;
pub use stored_curves::parse_curve_set_json;
pub use tangent::{TangentPair, TangentType};

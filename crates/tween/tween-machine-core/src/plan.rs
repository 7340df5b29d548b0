//! Pure key planning: value interpolation and tangent resolution.
//!
//! Given the bounding keys around `time`:
//! - value = prev.value + (next.value - prev.value) * f
//! - tangents default to (in = prev.out, out = next.in)
//! - any fixed tangent among the four neighbour tangents switches both sides
//!   to the global defaults; this wins over everything else
//! - otherwise a stepped next key (next.out == step) makes the new key step out

use serde::{Deserialize, Serialize};

use crate::bias::Bias;
use crate::outputs::{PlannedKey, TangentRule};
use crate::tangent::TangentPair;

/// What the engine reads from the host about one bounding key.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighbour {
    pub time: f64,
    pub value: f64,
    pub tangents: TangentPair,
}

pub fn plan_key(
    prev: &Neighbour,
    next: &Neighbour,
    time: f64,
    bias: Bias,
    defaults: TangentPair,
) -> PlannedKey {
    let value = bias.lerp(prev.value, next.value);

    let (in_tangent, out_tangent, rule) = if prev.tangents.has_fixed() || next.tangents.has_fixed()
    {
        (
            defaults.in_tangent,
            defaults.out_tangent,
            TangentRule::FixedFallback,
        )
    } else if next.tangents.out_tangent.is_step() {
        (
            prev.tangents.out_tangent,
            next.tangents.out_tangent,
            TangentRule::StepForward,
        )
    } else {
        (
            prev.tangents.out_tangent,
            next.tangents.in_tangent,
            TangentRule::Neighbours,
        )
    };

    PlannedKey {
        time,
        value,
        in_tangent,
        out_tangent,
        rule,
    }
}

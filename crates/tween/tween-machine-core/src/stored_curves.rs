use serde::Deserialize;

use crate::data::{AnimationCurve, Keyframe};
use crate::error::TweenError;
use crate::tangent::TangentType;

/// Public API: parse a JSON curve set (see fixtures/curves/*.json) into
/// validated [`AnimationCurve`]s.
///
/// Notes:
/// - Keys may appear in any order; they are sorted by time.
/// - Tangent tags are the host's lowercase names; missing tangents default to `auto`.
/// - Duplicate or non-finite key times are rejected.
pub fn parse_curve_set_json(s: &str) -> Result<Vec<AnimationCurve>, TweenError> {
    let set: StoredCurveSet =
        serde_json::from_str(s).map_err(|e| TweenError::Parse(format!("curve set: {e}")))?;

    let mut curves = Vec::with_capacity(set.curves.len());
    for sc in set.curves {
        let mut keys = Vec::with_capacity(sc.keys.len());
        for k in sc.keys {
            keys.push(Keyframe {
                time: k.time,
                value: k.value,
                in_tangent: parse_tangent(k.r#in.as_deref())?,
                out_tangent: parse_tangent(k.out.as_deref())?,
                breakdown: k.breakdown,
            });
        }
        curves.push(AnimationCurve::with_keys(sc.name, keys)?);
    }
    Ok(curves)
}

fn parse_tangent(tag: Option<&str>) -> Result<TangentType, TweenError> {
    match tag {
        Some(t) => t.parse(),
        None => Ok(TangentType::Auto),
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredCurveSet {
    #[serde(default)]
    #[allow(dead_code)]
    pub name: Option<String>,
    pub curves: Vec<StoredCurve>,
}

#[derive(Debug, Deserialize)]
struct StoredCurve {
    pub name: String,
    pub keys: Vec<StoredKey>,
}

#[derive(Debug, Deserialize)]
struct StoredKey {
    pub time: f64,
    pub value: f64,
    #[serde(default)]
    #[serde(rename = "in")]
    pub r#in: Option<String>,
    #[serde(default)]
    pub out: Option<String>,
    #[serde(default)]
    pub breakdown: bool,
}

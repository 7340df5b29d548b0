//! Input contract for one tween invocation.
//!
//! Built per UI interaction (slider drag, preset button) and passed into
//! `TweenEngine::tween`. Not persisted.

use serde::{Deserialize, Serialize};

use crate::bias::Bias;
use crate::error::TweenError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TweenRequest<C> {
    pub curves: Vec<C>,
    /// Time at which the new keys are written. Must be finite.
    pub current_time: f64,
    /// Serialized as the interpolation fraction in [0,1] (0 = previous key,
    /// 1 = next key), not the signed [-1,1] form taken by [`TweenRequest::new`].
    pub bias: Bias,
}

impl<C> TweenRequest<C> {
    /// Request with a signed bias in [-1,1]; out-of-range bias or a non-finite
    /// time is rejected here, before any curve is touched.
    pub fn new(curves: Vec<C>, current_time: f64, bias: f64) -> Result<Self, TweenError> {
        check_time(current_time)?;
        Ok(Self::with_bias(curves, current_time, Bias::new(bias)?))
    }

    /// Request from a slider position in [-100,100].
    pub fn from_slider(curves: Vec<C>, current_time: f64, slider: i32) -> Result<Self, TweenError> {
        check_time(current_time)?;
        Ok(Self::with_bias(curves, current_time, Bias::from_slider(slider)?))
    }

    pub fn with_bias(curves: Vec<C>, current_time: f64, bias: Bias) -> Self {
        Self {
            curves,
            current_time,
            bias,
        }
    }
}

pub(crate) fn check_time(time: f64) -> Result<(), TweenError> {
    if time.is_finite() {
        Ok(())
    } else {
        Err(TweenError::InvalidTime { time })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_times_are_rejected() {
        for time in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = TweenRequest::<u32>::new(vec![1], time, 0.0).unwrap_err();
            assert!(matches!(err, TweenError::InvalidTime { .. }), "got {err:?}");
            assert!(TweenRequest::<u32>::from_slider(vec![1], time, 0).is_err());
        }
    }

    #[test]
    fn bias_serializes_as_a_fraction() {
        let req = TweenRequest::new(vec![7u32], 5.0, -0.5).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["bias"], serde_json::json!(0.25));

        let back: TweenRequest<u32> =
            serde_json::from_str(r#"{"curves":[7],"current_time":5.0,"bias":0.25}"#).unwrap();
        assert_eq!(back.bias.signed(), -0.5);
        assert!(
            serde_json::from_str::<TweenRequest<u32>>(r#"{"curves":[],"current_time":5.0,"bias":-0.5}"#)
                .is_err()
        );
    }
}

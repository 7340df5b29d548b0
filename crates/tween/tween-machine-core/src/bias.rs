//! Bias normalization.
//!
//! Every caller-facing convention collapses to one interpolation fraction
//! `f` in [0,1]: f=0 reproduces the previous key, f=1 the next key.
//! - bias in [-1,1]: f = (bias + 1) / 2
//! - slider in [-100,100]: f = (slider + 100) / 200
//! - fraction in [0,1]: used as-is

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// Values of the slider's preset buttons.
pub const SLIDER_PRESETS: [i32; 9] = [-100, -75, -50, -25, 0, 25, 50, 75, 100];

pub const SLIDER_MIN: i32 = -100;
pub const SLIDER_MAX: i32 = 100;

/// Validated interpolation fraction in [0,1].
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bias(f64);

fn check_range(value: f64, min: f64, max: f64) -> Result<f64, TweenError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(TweenError::InvalidBias { value, min, max })
    }
}

impl Bias {
    /// Previous key's value.
    pub const PREVIOUS: Bias = Bias(0.0);
    /// Halfway between the neighbours.
    pub const HALF: Bias = Bias(0.5);
    /// Next key's value.
    pub const NEXT: Bias = Bias(1.0);

    /// Signed bias in [-1,1].
    pub fn new(bias: f64) -> Result<Self, TweenError> {
        let b = check_range(bias, -1.0, 1.0)?;
        Ok(Bias((b + 1.0) / 2.0))
    }

    /// Direct fraction in [0,1].
    pub fn from_fraction(fraction: f64) -> Result<Self, TweenError> {
        check_range(fraction, 0.0, 1.0).map(Bias)
    }

    /// Slider position in [-100,100].
    pub fn from_slider(value: i32) -> Result<Self, TweenError> {
        let v = check_range(value as f64, SLIDER_MIN as f64, SLIDER_MAX as f64)?;
        Ok(Bias((v + 100.0) / 200.0))
    }

    #[inline]
    pub fn fraction(self) -> f64 {
        self.0
    }

    /// Signed form in [-1,1].
    #[inline]
    pub fn signed(self) -> f64 {
        self.0 * 2.0 - 1.0
    }

    /// `a + (b - a) * f`
    #[inline]
    pub fn lerp(self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.0
    }
}

impl Default for Bias {
    fn default() -> Self {
        Bias::HALF
    }
}

impl TryFrom<f64> for Bias {
    type Error = TweenError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        Bias::from_fraction(fraction)
    }
}

impl From<Bias> for f64 {
    fn from(b: Bias) -> f64 {
        b.0
    }
}

use keyframe::EasingFunction;
use serde::{Deserialize, Serialize};

/// Supported easing curves for per-cell and global progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// `-t * (t - 2)`: decelerates into completion with no overshoot.
    #[default]
    EaseOutQuad,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
            EasingType::EaseOutQuad => -x * (x - 2.0),
        }
    }
}

impl EasingType {
    /// Evaluates the curve with the input clamped: anything below 0 (or NaN)
    /// maps to 0, anything at or above 1 maps to 1.
    pub fn eval(&self, t: f64) -> f64 {
        if t.is_nan() || t < 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            self.y(t).clamp(0.0, 1.0)
        }
    }
}

/// The quadratic ease-out used to drive cell motion.
pub fn ease(t: f64) -> f64 {
    EasingType::EaseOutQuad.eval(t)
}

/// Fraction of a cell's content that is visible at `ratio` of its own progress.
///
/// Content only appears during the back half of an opening and is gone by the
/// middle of a closing.
pub fn visible_fraction(ratio: f64, open: bool) -> f64 {
    let progress = if open { ratio } else { 1.0 - ratio };
    (2.0 * (progress * progress - 0.5)).clamp(0.0, 1.0)
}

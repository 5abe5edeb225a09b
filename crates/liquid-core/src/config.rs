//! # Configuration
//!
//! Plain value settings for the engine and the choreographer, loadable from
//! JSON. Missing fields take their defaults.
//!
//! ```json
//! {
//!   "radius_threshold": 80.0,
//!   "viscosity": 0.65,
//!   "direction": "right",
//!   "stagger_delay": 0.05
//! }
//! ```

use crate::animation::EasingType;
use crate::errors::LiquidError;
use kurbo::Vec2;
use metaball_core::{Color, EngineParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Axis along which cells fan out from the base circle (y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Up,
    Right,
    Left,
    Down,
}

impl Direction {
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidConfig {
    pub radius_threshold: f64,
    pub angle_threshold: f64,
    pub viscosity: f64,
    pub color: Color,
    /// Seconds each cell takes to open.
    pub open_duration: f64,
    /// Seconds each cell takes to close.
    pub close_duration: f64,
    /// Delay between consecutive cells when opening.
    pub stagger_delay: f64,
    pub direction: Direction,
    pub easing: EasingType,
    /// Cosmetic; honoured by the rendering surface.
    pub enable_shadow: bool,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        let engine = EngineParameters::default();
        Self {
            radius_threshold: engine.radius_threshold,
            angle_threshold: engine.angle_threshold,
            viscosity: engine.viscosity,
            color: Color::default(),
            open_duration: 0.2,
            close_duration: 0.2,
            stagger_delay: 0.1,
            direction: Direction::Up,
            easing: EasingType::EaseOutQuad,
            enable_shadow: true,
        }
    }
}

impl LiquidConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LiquidError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LiquidError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn engine_parameters(&self) -> EngineParameters {
        EngineParameters::new(self.radius_threshold, self.angle_threshold, self.viscosity)
    }

    /// Returns a copy with the engine parameters and stagger delay pulled into
    /// range. Durations are kept as given: a non-positive duration makes every
    /// tick a no-op instead of being rewritten.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        let engine = self.engine_parameters();

        if engine.radius_threshold != self.radius_threshold {
            warn!(
                from = self.radius_threshold,
                to = engine.radius_threshold,
                "radius_threshold out of range, clamped"
            );
        }
        if engine.angle_threshold != self.angle_threshold {
            warn!(
                from = self.angle_threshold,
                to = engine.angle_threshold,
                "angle_threshold out of range, clamped"
            );
        }
        if engine.viscosity != self.viscosity {
            warn!(
                from = self.viscosity,
                to = engine.viscosity,
                "viscosity out of range, clamped"
            );
        }
        out.radius_threshold = engine.radius_threshold;
        out.angle_threshold = engine.angle_threshold;
        out.viscosity = engine.viscosity;

        if !(self.stagger_delay >= 0.0) || !self.stagger_delay.is_finite() {
            warn!(from = self.stagger_delay, "stagger_delay out of range, using 0");
            out.stagger_delay = 0.0;
        }
        for (name, value) in [
            ("open_duration", self.open_duration),
            ("close_duration", self.close_duration),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                warn!(field = name, value, "non-positive duration, ticks will be no-ops");
            }
        }
        out
    }
}

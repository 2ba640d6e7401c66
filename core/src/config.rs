//! Tunable parameters shared by every session.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{zoom_bounds_are_valid, Anchor, TokenId, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

const DEFAULT_STEP_INTERVAL_MS: f32 = 1000.0 / 60.0;
const DEFAULT_MAX_VISIBILITY_RADIUS: f32 = 64.0;

/// Per-session configuration.
///
/// Every field has a default so partial configuration files deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Radius of the circular field of view, measured in cells.
    pub visibility_radius: f32,
    /// Upper bound applied to any requested visibility radius.
    pub max_visibility_radius: f32,
    /// Movement points available per turn.
    pub movement_points: u32,
    /// Distance a token travels per animation step, measured in cells.
    pub token_speed: f32,
    /// Anchors tokens at cell centres when `true`, at cell corners otherwise.
    pub center_tokens: bool,
    /// Lower zoom bound of the viewport.
    pub min_zoom: f32,
    /// Upper zoom bound of the viewport.
    pub max_zoom: f32,
    /// Side of the square that bounds moves while the grid is invalid.
    pub fallback_bound: i32,
    /// Identifier of the token whose position drives the fog of war.
    pub vision_source: String,
    /// Length of a fixed animation step in milliseconds.
    pub step_interval_ms: f32,
    /// Maximum number of animation steps performed for a single tick.
    pub max_steps_per_tick: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            visibility_radius: 10.0,
            max_visibility_radius: DEFAULT_MAX_VISIBILITY_RADIUS,
            movement_points: 5,
            token_speed: 0.1,
            center_tokens: true,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fallback_bound: 100,
            vision_source: crate::DEFAULT_VISION_SOURCE.to_owned(),
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            max_steps_per_tick: 8,
        }
    }
}

impl SessionConfig {
    /// Checks that every parameter lies within its usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_visibility_radius.is_finite() && self.max_visibility_radius >= 0.0) {
            return Err(ConfigError::InvalidMaxRadius {
                radius: self.max_visibility_radius,
            });
        }
        if !(self.visibility_radius.is_finite() && self.visibility_radius >= 0.0) {
            return Err(ConfigError::InvalidRadius {
                radius: self.visibility_radius,
            });
        }
        if !(self.token_speed.is_finite() && self.token_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed {
                speed: self.token_speed,
            });
        }
        if !zoom_bounds_are_valid(self.min_zoom, self.max_zoom) {
            return Err(ConfigError::InvalidZoomBounds {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.fallback_bound <= 0 {
            return Err(ConfigError::InvalidFallbackBound {
                bound: self.fallback_bound,
            });
        }
        if !(self.step_interval_ms.is_finite() && self.step_interval_ms > 0.0) {
            return Err(ConfigError::InvalidStepInterval {
                millis: self.step_interval_ms,
            });
        }
        if self.max_steps_per_tick == 0 {
            return Err(ConfigError::ZeroStepsPerTick);
        }
        if self.vision_source.trim().is_empty() {
            return Err(ConfigError::MissingVisionSource);
        }
        Ok(())
    }

    /// Anchor derived from [`SessionConfig::center_tokens`].
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        Anchor::from_center_flag(self.center_tokens)
    }

    /// Identifier of the vision-source token.
    #[must_use]
    pub fn vision_source_id(&self) -> TokenId {
        TokenId::new(self.vision_source.clone())
    }

    /// Length of a fixed animation step.
    ///
    /// Intervals too large to represent fall back to the default of 1/60 s.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.step_interval_ms.max(f32::EPSILON) / 1000.0)
            .unwrap_or_else(|_| Duration::from_secs_f32(DEFAULT_STEP_INTERVAL_MS / 1000.0))
    }

    /// Radius clamped into `[0, max_visibility_radius]`.
    ///
    /// A maximum that is not a finite number is replaced by the default of
    /// 64 cells.
    #[must_use]
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        let max = if self.max_visibility_radius.is_finite() {
            self.max_visibility_radius.max(0.0)
        } else {
            DEFAULT_MAX_VISIBILITY_RADIUS
        };
        if !radius.is_finite() {
            return max;
        }
        radius.clamp(0.0, max)
    }
}

/// Reasons a [`SessionConfig`] may be rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The visibility radius is negative or not finite.
    #[error("visibility radius must be a non-negative number (received {radius})")]
    InvalidRadius {
        /// Radius that failed validation.
        radius: f32,
    },
    /// The maximum visibility radius is negative or not finite.
    #[error("maximum visibility radius must be a non-negative number (received {radius})")]
    InvalidMaxRadius {
        /// Radius that failed validation.
        radius: f32,
    },
    /// The token speed is not strictly positive.
    #[error("token speed must be positive (received {speed})")]
    InvalidSpeed {
        /// Speed that failed validation.
        speed: f32,
    },
    /// The zoom bounds are non-positive or inverted.
    #[error("zoom bounds must satisfy 0 < min <= max (received {min}..{max})")]
    InvalidZoomBounds {
        /// Lower bound that was provided.
        min: f32,
        /// Upper bound that was provided.
        max: f32,
    },
    /// The fallback bound is not strictly positive.
    #[error("fallback bound must be positive (received {bound})")]
    InvalidFallbackBound {
        /// Bound that failed validation.
        bound: i32,
    },
    /// The animation step interval is not strictly positive.
    #[error("step interval must be positive (received {millis} ms)")]
    InvalidStepInterval {
        /// Interval that failed validation.
        millis: f32,
    },
    /// Ticks would never advance animation.
    #[error("max_steps_per_tick must be at least 1")]
    ZeroStepsPerTick,
    /// No vision-source token identifier was provided.
    #[error("vision_source must name a token")]
    MissingVisionSource,
}

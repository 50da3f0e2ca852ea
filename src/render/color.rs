//! Speed to color mapping.
//!
//! Two linear stages through a fixed yellow midpoint: `min_color` at
//! `min_speed`, yellow halfway, `max_color` at `max_speed`. Speeds outside
//! the range clamp to the end colors.

use crate::errors::ConfigError;
use crate::types::{Rgb, finite};

use super::defaults;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedColorRamp {
    min_speed: f64,
    max_speed: f64,
    min_color: Rgb,
    max_color: Rgb,
}

impl Default for SpeedColorRamp {
    fn default() -> Self {
        Self {
            min_speed: defaults::MIN_SPEED,
            max_speed: defaults::MAX_SPEED,
            min_color: Rgb::RED,
            max_color: Rgb::GREEN,
        }
    }
}

impl SpeedColorRamp {
    pub const MIDPOINT: Rgb = Rgb::YELLOW;

    /// Ramp over `[min_speed, max_speed]`; the range must be finite and
    /// non-empty.
    pub fn try_new(
        min_speed: f64,
        max_speed: f64,
        min_color: Rgb,
        max_color: Rgb,
    ) -> Result<Self, ConfigError> {
        let min_speed = finite(min_speed).map_err(ConfigError::invalid("min speed"))?;
        let max_speed = finite(max_speed).map_err(ConfigError::invalid("max speed"))?;
        if max_speed <= min_speed {
            return Err(ConfigError::EmptySpeedRange {
                min: min_speed,
                max: max_speed,
            });
        }
        Ok(Self {
            min_speed,
            max_speed,
            min_color,
            max_color,
        })
    }

    /// Default colors over `[0, max_speed]`.
    pub fn with_max_speed(max_speed: f64) -> Result<Self, ConfigError> {
        Self::try_new(defaults::MIN_SPEED, max_speed, Rgb::RED, Rgb::GREEN)
    }

    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Color for `speed`. NaN is treated as the minimum.
    pub fn color(&self, speed: f64) -> Rgb {
        let u = (speed - self.min_speed) / (self.max_speed - self.min_speed);
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        if u < 0.5 {
            self.min_color.lerp(Self::MIDPOINT, u * 2.0)
        } else {
            Self::MIDPOINT.lerp(self.max_color, u * 2.0 - 1.0)
        }
    }
}

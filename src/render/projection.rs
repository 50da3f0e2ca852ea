//! Field to drawing-surface projection.
//!
//! The field is y-up in physical units, the surface y-down in pixels. The
//! two axes scale independently, so a surface with a different aspect ratio
//! than the field stretches the drawing.

use crate::errors::ConfigError;
use crate::types::{Footprint, Vector2, positive};

use super::defaults;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    surface_width: f64,
    surface_height: f64,
    field_width: f64,
    field_height: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            surface_width: defaults::SURFACE_WIDTH,
            surface_height: defaults::SURFACE_HEIGHT,
            field_width: defaults::FIELD_WIDTH,
            field_height: defaults::FIELD_HEIGHT,
        }
    }
}

impl Projection {
    pub fn try_new(
        surface_width: f64,
        surface_height: f64,
        field_width: f64,
        field_height: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            surface_width: positive(surface_width).map_err(ConfigError::invalid("surface width"))?,
            surface_height: positive(surface_height)
                .map_err(ConfigError::invalid("surface height"))?,
            field_width: positive(field_width).map_err(ConfigError::invalid("field width"))?,
            field_height: positive(field_height).map_err(ConfigError::invalid("field height"))?,
        })
    }

    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    fn sx(&self) -> f64 {
        self.surface_width / self.field_width
    }

    fn sy(&self) -> f64 {
        self.surface_height / self.field_height
    }

    /// Surface position of the field point `p`.
    pub fn to_surface(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x * self.sx(), self.surface_height - p.y * self.sy())
    }

    /// Field position of the surface point `p`.
    pub fn to_field(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x / self.sx(), (self.surface_height - p.y) / self.sy())
    }

    /// Horizontal scale applied to a field length (radii, arc extents).
    pub fn scale_length(&self, r: f64) -> f64 {
        r * self.sx()
    }

    /// Footprint in surface pixels: length along x, width along y.
    pub fn scale_footprint(&self, footprint: Footprint) -> Footprint {
        Footprint {
            length: footprint.length * self.sx(),
            width: footprint.width * self.sy(),
        }
    }
}

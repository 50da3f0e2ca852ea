//! Value types shared by the path engine.
//!
//! Coordinates are plain `f64` in the same physical unit as the waypoints
//! (inches for the default field). Angles follow the y-negated convention
//! `atan2(-y, x)` used by the drawing surface.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Error type for invalid numeric configuration values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a strictly positive, finite value.
pub(crate) fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate a finite value.
pub(crate) fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// A 2D point or displacement.
///
/// NaN and infinity propagate through every operation the way `f64` does;
/// nothing here fails.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Displacement from `a` to `b`.
    #[inline]
    pub fn diff(a: Vector2, b: Vector2) -> Vector2 {
        b - a
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    #[inline]
    pub fn translate(self, t: Vector2) -> Vector2 {
        self + t
    }

    #[inline]
    pub fn scale(self, s: f64) -> Vector2 {
        self * s
    }

    #[inline]
    pub fn invert(self) -> Vector2 {
        -self
    }

    /// Rotate by +90°: `(-y, x)`.
    #[inline]
    pub fn perp(self) -> Vector2 {
        self.as_dvec2().perp().into()
    }

    #[inline]
    pub fn dot(a: Vector2, b: Vector2) -> f64 {
        a.as_dvec2().dot(b.as_dvec2())
    }

    /// 2D cross product `a.x * b.y - a.y * b.x`.
    #[inline]
    pub fn cross(a: Vector2, b: Vector2) -> f64 {
        a.as_dvec2().perp_dot(b.as_dvec2())
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.as_dvec2().length()
    }

    /// Heading in the surface convention, `atan2(-y, x)`.
    #[inline]
    pub fn angle(self) -> f64 {
        (-self.y).atan2(self.x)
    }

    /// Unsigned angle between two vectors in `[0, π]`.
    ///
    /// NaN when either vector has zero length; callers guard. The cosine is
    /// clamped to `[-1, 1]` so rounding on (anti)parallel inputs stays finite.
    pub fn angle_between(a: Vector2, b: Vector2) -> f64 {
        (Vector2::dot(a, b) / (a.norm() * b.norm())).clamp(-1.0, 1.0).acos()
    }

    /// Unit vector pointing along the surface heading `angle`.
    #[inline]
    pub fn from_angle(angle: f64) -> Vector2 {
        Vector2::new(angle.cos(), -angle.sin())
    }

    pub fn distance(self, other: Vector2) -> f64 {
        (other - self).norm()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Vector2 { x: v.x, y: v.y }
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        v.as_dvec2()
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);

    /// Per-channel linear interpolation, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, factor: f64) -> Rgb {
        let channel = |a: u8, b: u8| {
            let v = a as f64 + factor * (b as f64 - a as f64);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

/// Error parsing a hex color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#rrggbb` or `rrggbb`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb(byte(0)?, byte(2)?, byte(4)?))
    }
}

/// Size of the rigid body swept along the path.
///
/// `length` runs along the heading, `width` across it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub length: f64,
    pub width: f64,
}

impl Footprint {
    pub fn try_new(length: f64, width: f64) -> Result<Self, NumericError> {
        Ok(Footprint {
            length: positive(length)?,
            width: positive(width)?,
        })
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Footprint {
            length: crate::render::defaults::ROBOT_LENGTH,
            width: crate::render::defaults::ROBOT_WIDTH,
        }
    }
}

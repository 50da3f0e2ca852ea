//! Waypoints: the input unit of the path engine.

use serde::{Deserialize, Serialize};

use crate::errors::WaypointError;
use crate::types::Vector2;

/// A control point with position, blend radius, target speed and annotation.
///
/// Serialized as `{"position":{"x":..,"y":..},"speed":..,"radius":..,"comment":..}`;
/// every field is required on import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector2,
    pub speed: f64,
    /// Distance consumed from each adjacent leg to fit the corner fillet.
    #[serde(rename = "radius")]
    pub blend_radius: f64,
    pub comment: String,
}

impl Waypoint {
    pub fn new(position: Vector2, speed: f64, blend_radius: f64) -> Self {
        Self {
            position,
            speed,
            blend_radius,
            comment: String::new(),
        }
    }

    /// Shorthand for `Waypoint::new(Vector2::new(x, y), speed, blend_radius)`.
    pub fn at(x: f64, y: f64, blend_radius: f64, speed: f64) -> Self {
        Self::new(Vector2::new(x, y), speed, blend_radius)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Whether this waypoint asks for a fillet.
    pub fn is_blended(&self) -> bool {
        self.blend_radius > 0.0
    }
}

/// One row of the waypoint editor, still as typed text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaypointRow {
    pub x: String,
    pub y: String,
    pub radius: String,
    pub speed: String,
    pub comment: String,
}

impl WaypointRow {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        radius: impl Into<String>,
        speed: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            radius: radius.into(),
            speed: speed.into(),
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Convert the row into a waypoint.
    ///
    /// Fields parse as integers from their leading digits (`"12.7"` is 12,
    /// `"0x1A"` is 26).
    /// If radius or speed does not parse, both become 0.
    pub fn to_waypoint(&self, index: usize) -> Result<Waypoint, WaypointError> {
        let coord = |field: &'static str, raw: &str| {
            parse_int_prefix(raw).ok_or_else(|| WaypointError::InvalidCoordinate {
                index,
                field,
                value: raw.to_string(),
            })
        };
        let x = coord("x", &self.x)?;
        let y = coord("y", &self.y)?;

        let radius = parse_int_prefix(&self.radius);
        let speed = parse_int_prefix(&self.speed);
        let (radius, speed) = match (radius, speed) {
            (Some(r), Some(s)) => (r, s),
            _ => {
                crate::log::debug!(
                    index,
                    radius = %self.radius,
                    speed = %self.speed,
                    "row radius/speed unparseable, using 0"
                );
                (0.0, 0.0)
            }
        };

        Ok(Waypoint::new(Vector2::new(x, y), speed, radius).with_comment(self.comment.clone()))
    }
}

/// Convert a whole editor table, stopping at the first bad coordinate.
pub fn waypoints_from_rows(rows: &[WaypointRow]) -> Result<Vec<Waypoint>, WaypointError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| row.to_waypoint(index))
        .collect()
}

/// Parse leading whitespace, an optional sign and the leading integer digits,
/// hexadecimal after a `0x`/`0X` prefix and decimal otherwise.
fn parse_int_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let end = digits
        .bytes()
        .position(|b| !(b as char).is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end]
        .bytes()
        .filter_map(|b| (b as char).to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix_semantics() {
        assert_eq!(parse_int_prefix("42"), Some(42.0));
        assert_eq!(parse_int_prefix("  -7"), Some(-7.0));
        assert_eq!(parse_int_prefix("+3"), Some(3.0));
        assert_eq!(parse_int_prefix("12.7"), Some(12.0));
        assert_eq!(parse_int_prefix("30in"), Some(30.0));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn int_prefix_accepts_hex() {
        assert_eq!(parse_int_prefix("0x1A"), Some(26.0));
        assert_eq!(parse_int_prefix(" -0XfF"), Some(-255.0));
        assert_eq!(parse_int_prefix("0x1g"), Some(1.0));
        assert_eq!(parse_int_prefix("0x"), None);
        assert_eq!(parse_int_prefix("0xz"), None);
        assert_eq!(parse_int_prefix("012"), Some(12.0));
    }

    #[test]
    fn row_converts() {
        let wp = WaypointRow::new("30", "40", "15", "60")
            .with_comment("gear")
            .to_waypoint(0)
            .unwrap();
        assert_eq!(wp.position, Vector2::new(30.0, 40.0));
        assert_eq!(wp.blend_radius, 15.0);
        assert_eq!(wp.speed, 60.0);
        assert_eq!(wp.comment, "gear");
    }

    #[test]
    fn bad_radius_zeroes_radius_and_speed() {
        let wp = WaypointRow::new("30", "40", "", "60").to_waypoint(0).unwrap();
        assert_eq!(wp.blend_radius, 0.0);
        assert_eq!(wp.speed, 0.0);

        let wp = WaypointRow::new("30", "40", "12", "fast").to_waypoint(0).unwrap();
        assert_eq!(wp.blend_radius, 0.0);
        assert_eq!(wp.speed, 0.0);
    }

    #[test]
    fn bad_coordinate_is_an_error() {
        let err = WaypointRow::new("30", "north", "0", "0").to_waypoint(3).unwrap_err();
        assert_eq!(
            err,
            WaypointError::InvalidCoordinate {
                index: 3,
                field: "y",
                value: "north".to_string(),
            }
        );
    }

    #[test]
    fn table_conversion_keeps_order() {
        let rows = vec![
            WaypointRow::new("0", "0", "0", "0"),
            WaypointRow::new("10", "0", "5", "60"),
        ];
        let wps = waypoints_from_rows(&rows).unwrap();
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[1].position.x, 10.0);
    }

    #[test]
    fn serializes_radius_field_name() {
        let wp = Waypoint::at(30.0, 30.0, 15.0, 60.0).with_comment("x");
        let json = serde_json::to_string(&wp).unwrap();
        insta::assert_snapshot!(json, @r#"{"position":{"x":30.0,"y":30.0},"speed":60.0,"radius":15.0,"comment":"x"}"#);
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"position":{"x":1,"y":2},"speed":0,"comment":""}"#;
        assert!(serde_json::from_str::<Waypoint>(json).is_err());
    }
}

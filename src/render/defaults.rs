//! Default sizes and settings (field units are inches)

/// Robot length along its heading.
pub const ROBOT_LENGTH: f64 = 33.325;
/// Robot width across its heading.
pub const ROBOT_WIDTH: f64 = 35.45;

pub const LINEAR_STEP: f64 = 1.0;
/// Arc stamp spacing as a fraction of the fillet radius.
pub const ARC_STEP_FRACTION: f64 = 0.01;

pub const MIN_SPEED: f64 = 0.0;
pub const MAX_SPEED: f64 = 120.0;

pub const FIELD_WIDTH: f64 = 652.0;
pub const FIELD_HEIGHT: f64 = 324.0;
pub const SURFACE_WIDTH: f64 = 1656.0;
pub const SURFACE_HEIGHT: f64 = 823.0;

pub const POINT_RADIUS: f64 = 5.0;
pub const STROKE_WIDTH: f64 = 2.0;

pub const POINT_COLOR: &str = "#f72c1c";
pub const BLENDED_POINT_COLOR: &str = "rgba(120,120,120,0.8)";
pub const CORRIDOR_FILL: &str = "rgba(150,150,150,0.5)";

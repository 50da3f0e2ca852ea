//! Drawing output for built paths
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, colors and field dimensions
//! - `color`: Speed to color ramp
//! - `projection`: Field to surface coordinates
//! - `svg`: Reference SVG rendering
//!
//! The geometry itself never depends on any of this: a [`Path`] is turned
//! into an ordered list of [`DrawPrimitive`]s in field coordinates, and the
//! SVG adapter projects those.

pub mod color;
pub mod defaults;
pub mod projection;
pub mod svg;

pub use color::SpeedColorRamp;
pub use projection::Projection;
pub use svg::{RenderOptions, render_svg};

use crate::path::{Bend, EPSILON, Path, PathElement, SweepDirection, Traverse};
use crate::types::{Rgb, Vector2};

/// One colored piece of a path, in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPrimitive {
    /// Straight line with a linear color gradient from `start` to `end`.
    Segment {
        start: Vector2,
        end: Vector2,
        start_color: Rgb,
        end_color: Rgb,
    },
    /// Minor arc drawn with increasing surface angle from `start_angle` to
    /// `end_angle`.
    Arc {
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        sweep: SweepDirection,
        color: Rgb,
    },
}

impl DrawPrimitive {
    /// Point on an arc at surface angle `angle`, in field coordinates.
    pub fn arc_point(center: Vector2, radius: f64, angle: f64) -> Vector2 {
        center + Vector2::from_angle(angle) * radius
    }
}

/// Colored primitives for every drawable element of `path`.
///
/// The segment leaving waypoint `k` fades from the speed of waypoint `k + 1`
/// to the speed of waypoint `k + 2` (0 past the end). A fillet takes the
/// speed of the waypoint after its corner. Zero-length segments and sharp
/// corners draw nothing.
pub fn draw_primitives(path: &Path, ramp: &SpeedColorRamp) -> Vec<DrawPrimitive> {
    let mut primitives = Vec::with_capacity(path.elements().len());
    let mut leg = 0;
    for element in path.elements() {
        match element {
            PathElement::Segment(segment) => {
                if segment.length() > EPSILON {
                    primitives.push(DrawPrimitive::Segment {
                        start: segment.start(),
                        end: segment.end(),
                        start_color: ramp.color(path.next_speed(leg)),
                        end_color: ramp.color(path.next_speed(leg + 1)),
                    });
                }
                leg += 1;
            }
            PathElement::Fillet(fillet) => {
                // `leg` already points past the incoming segment
                let color = ramp.color(path.next_speed(leg));
                match fillet.bend() {
                    Bend::Arc { .. } if fillet.is_sharp() => {}
                    Bend::Arc { center, radius, sweep } => {
                        let Some((start_angle, end_angle)) = fillet.draw_angles() else {
                            continue;
                        };
                        primitives.push(DrawPrimitive::Arc {
                            center,
                            radius,
                            start_angle,
                            end_angle,
                            sweep,
                            color,
                        });
                    }
                    Bend::Straight => {
                        if fillet.length() > EPSILON {
                            primitives.push(DrawPrimitive::Segment {
                                start: fillet.tangent_in(),
                                end: fillet.tangent_out(),
                                start_color: color,
                                end_color: color,
                            });
                        }
                    }
                }
            }
        }
    }
    crate::log::debug!(count = primitives.len(), "draw primitives");
    primitives
}

impl Path {
    /// Shorthand for [`draw_primitives`].
    pub fn draw_primitives(&self, ramp: &SpeedColorRamp) -> Vec<DrawPrimitive> {
        draw_primitives(self, ramp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Waypoint;

    fn scenario() -> Vec<Waypoint> {
        vec![
            Waypoint::at(30.0, 30.0, 0.0, 0.0),
            Waypoint::at(230.0, 30.0, 30.0, 60.0),
            Waypoint::at(230.0, 230.0, 0.0, 120.0),
        ]
    }

    #[test]
    fn colors_follow_next_waypoint_speed() {
        let path = Path::build(&scenario());
        let prims = path.draw_primitives(&SpeedColorRamp::default());
        assert_eq!(prims.len(), 3);
        match prims[0] {
            DrawPrimitive::Segment { start, end, start_color, end_color } => {
                assert_eq!(start, Vector2::new(30.0, 30.0));
                assert_eq!(end, Vector2::new(200.0, 30.0));
                assert_eq!(start_color, Rgb::YELLOW);
                assert_eq!(end_color, Rgb::GREEN);
            }
            ref other => panic!("expected segment, got {other:?}"),
        }
        match prims[1] {
            DrawPrimitive::Arc { radius, sweep, color, .. } => {
                assert!((radius - 30.0).abs() < 1e-9);
                assert_eq!(sweep, SweepDirection::CounterClockwise);
                assert_eq!(color, Rgb::GREEN);
            }
            ref other => panic!("expected arc, got {other:?}"),
        }
        match prims[2] {
            DrawPrimitive::Segment { start_color, end_color, .. } => {
                assert_eq!(start_color, Rgb::GREEN);
                assert_eq!(end_color, Rgb::RED);
            }
            ref other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn arc_angles_hit_tangent_points() {
        let path = Path::build(&scenario());
        let fillet = path.fillets().next().unwrap();
        let prims = path.draw_primitives(&SpeedColorRamp::default());
        let DrawPrimitive::Arc { center, radius, start_angle, end_angle, .. } = prims[1] else {
            panic!("expected arc");
        };
        // counter-clockwise turn: drawn from the outgoing tangent point
        let a = DrawPrimitive::arc_point(center, radius, start_angle);
        let b = DrawPrimitive::arc_point(center, radius, end_angle);
        assert!(a.distance(fillet.tangent_out()) < 1e-9);
        assert!(b.distance(fillet.tangent_in()) < 1e-9);
    }

    #[test]
    fn sharp_corners_draw_nothing() {
        let path = Path::build(&[
            Waypoint::at(0.0, 0.0, 0.0, 0.0),
            Waypoint::at(50.0, 0.0, 0.0, 0.0),
            Waypoint::at(50.0, 50.0, 0.0, 0.0),
        ]);
        let prims = path.draw_primitives(&SpeedColorRamp::default());
        assert_eq!(prims.len(), 2);
        assert!(prims.iter().all(|p| matches!(p, DrawPrimitive::Segment { .. })));
    }

    #[test]
    fn straight_joint_draws_a_flat_segment() {
        let path = Path::build(&[
            Waypoint::at(0.0, 0.0, 0.0, 0.0),
            Waypoint::at(50.0, 0.0, 10.0, 0.0),
            Waypoint::at(100.0, 0.0, 0.0, 120.0),
        ]);
        let prims = path.draw_primitives(&SpeedColorRamp::default());
        assert_eq!(
            prims[1],
            DrawPrimitive::Segment {
                start: Vector2::new(40.0, 0.0),
                end: Vector2::new(60.0, 0.0),
                start_color: Rgb::GREEN,
                end_color: Rgb::GREEN,
            }
        );
    }

    #[test]
    fn empty_path_draws_nothing() {
        assert!(Path::build(&[]).draw_primitives(&SpeedColorRamp::default()).is_empty());
    }
}

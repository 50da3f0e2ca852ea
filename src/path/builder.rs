//! Builds a [`Path`] from an ordered waypoint list.
//!
//! For `n` waypoints there are `n - 1` legs and `n - 2` corners. Each leg
//! becomes a trimmed segment, each interior waypoint a fillet, and the two
//! kinds alternate. A segment is computed once and shared by the fillets on
//! either side, so neighbouring elements meet exactly.
//!
//! The end waypoints are never filleted: the first segment starts on the
//! first waypoint and the last segment ends on the last waypoint, whatever
//! blend radius those two carry.

use crate::waypoint::Waypoint;

use super::fillet::Fillet;
use super::segment::TrimmedSegment;
use super::{Path, PathElement};

/// One-shot builder over a borrowed waypoint list
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    waypoints: &'a [Waypoint],
}

impl<'a> PathBuilder<'a> {
    pub fn new(waypoints: &'a [Waypoint]) -> Self {
        Self { waypoints }
    }

    /// Waypoint `i`, clamped to the last one.
    ///
    /// Must not be called on an empty list.
    fn point(&self, i: usize) -> &'a Waypoint {
        let last = self.waypoints.len() - 1;
        &self.waypoints[i.min(last)]
    }

    /// Trimmed segment for the leg `i → i + 1`.
    fn leg(&self, i: usize) -> TrimmedSegment {
        let last = self.waypoints.len() - 1;
        let from = self.point(i);
        let to = self.point(i + 1);
        let trim_start = if i == 0 { 0.0 } else { from.blend_radius };
        let trim_end = if i + 1 >= last { 0.0 } else { to.blend_radius };
        TrimmedSegment::trimmed(from, to, trim_start, trim_end)
    }

    pub fn build(self) -> Path {
        let n = self.waypoints.len();
        if n < 2 {
            crate::log::debug!(waypoints = n, "too few waypoints, empty path");
            return Path::default();
        }

        let mut elements = Vec::with_capacity(2 * n - 3);
        let mut incoming = self.leg(0);
        for i in 0..n - 2 {
            let outgoing = self.leg(i + 1);
            let fillet = Fillet::new(incoming.clone(), outgoing.clone());
            elements.push(PathElement::Segment(incoming));
            elements.push(PathElement::Fillet(fillet));
            incoming = outgoing;
        }
        elements.push(PathElement::Segment(incoming));

        crate::log::debug!(waypoints = n, elements = elements.len(), "built path");
        Path::from_parts(self.waypoints.to_vec(), elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Bend, SweepDirection, Traverse};
    use crate::types::Vector2;

    const TOL: f64 = 1e-9;

    fn scenario() -> Vec<Waypoint> {
        vec![
            Waypoint::at(30.0, 30.0, 0.0, 0.0),
            Waypoint::at(230.0, 30.0, 30.0, 0.0),
            Waypoint::at(230.0, 230.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn empty_and_single_waypoint_give_empty_path() {
        assert!(Path::build(&[]).is_empty());
        assert!(Path::build(&[Waypoint::at(1.0, 2.0, 5.0, 60.0)]).is_empty());
    }

    #[test]
    fn two_waypoints_give_one_segment() {
        let path = Path::build(&[
            Waypoint::at(0.0, 0.0, 10.0, 0.0),
            Waypoint::at(100.0, 0.0, 10.0, 60.0),
        ]);
        assert_eq!(path.elements().len(), 1);
        let seg = path.elements()[0].as_segment().unwrap();
        assert_eq!(seg.start(), Vector2::new(0.0, 0.0));
        assert_eq!(seg.end(), Vector2::new(100.0, 0.0));
        assert_eq!(path.fillets().count(), 0);
    }

    #[test]
    fn corner_scenario() {
        let path = Path::build(&scenario());
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs[0].start(), Vector2::new(30.0, 30.0));
        assert_eq!(segs[0].end(), Vector2::new(200.0, 30.0));
        assert_eq!(segs[1].start(), Vector2::new(230.0, 60.0));
        assert_eq!(segs[1].end(), Vector2::new(230.0, 230.0));

        let fillet = path.fillets().next().unwrap();
        let center = fillet.center().unwrap();
        // on the corner bisector, 30 units from each segment
        assert!((center.x - 200.0).abs() < TOL);
        assert!((center.y - 60.0).abs() < TOL);
        assert!((fillet.radius().unwrap() - 30.0).abs() < TOL);
        assert!((fillet.swept_angle() - std::f64::consts::FRAC_PI_2).abs() < TOL);
        assert_eq!(fillet.sweep(), Some(SweepDirection::CounterClockwise));
    }

    #[test]
    fn chain_is_continuous() {
        let wps = vec![
            Waypoint::at(0.0, 0.0, 0.0, 0.0),
            Waypoint::at(80.0, 10.0, 20.0, 60.0),
            Waypoint::at(120.0, 90.0, 15.0, 90.0),
            Waypoint::at(40.0, 140.0, 25.0, 60.0),
            Waypoint::at(-30.0, 60.0, 0.0, 0.0),
        ];
        let path = Path::build(&wps);
        assert_eq!(path.elements().len(), 7);
        for pair in path.elements().windows(2) {
            assert!(
                pair[0].exit().distance(pair[1].entry()) < TOL,
                "gap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
        for fillet in path.fillets() {
            let c = fillet.center().unwrap();
            let r = fillet.radius().unwrap();
            assert!((c.distance(fillet.tangent_in()) - r).abs() < 1e-6);
            assert!((c.distance(fillet.tangent_out()) - r).abs() < 1e-6);
        }
    }

    #[test]
    fn endpoint_radii_are_ignored() {
        let path = Path::build(&[
            Waypoint::at(0.0, 0.0, 25.0, 0.0),
            Waypoint::at(100.0, 0.0, 10.0, 0.0),
            Waypoint::at(100.0, 100.0, 25.0, 0.0),
        ]);
        assert_eq!(path.start(), Some(Vector2::new(0.0, 0.0)));
        assert_eq!(path.end(), Some(Vector2::new(100.0, 100.0)));
    }

    #[test]
    fn collinear_waypoints_bridge_straight() {
        let path = Path::build(&[
            Waypoint::at(0.0, 0.0, 0.0, 0.0),
            Waypoint::at(50.0, 50.0, 10.0, 0.0),
            Waypoint::at(100.0, 100.0, 0.0, 0.0),
        ]);
        let fillet = path.fillets().next().unwrap();
        assert_eq!(fillet.bend(), Bend::Straight);
        assert!((path.length() - 100.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        for element in path.elements() {
            assert!(element.entry().is_finite() && element.exit().is_finite());
        }
    }

    #[test]
    fn clamped_lookup() {
        let wps = scenario();
        let builder = PathBuilder::new(&wps);
        assert_eq!(builder.point(7), &wps[2]);
        assert_eq!(builder.point(1), &wps[1]);
    }
}

//! Fillet paths through ordered waypoints.
//!
//! Each waypoint carries a position, a blend radius and a target speed.
//! Consecutive waypoints are joined by straight segments; at every interior
//! waypoint the corner is replaced by a circular arc tangent to both legs,
//! cut back from the corner by that waypoint's blend radius. On top of the
//! built [`Path`] the crate sweeps a robot footprint into a coverage
//! [`Corridor`], colors the path by speed, and renders SVG.
//!
//! ```
//! use waypath::{Path, Waypoint};
//!
//! let path = Path::build(&[
//!     Waypoint::at(30.0, 30.0, 0.0, 0.0),
//!     Waypoint::at(230.0, 30.0, 30.0, 60.0),
//!     Waypoint::at(230.0, 230.0, 0.0, 0.0),
//! ]);
//! let fillet = path.fillets().next().unwrap();
//! assert_eq!(fillet.tangent_in(), waypath::Vector2::new(200.0, 30.0));
//! ```

pub mod document;
pub mod errors;
pub mod log;
pub mod path;
pub mod render;
pub mod types;
pub mod waypoint;

pub use document::PathDocument;
pub use errors::{ConfigError, ImportError, WaypointError};
pub use path::{
    Bend, Corridor, CorridorSweeper, EndpointPoses, Fillet, OrientedRect, Path, PathBuilder,
    PathElement, SweepDirection, Traverse, TrimmedSegment,
};
pub use render::{DrawPrimitive, Projection, RenderOptions, SpeedColorRamp, render_svg};
pub use types::{Footprint, NumericError, Rgb, Vector2};
pub use waypoint::{Waypoint, WaypointRow};

/// Render an exported path document to SVG with default options.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn document_to_svg(name: &str, source: &str) -> Result<String, miette::Report> {
    let document = PathDocument::from_source(name, source)?;
    Ok(render_svg(&document.waypoints, &RenderOptions::default()))
}

/// Convert editor rows and export them as marker lines.
pub fn export_rows(
    title: &str,
    reversed: bool,
    rows: &[WaypointRow],
) -> Result<String, miette::Report> {
    let waypoints = waypoint::waypoints_from_rows(rows)?;
    let markers = PathDocument::new(title, reversed, waypoints)
        .markers()
        .map_err(|e| miette::miette!("failed to serialize waypoints: {}", e))?;
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_export_and_render() {
        let rows = vec![
            WaypointRow::new("16", "234", "0", "0"),
            WaypointRow::new("97", "234", "54", "90"),
            WaypointRow::new("97", "295", "0", "90").with_comment("RamWall"),
        ];
        let text = export_rows("StartToHopperBlue", false, &rows).unwrap();
        let svg = document_to_svg("StartToHopperBlue.java", &text).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn bad_rows_surface_as_reports() {
        let rows = vec![WaypointRow::new("x", "0", "0", "0")];
        let err = export_rows("T", false, &rows).unwrap_err();
        assert!(err.to_string().contains("x is not a number"));
    }

    #[test]
    fn missing_markers_surface_as_reports() {
        let err = document_to_svg("empty.java", "class Empty {}").unwrap_err();
        assert!(err.to_string().contains("WAYPOINT_DATA"));
    }
}

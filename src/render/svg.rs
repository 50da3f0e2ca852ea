//! SVG generation
//!
//! A reference drawing of a path on a fixed-size surface: corridor stamps
//! underneath, then the speed-colored path, the start/end robot outlines and
//! the waypoint dots on top.

use crate::errors::ConfigError;
use crate::path::{CorridorSweeper, OrientedRect, Path};
use crate::types::{Rgb, Vector2, positive};
use crate::waypoint::Waypoint;

use super::defaults;
use super::{DrawPrimitive, Projection, SpeedColorRamp};

/// Everything that shapes the SVG output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    projection: Projection,
    ramp: SpeedColorRamp,
    sweeper: CorridorSweeper,
    corridor: bool,
    poses: bool,
    waypoints: bool,
    stroke_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            ramp: SpeedColorRamp::default(),
            sweeper: CorridorSweeper::default(),
            corridor: true,
            poses: true,
            waypoints: true,
            stroke_width: defaults::STROKE_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_ramp(mut self, ramp: SpeedColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn with_sweeper(mut self, sweeper: CorridorSweeper) -> Self {
        self.sweeper = sweeper;
        self
    }

    /// Draw the swept corridor underneath the path.
    pub fn with_corridor(mut self, on: bool) -> Self {
        self.corridor = on;
        self
    }

    /// Outline the robot at the first and last waypoint.
    pub fn with_poses(mut self, on: bool) -> Self {
        self.poses = on;
        self
    }

    /// Mark every waypoint with a dot.
    pub fn with_waypoints(mut self, on: bool) -> Self {
        self.waypoints = on;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Result<Self, ConfigError> {
        self.stroke_width = positive(width).map_err(ConfigError::invalid("stroke width"))?;
        Ok(self)
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn ramp(&self) -> &SpeedColorRamp {
        &self.ramp
    }

    pub fn sweeper(&self) -> &CorridorSweeper {
        &self.sweeper
    }
}

/// Build the path through `waypoints` and render it.
pub fn render_svg(waypoints: &[Waypoint], options: &RenderOptions) -> String {
    render_path(&Path::build(waypoints), options)
}

/// Render an already built path.
pub fn render_path(path: &Path, options: &RenderOptions) -> String {
    let proj = &options.projection;
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n",
        w = fmt_num(proj.surface_width()),
        h = fmt_num(proj.surface_height()),
    ));

    if options.corridor {
        let corridor = options.sweeper.sweep(path);
        for stamp in corridor.stamps() {
            out.push_str(&polygon(
                proj,
                stamp,
                &format!("fill:{};stroke:none", defaults::CORRIDOR_FILL),
            ));
        }
    }

    let stroke = fmt_num(options.stroke_width);
    for (i, primitive) in path.draw_primitives(&options.ramp).iter().enumerate() {
        match *primitive {
            DrawPrimitive::Segment {
                start,
                end,
                start_color,
                end_color,
            } => {
                let a = proj.to_surface(start);
                let b = proj.to_surface(end);
                out.push_str(&gradient(i, a, b, start_color, end_color));
                out.push_str(&format!(
                    "<path d=\"M{},{}L{},{}\" style=\"fill:none;stroke:url(#speed{i});stroke-width:{stroke}\" />\n",
                    fmt_num(a.x),
                    fmt_num(a.y),
                    fmt_num(b.x),
                    fmt_num(b.y),
                ));
            }
            DrawPrimitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
                ..
            } => {
                // surface angles increase clockwise on screen, which is the
                // SVG positive sweep
                let c = proj.to_surface(center);
                let r = proj.scale_length(radius);
                let a = c + Vector2::new(start_angle.cos(), start_angle.sin()) * r;
                let b = c + Vector2::new(end_angle.cos(), end_angle.sin()) * r;
                out.push_str(&format!(
                    "<path d=\"M{},{}A{r},{r} 0 0,1 {},{}\" style=\"fill:none;stroke:{color};stroke-width:{stroke}\" />\n",
                    fmt_num(a.x),
                    fmt_num(a.y),
                    fmt_num(b.x),
                    fmt_num(b.y),
                    r = fmt_num(r),
                ));
            }
        }
    }

    if options.poses {
        if let Some(poses) = options.sweeper.endpoint_poses(path) {
            let start_color = options.ramp.color(path.next_speed(0));
            let end_color = options.ramp.color(0.0);
            for (pose, color) in [(poses.start, start_color), (poses.end, end_color)] {
                out.push_str(&polygon(
                    proj,
                    &pose,
                    &format!("fill:none;stroke:{color};stroke-width:{stroke}"),
                ));
            }
        }
    }

    if options.waypoints {
        for wp in path.waypoints() {
            let p = proj.to_surface(wp.position);
            let fill = if wp.is_blended() {
                defaults::BLENDED_POINT_COLOR
            } else {
                defaults::POINT_COLOR
            };
            out.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" style=\"fill:{fill}\" />\n",
                fmt_num(p.x),
                fmt_num(p.y),
                fmt_num(defaults::POINT_RADIUS),
            ));
        }
    }

    out.push_str("</svg>\n");
    crate::log::debug!(bytes = out.len(), "rendered svg");
    out
}

fn polygon(proj: &Projection, rect: &OrientedRect, style: &str) -> String {
    let points: Vec<String> = rect
        .corners()
        .iter()
        .map(|c| {
            let p = proj.to_surface(*c);
            format!("{},{}", fmt_num(p.x), fmt_num(p.y))
        })
        .collect();
    format!("<polygon points=\"{}\" style=\"{style}\" />\n", points.join(" "))
}

fn gradient(id: usize, a: Vector2, b: Vector2, from: Rgb, to: Rgb) -> String {
    format!(
        "<linearGradient id=\"speed{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"><stop offset=\"0\" stop-color=\"{from}\" /><stop offset=\"1\" stop-color=\"{to}\" /></linearGradient>\n",
        fmt_num(a.x),
        fmt_num(a.y),
        fmt_num(b.x),
        fmt_num(b.y),
    )
}

/// Format a number like C's `%g`: 6 significant figures, trailing zeros
/// trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return if value.is_finite() { "0".to_string() } else { value.to_string() };
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", value, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

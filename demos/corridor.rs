//! Print the elements of a path and how well its corridor covers it.

use tracing_subscriber::EnvFilter;
use waypath::{CorridorSweeper, Path, PathElement, Traverse, Waypoint};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let waypoints = [
        Waypoint::at(16.0, 234.0, 0.0, 0.0),
        Waypoint::at(97.0, 234.0, 54.0, 90.0),
        Waypoint::at(97.0, 295.0, 0.0, 90.0).with_comment("RamWall"),
        Waypoint::at(97.0, 300.0, 0.0, 40.0),
        Waypoint::at(97.0, 340.0, 0.0, 40.0),
    ];
    let path = Path::build(&waypoints);

    for element in path.elements() {
        match element {
            PathElement::Segment(s) => {
                println!("segment {} -> {} ({:.2})", s.start(), s.end(), s.length())
            }
            PathElement::Fillet(f) => match (f.center(), f.radius(), f.sweep()) {
                (Some(c), Some(r), Some(sweep)) => {
                    println!("arc     center {c} r {r:.2} {sweep:?} ({:.2})", f.length())
                }
                _ => println!("joint   {} -> {}", f.tangent_in(), f.tangent_out()),
            },
        }
    }

    let corridor = CorridorSweeper::default().sweep(&path);
    let samples = path.sample(0.5);
    let covered = samples.iter().filter(|(p, _)| corridor.covers(*p)).count();
    println!(
        "length {:.2}, {} stamps, {}/{} samples covered",
        path.length(),
        corridor.len(),
        covered,
        samples.len()
    );
}

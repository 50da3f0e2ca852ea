//! Render an exported path document to SVG on stdout.
//!
//! `cargo run --example render --features tracing -- path/to/Path.java`

use camino::Utf8PathBuf;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"public class Sample implements PathContainer {
    // WAYPOINT_DATA: [{"position":{"x":16,"y":234},"speed":0,"radius":0,"comment":""},{"position":{"x":97,"y":234},"speed":90,"radius":54,"comment":""},{"position":{"x":97,"y":295},"speed":90,"radius":0,"comment":"RamWall"}]
    // IS_REVERSED: false
    // FILE_NAME: Sample
}"#;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (name, source) = match std::env::args().nth(1).map(Utf8PathBuf::from) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| miette::miette!("failed to read {}: {}", path, e))?;
            (path.file_name().unwrap_or(path.as_str()).to_string(), source)
        }
        None => ("Sample.java".to_string(), SAMPLE.to_string()),
    };

    let svg = waypath::document_to_svg(&name, &source)?;
    println!("{}", svg);
    Ok(())
}

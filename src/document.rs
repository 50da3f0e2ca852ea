//! Exported path documents.
//!
//! A path travels as a JSON waypoint array plus a title and a reversed flag.
//! Inside a generated source file the three values sit on comment marker
//! lines, which [`PathDocument::from_source`] finds again with a small pest
//! grammar; the rest of the file is ignored.

use std::borrow::Cow;

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;
use pest_derive::Parser;

use crate::errors::ImportError;
use crate::path::Path;
use crate::waypoint::Waypoint;

#[derive(Parser)]
#[grammar = "document.pest"]
struct DocumentParser;

pub const WAYPOINT_DATA: &str = "WAYPOINT_DATA";
pub const IS_REVERSED: &str = "IS_REVERSED";
pub const FILE_NAME: &str = "FILE_NAME";

/// Title written for documents that have none.
pub const UNTITLED: &str = "UntitledPath";

/// A named, ordered waypoint list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDocument {
    pub title: String,
    /// The robot drives this path backwards.
    pub reversed: bool,
    pub waypoints: Vec<Waypoint>,
}

impl PathDocument {
    pub fn new(title: impl Into<String>, reversed: bool, waypoints: Vec<Waypoint>) -> Self {
        Self {
            title: title.into(),
            reversed,
            waypoints,
        }
    }

    /// The title as exported: trimmed, with line breaks and other control
    /// characters turned into spaces, or [`UNTITLED`] when that leaves
    /// nothing. Importing gives back this form, not the raw `title`.
    pub fn display_title(&self) -> Cow<'_, str> {
        let title = self.title.trim();
        if title.is_empty() {
            Cow::Borrowed(UNTITLED)
        } else if title.contains(char::is_control) {
            let flat: String = title
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect();
            match flat.trim() {
                "" => Cow::Borrowed(UNTITLED),
                trimmed => Cow::Owned(trimmed.to_string()),
            }
        } else {
            Cow::Borrowed(title)
        }
    }

    /// Waypoints as a compact JSON array, in order.
    pub fn waypoints_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.waypoints)
    }

    /// The three marker lines, newline separated.
    pub fn markers(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "// {WAYPOINT_DATA}: {}\n// {IS_REVERSED}: {}\n// {FILE_NAME}: {}\n",
            self.waypoints_json()?,
            self.reversed,
            self.display_title()
        ))
    }

    /// Build the path through this document's waypoints.
    pub fn build_path(&self) -> Path {
        Path::build(&self.waypoints)
    }

    /// Document from a bare JSON waypoint array.
    pub fn from_json(json: &str, title: &str, reversed: bool) -> Result<Self, ImportError> {
        let waypoints = parse_waypoints(json, 0, || {
            NamedSource::new(title, json.to_string()).with_language("json")
        })?;
        Ok(Self::new(title, reversed, waypoints))
    }

    /// Document from any text carrying the three markers; `name` labels
    /// diagnostics.
    pub fn from_source(name: &str, text: &str) -> Result<Self, ImportError> {
        let source = || NamedSource::new(name, text.to_string());
        let markers = find_markers(text).map_err(|e| syntax_error(e, source()))?;

        let find = |key: &'static str| {
            markers
                .iter()
                .find(|m| m.key == key)
                .ok_or_else(|| ImportError::MissingMarker {
                    marker: key,
                    src: source(),
                })
        };
        let data = find(WAYPOINT_DATA)?;
        let reversed = find(IS_REVERSED)?;
        let title = find(FILE_NAME)?;

        let waypoints = parse_waypoints(data.value, data.offset, source)?;
        crate::log::debug!(document = name, waypoints = waypoints.len(), "imported document");
        Ok(Self::new(
            title.value.trim(),
            reversed.value.contains("true"),
            waypoints,
        ))
    }

    /// Replace this document with the one in `text`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn reload(&mut self, name: &str, text: &str) -> Result<(), ImportError> {
        *self = Self::from_source(name, text)?;
        Ok(())
    }
}

struct Marker<'a> {
    key: &'a str,
    value: &'a str,
    /// Byte offset of `value` in the document.
    offset: usize,
}

fn find_markers(text: &str) -> Result<Vec<Marker<'_>>, pest::error::Error<Rule>> {
    let document = DocumentParser::parse(Rule::document, text)?;
    let mut markers = Vec::new();
    for pair in document.flatten().filter(|p| p.as_rule() == Rule::marker) {
        let mut key = None;
        let mut value = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::key => key = Some(inner.as_str()),
                Rule::value => value = Some((inner.as_str(), inner.as_span().start())),
                _ => {}
            }
        }
        if let (Some(key), Some((value, offset))) = (key, value) {
            markers.push(Marker { key, value, offset });
        }
    }
    Ok(markers)
}

fn parse_waypoints(
    json: &str,
    offset: usize,
    source: impl FnOnce() -> NamedSource<String>,
) -> Result<Vec<Waypoint>, ImportError> {
    serde_json::from_str(json.trim_end()).map_err(|e| {
        let at = offset + byte_offset(json, e.line(), e.column());
        crate::log::warn!(error = %e, "rejected waypoint data");
        ImportError::InvalidJson {
            message: e.to_string(),
            src: source(),
            span: SourceSpan::from((at, 0)),
        }
    })
}

/// Byte offset of a 1-based line and column, clamped to `text`.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

fn syntax_error(e: pest::error::Error<Rule>, src: NamedSource<String>) -> ImportError {
    let span = match e.location {
        InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
        InputLocation::Span((start, end)) => SourceSpan::from((start, end - start)),
    };
    ImportError::Syntax {
        src,
        span,
        details: Some(e.variant.message().into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;

    const EXPORTED: &str = r#"public class StartToHopperBlue implements PathContainer {
    @Override
    public boolean isReversed() {
        return false;
    }
	// WAYPOINT_DATA: [{"position":{"x":16,"y":234},"speed":0,"radius":0,"comment":""},{"position":{"x":95,"y":234},"speed":60,"radius":48,"comment":"turn"}]
	// IS_REVERSED: false
	// FILE_NAME: StartToHopperBlue
}"#;

    fn sample() -> PathDocument {
        PathDocument::new(
            "Demo",
            true,
            vec![
                Waypoint::at(16.0, 234.0, 0.0, 0.0),
                Waypoint::at(95.0, 234.0, 48.0, 60.0).with_comment("turn"),
            ],
        )
    }

    #[test]
    fn markers_snapshot() {
        insta::assert_snapshot!(sample().markers().unwrap(), @r#"
        // WAYPOINT_DATA: [{"position":{"x":16.0,"y":234.0},"speed":0.0,"radius":0.0,"comment":""},{"position":{"x":95.0,"y":234.0},"speed":60.0,"radius":48.0,"comment":"turn"}]
        // IS_REVERSED: true
        // FILE_NAME: Demo
        "#);
    }

    #[test]
    fn blank_title_exports_untitled() {
        let doc = PathDocument::new("  ", false, vec![]);
        assert_eq!(doc.display_title(), UNTITLED);
        assert!(doc.markers().unwrap().ends_with("// FILE_NAME: UntitledPath\n"));
    }

    #[test]
    fn title_is_flattened_to_one_line() {
        let mut doc = sample();
        doc.title = "  Left\nSide\r\tRun ".to_string();
        assert_eq!(doc.display_title(), "Left Side  Run");

        let text = doc.markers().unwrap();
        assert_eq!(text.lines().count(), 3);
        let back = PathDocument::from_source("t", &text).unwrap();
        assert_eq!(back.title, "Left Side  Run");
        assert_eq!(back.markers().unwrap(), text);

        doc.title = "\n\t".to_string();
        assert_eq!(doc.display_title(), UNTITLED);
    }

    #[test]
    fn fractional_values_round_trip_exactly() {
        let doc = PathDocument::new(
            "Fine",
            false,
            vec![
                Waypoint::at(100.41289431841285, 0.1, 14.344699188344693, 0.30000000000000004),
                Waypoint::at(1e-7, 233.99999999999997, 2.220446049250313e-16, 119.5),
            ],
        );
        let json = doc.waypoints_json().unwrap();
        assert_eq!(PathDocument::from_json(&json, "Fine", false).unwrap(), doc);

        let text = doc.markers().unwrap();
        assert_eq!(PathDocument::from_source("Fine.java", &text).unwrap(), doc);
    }

    #[test]
    fn imports_inline_markers() {
        let doc = PathDocument::from_source("StartToHopperBlue.java", EXPORTED).unwrap();
        assert_eq!(doc.title, "StartToHopperBlue");
        assert!(!doc.reversed);
        assert_eq!(doc.waypoints.len(), 2);
        assert_eq!(doc.waypoints[1].position, Vector2::new(95.0, 234.0));
        assert_eq!(doc.waypoints[1].blend_radius, 48.0);
        assert_eq!(doc.waypoints[1].comment, "turn");
    }

    #[test]
    fn imports_value_on_next_line() {
        let text = "    // WAYPOINT_DATA:\n    // [{\"position\":{\"x\":1,\"y\":2},\"speed\":3,\"radius\":4,\"comment\":\"\"}]\n    // IS_REVERSED: true\n    // FILE_NAME: Next\n";
        let doc = PathDocument::from_source("next.java", text).unwrap();
        assert_eq!(doc.waypoints, vec![Waypoint::at(1.0, 2.0, 4.0, 3.0)]);
        assert!(doc.reversed);
        assert_eq!(doc.title, "Next");
    }

    #[test]
    fn blank_marker_does_not_swallow_the_next_one() {
        let text = "// WAYPOINT_DATA: []\n// FILE_NAME:\n// IS_REVERSED: true\n";
        let err = PathDocument::from_source("x", text).unwrap_err();
        assert!(matches!(err, ImportError::MissingMarker { marker: FILE_NAME, .. }));
    }

    #[test]
    fn round_trip_through_markers() {
        let doc = sample();
        let text = format!("class Demo {{\n{}}}\n", doc.markers().unwrap());
        assert_eq!(PathDocument::from_source("Demo.java", &text).unwrap(), doc);
    }

    #[test]
    fn reversed_flag_is_substring_match() {
        let text = "// WAYPOINT_DATA: []\n// IS_REVERSED: true; \n// FILE_NAME: T\n";
        assert!(PathDocument::from_source("t", text).unwrap().reversed);
        let text = "// WAYPOINT_DATA: []\n// IS_REVERSED: nope\n// FILE_NAME: T\n";
        assert!(!PathDocument::from_source("t", text).unwrap().reversed);
    }

    #[test]
    fn missing_marker_is_reported() {
        let err =
            PathDocument::from_source("t", "// IS_REVERSED: false\n// FILE_NAME: T").unwrap_err();
        assert!(matches!(err, ImportError::MissingMarker { marker: WAYPOINT_DATA, .. }));
    }

    #[test]
    fn missing_field_points_into_json() {
        let text = "// WAYPOINT_DATA: [{\"position\":{\"x\":1,\"y\":2},\"speed\":3}]\n// IS_REVERSED: false\n// FILE_NAME: T\n";
        let err = PathDocument::from_source("t", text).unwrap_err();
        let ImportError::InvalidJson { message, span, .. } = &err else {
            panic!("expected invalid json, got {err:?}");
        };
        assert!(message.contains("missing field `radius`"), "{message}");
        let json_start = text.find('[').unwrap();
        assert!(span.offset() > json_start && span.offset() < text.find('\n').unwrap() + 1);
    }

    #[test]
    fn failed_reload_keeps_document() {
        let mut doc = sample();
        let before = doc.clone();
        let bad = "// WAYPOINT_DATA: [{]\n// IS_REVERSED: false\n// FILE_NAME: T";
        assert!(doc.reload("bad", bad).is_err());
        assert_eq!(doc, before);

        doc.reload("good", EXPORTED).unwrap();
        assert_eq!(doc.title, "StartToHopperBlue");
    }

    #[test]
    fn from_json_keeps_order() {
        let json = sample().waypoints_json().unwrap();
        let doc = PathDocument::from_json(&json, "Demo", true).unwrap();
        assert_eq!(doc, sample());
        assert!(PathDocument::from_json("[1, 2]", "Demo", false).is_err());
    }
}

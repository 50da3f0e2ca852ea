//! Error types with rich diagnostics using miette
//!
//! Import errors carry the offending document so the report can point at
//! the broken waypoint data.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Import Errors
// ============================================================================

/// Errors raised while importing a path document
#[derive(Error, Diagnostic, Debug)]
pub enum ImportError {
    #[error("missing `{marker}` marker")]
    #[diagnostic(
        code(waypath::import::missing_marker),
        help("exported documents carry `// {marker}: <value>` comment lines")
    )]
    MissingMarker {
        marker: &'static str,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("invalid waypoint data: {message}")]
    #[diagnostic(code(waypath::import::invalid_json))]
    InvalidJson {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("malformed document")]
    #[diagnostic(code(waypath::import::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("could not read past here")]
        span: SourceSpan,
        #[help]
        details: Option<String>,
    },
}

// ============================================================================
// Waypoint Errors
// ============================================================================

/// Errors converting editor input into waypoints
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum WaypointError {
    #[error("waypoint {index}: {field} is not a number: {value:?}")]
    #[diagnostic(
        code(waypath::waypoint::invalid_coordinate),
        help("x and y must be numeric; only radius and speed fall back to 0")
    )]
    InvalidCoordinate {
        index: usize,
        field: &'static str,
        value: String,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors from validating engine and render settings
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {name}: {source}")]
    #[diagnostic(code(waypath::config::invalid_value))]
    InvalidValue {
        name: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("empty speed range: min {min} must be below max {max}")]
    #[diagnostic(code(waypath::config::empty_speed_range))]
    EmptySpeedRange { min: f64, max: f64 },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str) -> impl FnOnce(NumericError) -> ConfigError {
        move |source| ConfigError::InvalidValue { name, source }
    }
}

//! Error types for startup configuration and probe construction.
//!
//! Everything here is fatal: it is reported once and the process exits
//! before the first frame is drawn. Per-tick gaps are not errors and are
//! tracked as [`Freshness`](crate::data::Freshness) instead.

use thiserror::Error;

/// Errors raised while building the dashboard from its arguments and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `type:target` arguments were given.
    #[error("No targets specified")]
    NoTargets,

    /// More panels requested than the layout supports.
    #[error("Too many targets specified ({0}, maximum is {max})", max = crate::data::MAX_PANELS)]
    TooManyTargets(usize),

    /// An argument that is not of the form `type:target`.
    #[error("Could not parse panel: {0:?}")]
    MalformedTarget(String),

    /// The probe type is not registered.
    #[error("Unsupported panel type: {kind:?} (available: {available})")]
    UnknownProbe { kind: String, available: String },

    /// A colour that is not six hex digits.
    #[error("Unable to parse {field} color {value:?}, expected RRGGBB")]
    InvalidColor { field: &'static str, value: String },

    /// A duration string that could not be parsed.
    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),

    /// The window leaves no room for a plot column.
    #[error("Window width {width} is too small for the configured margins")]
    WindowTooSmall { width: i32 },

    /// A layout dimension that would make panels overlap or overflow.
    #[error("Invalid {field} {value}: {reason}")]
    InvalidLayout {
        field: &'static str,
        value: i32,
        reason: &'static str,
    },

    /// The probe factory rejected its target.
    #[error("Error initializing {kind}: {source}")]
    Probe {
        kind: String,
        #[source]
        source: ProbeError,
    },
}

/// Errors a probe factory can return from `start`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// The target identifier is structurally invalid for this probe type.
    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: &'static str },
}

//! Error types for the animator

use crate::curve::CurveKind;
use crate::value::ValueKind;

/// Everything the animator can refuse to do.
///
/// Per-clip anomalies found while reconciling a loaded document are recovered
/// locally (the clip is dropped and a diagnostic recorded); only
/// [`AnimatorError::DocumentMalformed`] aborts a load.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimatorError {
    /// A clip's kind does not match the property it targets.
    #[error("Wrong type for property animation - \"{property}\" (expected {expected}, got {actual})")]
    TypeMismatch {
        property: String,
        expected: CurveKind,
        actual: CurveKind,
    },

    /// No registered property carries this name.
    #[error("No property with name - \"{name}\"")]
    UnknownProperty { name: String },

    /// A second clip targets a property that is already animated.
    #[error("Animation for property \"{name}\" already exists")]
    DuplicateBinding { name: String },

    /// A property with this name is already registered.
    #[error("Property \"{name}\" is already registered")]
    DuplicateProperty { name: String },

    /// A property was registered with a curve kind its target cannot hold.
    #[error("Property \"{property}\" holds {value} values but was registered as {kind}")]
    ValueKindMismatch {
        property: String,
        kind: CurveKind,
        value: ValueKind,
    },

    /// A clip entry could not be decoded (unknown type tag, bad payload).
    #[error("Unreadable animation clip for property \"{property}\". Reason - {reason}")]
    UnreadableClip { property: String, reason: String },

    /// Top-level document decode failure.
    #[error("Malformed animator document. Reason - {reason}")]
    DocumentMalformed { reason: String },
}

impl AnimatorError {
    /// Whether the animator can carry on after this error without losing
    /// anything but the offending clip or call.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DocumentMalformed { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } | Self::ValueKindMismatch { .. } => "type",
            Self::UnknownProperty { .. }
            | Self::DuplicateBinding { .. }
            | Self::DuplicateProperty { .. } => "registry",
            Self::UnreadableClip { .. } | Self::DocumentMalformed { .. } => "serialization",
        }
    }

    /// Property the error is about, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { property, .. }
            | Self::ValueKindMismatch { property, .. }
            | Self::UnreadableClip { property, .. } => Some(property),
            Self::UnknownProperty { name }
            | Self::DuplicateBinding { name }
            | Self::DuplicateProperty { name } => Some(name),
            Self::DocumentMalformed { .. } => None,
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::DocumentMalformed {
            reason: err.to_string(),
        }
    }
}

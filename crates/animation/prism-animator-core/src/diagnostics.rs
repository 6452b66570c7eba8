//! Diagnostics produced while loading animator documents.
//!
//! Every reconciliation anomaly is logged through the `log` facade and also
//! collected in a [`LoadReport`] so hosts can show the messages to the user.

use serde::{Deserialize, Serialize};

use crate::error::AnimatorError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// One human-readable message about a load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            property: None,
            message: message.into(),
        }
    }

    /// Warning for a clip that was dropped during reconciliation.
    pub fn dropped_clip(err: &AnimatorError) -> Self {
        let message = match err {
            AnimatorError::DuplicateBinding { .. } => err.to_string(),
            _ => format!("{err}. The animation will be deleted when the scene is saved"),
        };
        Self {
            level: DiagnosticLevel::Warning,
            property: err.property().map(str::to_owned),
            message,
        }
    }
}

/// Outcome of reconciling a loaded document against the live registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Properties re-attached to a persisted clip, in document order.
    pub activated: Vec<String>,
    /// Clips that were discarded, with the reason.
    pub dropped: Vec<AnimatorError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub(crate) fn activate(&mut self, property: &str) {
        log::debug!("Animation for property \"{property}\" restored");
        self.activated.push(property.to_owned());
    }

    pub(crate) fn drop_clip(&mut self, err: AnimatorError) {
        let diagnostic = Diagnostic::dropped_clip(&err);
        log::warn!("{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
        self.dropped.push(err);
    }

    /// Record an informational message (e.g. a host's "loaded" notice).
    pub fn note(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::info(message);
        log::info!("{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// True when every persisted clip found its property.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
    }
}

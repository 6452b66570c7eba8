//! Error types for scene documents

use std::path::PathBuf;

use prism_animator_core::AnimatorError;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Registering or reconciling animator state failed.
    #[error(transparent)]
    Animator(#[from] AnimatorError),

    /// The document text is not a scene document.
    #[error("Malformed scene document. Reason - {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot access \"{}\". Reason - {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SceneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Animator(err) => err.category(),
            Self::Json(_) => "serialization",
            Self::Io { .. } => "io",
        }
    }
}

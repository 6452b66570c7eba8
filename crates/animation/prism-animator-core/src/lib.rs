//! Prism Animator Core (engine-agnostic)
//!
//! Drives named scene properties through time with keyframe curves:
//! - `value`: which value types can be animated and how they blend
//! - `curve`: keyframe states + time window, evaluated by repeated lerp
//! - `binding`: typed property bindings behind a closed set of variants
//! - `clock`: the playback timeline with Once/Loop/PingPong wrap policies
//! - `animator`: the property registry driving bindings every frame
//! - `document` / `reconcile`: persisted shape and re-attaching clips on load

/// Match every value-type variant of a closed enum (`AnyCurve`, `CurveRef`,
/// `CurveMut`, `PropertyBinding`) and run the same body on its payload.
macro_rules! for_each_variant {
    ($enum:ident, $value:expr, $inner:ident => $body:expr) => {
        match $value {
            $enum::Scalar($inner) => $body,
            $enum::Integer($inner) => $body,
            $enum::Vector3($inner) => $body,
            $enum::Vector4($inner) => $body,
        }
    };
}

pub mod animator;
pub mod binding;
pub mod clock;
pub mod config;
pub mod curve;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod interp;
pub mod reconcile;
pub mod value;

// Re-exports for consumers (scene adapters)
pub use animator::Animator;
pub use binding::{Animatable, PropertyBinding, Target, TypedBinding};
pub use clock::{AnimationMode, PlaybackClock};
pub use config::AnimatorConfig;
pub use curve::{AnyCurve, Curve, CurveKind, CurveMut, CurveRef, MIN_STATES_COUNT};
pub use diagnostics::{Diagnostic, DiagnosticLevel, LoadReport};
pub use document::{AnimatorDocument, ClipBody, ClipEntry, ClipRecord};
pub use error::AnimatorError;
pub use value::{Interpolable, ValueKind, Vec3, Vec4};

/// Animator result type
pub type Result<T> = core::result::Result<T, AnimatorError>;

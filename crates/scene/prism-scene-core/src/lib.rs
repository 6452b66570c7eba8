//! Prism scene document.
//!
//! API:
//! - [`Scene`]: the attributes of the edited prism (transform, face count,
//!   colors, lighting) plus viewer flags.
//! - [`register_scene_properties`]: makes every animatable attribute known to
//!   an [`Animator`](prism_animator_core::Animator).
//! - [`SceneDocument`]: one open document (scene + animator + file path),
//!   ticked once per frame and loaded/saved as JSON.

pub mod document;
pub mod error;
pub mod scene;

pub use document::SceneDocument;
pub use error::SceneError;
pub use scene::{register_scene_properties, RenderMode, Scene};

pub type Result<T> = core::result::Result<T, SceneError>;

//! The open scene document.
//!
//! File shape:
//! ```json
//! { "Scene": { "Position": [0.0, 0.0, -1.0], "N": 3, ..., "Animator": { ... } } }
//! ```
//! Loading builds a complete new document first and swaps it in only when
//! parsing succeeded; a failed load leaves the open document untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use prism_animator_core::{Animator, AnimatorConfig, AnimatorDocument, LoadReport};

use crate::error::SceneError;
use crate::scene::{register_scene_properties, Scene};
use crate::Result;

#[derive(Serialize)]
struct SceneFileRef<'a> {
    #[serde(rename = "Scene")]
    scene: SceneRecordRef<'a>,
}

#[derive(Serialize)]
struct SceneRecordRef<'a> {
    #[serde(flatten)]
    scene: &'a Scene,
    #[serde(rename = "Animator")]
    animator: AnimatorDocument,
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(rename = "Scene")]
    scene: SceneRecord,
}

#[derive(Deserialize)]
struct SceneRecord {
    #[serde(flatten)]
    scene: Scene,
    #[serde(rename = "Animator", default)]
    animator: AnimatorDocument,
}

/// A scene, the animator driving it and where it was last loaded or saved.
#[derive(Debug)]
pub struct SceneDocument {
    scene: Scene,
    animator: Animator<Scene>,
    path: Option<PathBuf>,
}

impl SceneDocument {
    /// Default scene with every attribute registered and nothing animated.
    pub fn new(cfg: AnimatorConfig) -> Result<Self> {
        let mut animator = Animator::with_config(cfg);
        register_scene_properties(&mut animator)?;
        Ok(Self {
            scene: Scene::default(),
            animator,
            path: None,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(AnimatorConfig::default())
    }

    /// Replace the document with a fresh default one and forget the path.
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::new(self.animator.config().clone())?;
        Ok(())
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Unchecked access; prefer [`SceneDocument::edit`] for user edits.
    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn animator(&self) -> &Animator<Scene> {
        &self.animator
    }

    #[inline]
    pub fn animator_mut(&mut self) -> &mut Animator<Scene> {
        &mut self.animator
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether `property` is currently written by the animator.
    #[inline]
    pub fn is_driven(&self, property: &str) -> bool {
        self.animator.is_driven(property)
    }

    /// Apply a user edit to the scene unless `property` is animation
    /// controlled. Returns whether the edit ran.
    pub fn edit(&mut self, property: &str, f: impl FnOnce(&mut Scene)) -> bool {
        if self.is_driven(property) {
            log::debug!("edit of \"{property}\" ignored: driven by the animator");
            return false;
        }
        f(&mut self.scene);
        true
    }

    /// Per-frame tick with the measured frame time in seconds. The animator
    /// sees `delta_time * time_scale`.
    pub fn tick(&mut self, delta_time: f32) {
        let scaled = delta_time * self.scene.time_scale;
        self.animator.update(scaled, &mut self.scene);
    }

    pub fn to_json(&self) -> Result<String> {
        let file = SceneFileRef {
            scene: SceneRecordRef {
                scene: &self.scene,
                animator: self.animator.save(),
            },
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Write the document to `path` and remember it as the document path.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let written = self
            .to_json()
            .and_then(|json| fs::write(path, json).map_err(|e| SceneError::io(path, e)));
        match written {
            Ok(()) => {
                log::info!("Scene saved. Path - \"{}\"", path.display());
                self.path = Some(path.to_path_buf());
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to save scene. Reason - {err}");
                Err(err)
            }
        }
    }

    /// Replace the document with the one in `json`.
    ///
    /// Clips that do not fit the registered properties are dropped and
    /// reported; an unparseable document is an error and changes nothing.
    pub fn load_from_str(&mut self, json: &str) -> Result<LoadReport> {
        match self.parse(json, None) {
            Ok((document, report)) => {
                *self = document;
                Ok(report)
            }
            Err(err) => {
                log::error!("Failed to load scene. Reason - {err}");
                Err(err)
            }
        }
    }

    /// Like [`SceneDocument::load_from_str`], reading from `path` and
    /// remembering it on success.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(|e| SceneError::io(path, e))
            .and_then(|json| self.parse(&json, Some(path)));
        match loaded {
            Ok((document, report)) => {
                *self = document;
                Ok(report)
            }
            Err(err) => {
                log::error!("Failed to load scene. Reason - {err}");
                Err(err)
            }
        }
    }

    fn parse(&self, json: &str, path: Option<&Path>) -> Result<(Self, LoadReport)> {
        let file: SceneFile = serde_json::from_str(json)?;
        let mut document = Self::new(self.animator.config().clone())?;
        let SceneRecord { mut scene, animator } = file.scene;
        scene.heal();
        document.scene = scene;

        let mut report = document.animator.load(animator);
        if let Some(path) = path {
            report.note(format!("Scene loaded. Path - \"{}\"", path.display()));
            document.path = Some(path.to_path_buf());
        }
        Ok((document, report))
    }
}

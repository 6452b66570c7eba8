//! Scene attributes and their animator registration.

use serde::{Deserialize, Serialize};

use prism_animator_core::{Animator, CurveKind, Vec3, Vec4};

pub const POSITION: &str = "Position";
pub const ROTATION: &str = "Rotation";
pub const SCALE: &str = "Scale";
pub const N: &str = "N";
pub const PRISM_COLOR: &str = "Prism color";
pub const AMBIENT_COLOR: &str = "Light ambient color";
pub const DIFFUSE_COLOR: &str = "Light diffuse color";
pub const LIGHT_SPECULAR_COLOR: &str = "Light specular color";
pub const PRISM_SPECULAR_COLOR: &str = "Prism specular color";
pub const SHININESS: &str = "Prism shininess";

/// Smallest prism face count.
pub const MIN_FACES: i32 = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    Wireframe,
    #[default]
    Color,
    Texture,
}

/// The edited prism and its viewer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Scene {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    n: i32,
    /// Slow-motion factor applied to every animator tick; never negative.
    pub time_scale: f32,
    pub render_mode: RenderMode,
    pub show_normals: bool,
    pub prism_color: Vec3,
    /// Persisted under the key `Lightning`; `Lighting` is accepted on input.
    #[serde(rename = "Lightning", alias = "Lighting")]
    pub lighting: bool,
    pub ambient_color: Vec4,
    pub diffuse_color: Vec4,
    pub light_specular_color: Vec4,
    pub prism_specular_color: Vec4,
    pub shininess: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -1.0],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            n: MIN_FACES,
            time_scale: 1.0,
            render_mode: RenderMode::Color,
            show_normals: false,
            prism_color: [105.0 / 255.0, 184.0 / 255.0, 230.0 / 255.0],
            lighting: false,
            ambient_color: [0.0, 0.0, 0.0, 1.0],
            diffuse_color: [1.0; 4],
            light_specular_color: [1.0; 4],
            prism_specular_color: [0.0, 0.0, 0.0, 1.0],
            shininess: 0.0,
        }
    }
}

impl Scene {
    /// Number of side faces of the prism.
    #[inline]
    pub fn n(&self) -> i32 {
        self.n
    }

    /// Change the face count. Values below [`MIN_FACES`] and the current value
    /// are ignored; returns whether the prism changed.
    pub fn set_n(&mut self, value: i32) -> bool {
        if value == self.n || value < MIN_FACES {
            return false;
        }
        self.n = value;
        true
    }

    #[inline]
    pub fn set_time_scale(&mut self, value: f32) {
        self.time_scale = value.max(0.0);
    }

    /// Repair values a hand-edited or older document may carry.
    pub(crate) fn heal(&mut self) {
        if self.n < MIN_FACES {
            log::warn!("Scene face count {} raised to {MIN_FACES}", self.n);
            self.n = MIN_FACES;
        }
        if self.time_scale < 0.0 {
            log::warn!("Scene time scale {} raised to 0", self.time_scale);
            self.time_scale = 0.0;
        }
    }
}

/// Register every animatable scene attribute, in editor listing order.
pub fn register_scene_properties(
    animator: &mut Animator<Scene>,
) -> prism_animator_core::Result<()> {
    animator.register_field(
        POSITION,
        CurveKind::Vector3,
        |s: &mut Scene| &mut s.position,
        [0.0, 0.0, -1.0],
    )?;
    animator.register_field(
        ROTATION,
        CurveKind::Vector3,
        |s: &mut Scene| &mut s.rotation,
        [0.0; 3],
    )?;
    animator.register_field(
        SCALE,
        CurveKind::Vector3,
        |s: &mut Scene| &mut s.scale,
        [1.0; 3],
    )?;
    animator.register_setter(
        N,
        CurveKind::FaceCount,
        |s: &mut Scene, n: i32| {
            s.set_n(n);
        },
        MIN_FACES,
    )?;
    animator.register_field(
        PRISM_COLOR,
        CurveKind::Color3,
        |s: &mut Scene| &mut s.prism_color,
        [1.0; 3],
    )?;
    animator.register_field(
        AMBIENT_COLOR,
        CurveKind::Color4,
        |s: &mut Scene| &mut s.ambient_color,
        [0.0, 0.0, 0.0, 1.0],
    )?;
    animator.register_field(
        DIFFUSE_COLOR,
        CurveKind::Color4,
        |s: &mut Scene| &mut s.diffuse_color,
        [1.0; 4],
    )?;
    animator.register_field(
        LIGHT_SPECULAR_COLOR,
        CurveKind::Color4,
        |s: &mut Scene| &mut s.light_specular_color,
        [1.0; 4],
    )?;
    animator.register_field(
        PRISM_SPECULAR_COLOR,
        CurveKind::Color4,
        |s: &mut Scene| &mut s.prism_specular_color,
        [0.0, 0.0, 0.0, 1.0],
    )?;
    animator.register_field(
        SHININESS,
        CurveKind::Shininess,
        |s: &mut Scene| &mut s.shininess,
        0.0,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_count_ignores_small_and_repeated_values() {
        let mut scene = Scene::default();
        assert!(!scene.set_n(2));
        assert!(!scene.set_n(3));
        assert!(scene.set_n(6));
        assert_eq!(scene.n(), 6);
    }

    #[test]
    fn every_attribute_is_registered_once() {
        let mut animator = Animator::new();
        register_scene_properties(&mut animator).unwrap();
        assert_eq!(animator.properties_count(), 10);
        assert_eq!(animator.property_name(0), Some(POSITION));
        assert_eq!(animator.property_kind(SHININESS), Some(CurveKind::Shininess));
        assert_eq!(animator.property_kind(N), Some(CurveKind::FaceCount));
        assert!(register_scene_properties(&mut animator).is_err());
    }

    #[test]
    fn serialized_names_are_pascal_case() {
        let v = serde_json::to_value(Scene::default()).unwrap();
        assert_eq!(v["N"], serde_json::json!(3));
        assert_eq!(v["RenderMode"], serde_json::json!("Color"));
        assert!(v.get("LightSpecularColor").is_some());
        assert_eq!(v["Lightning"], serde_json::json!(false));
        assert!(v.get("Lighting").is_none());
    }

    #[test]
    fn lighting_flag_reads_either_key() {
        let legacy: Scene = serde_json::from_str(r#"{ "Lightning": true }"#).unwrap();
        assert!(legacy.lighting);
        let spelled: Scene = serde_json::from_str(r#"{ "Lighting": true }"#).unwrap();
        assert!(spelled.lighting);
    }

    #[test]
    fn heal_repairs_face_count_and_time_scale() {
        let mut scene: Scene = serde_json::from_str(r#"{ "N": 0, "TimeScale": -2.0 }"#).unwrap();
        scene.heal();
        assert_eq!(scene.n(), 3);
        assert_eq!(scene.time_scale, 0.0);
        assert_eq!(scene.position, [0.0, 0.0, -1.0]);
    }
}

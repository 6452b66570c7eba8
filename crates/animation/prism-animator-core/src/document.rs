//! Persisted animator document.
//!
//! Shape (embedded in a larger scene document):
//! ```json
//! {
//!   "Enabled": true, "Paused": false,
//!   "AnimationTime": 10.0, "CurrentTime": 0.0,
//!   "AnimationMode": "PingPong", "TimeScale": 1.0,
//!   "AnimationClips": [
//!     { "Type": "Vector3", "PropertyName": "Position",
//!       "StartTime": 0.0, "EndTime": 5.0,
//!       "DefaultValue": [0.0, 0.0, -1.0],
//!       "States": [[0.0, 0.0, -1.0], [1.0, 0.0, -1.0]] }
//!   ]
//! }
//! ```
//! Clips are a tagged union on `Type`, so heterogeneous curves round-trip
//! through one ordered list. A clip entry that does not decode (unknown type,
//! wrong payload) is kept as raw JSON and reported during reconciliation
//! instead of failing the whole document.

use serde::{Deserialize, Serialize};

use crate::clock::AnimationMode;
use crate::curve::{AnyCurve, Curve, CurveKind, CurveRef};
use crate::value::{Interpolable, Vec3, Vec4};

/// Playback fields plus the active clips, in activation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AnimatorDocument {
    pub enabled: bool,
    pub paused: bool,
    pub animation_time: f32,
    pub current_time: f32,
    pub animation_mode: AnimationMode,
    pub time_scale: f32,
    pub animation_clips: Vec<ClipEntry>,
}

impl Default for AnimatorDocument {
    fn default() -> Self {
        Self {
            enabled: false,
            paused: false,
            animation_time: 0.0,
            current_time: 0.0,
            animation_mode: AnimationMode::Once,
            time_scale: 1.0,
            animation_clips: Vec::new(),
        }
    }
}

impl AnimatorDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decoded clips, skipping unreadable entries.
    pub fn clips(&self) -> impl Iterator<Item = &ClipRecord> {
        self.animation_clips.iter().filter_map(|entry| match entry {
            ClipEntry::Clip(clip) => Some(clip),
            ClipEntry::Unreadable(_) => None,
        })
    }
}

/// One element of `AnimationClips`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipEntry {
    Clip(ClipRecord),
    /// Anything that is not a known clip; reported and dropped on load.
    Unreadable(serde_json::Value),
}

impl From<ClipRecord> for ClipEntry {
    fn from(clip: ClipRecord) -> Self {
        ClipEntry::Clip(clip)
    }
}

impl ClipEntry {
    /// Best-effort property name, also for unreadable entries.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            ClipEntry::Clip(clip) => Some(clip.property_name()),
            ClipEntry::Unreadable(raw) => raw.get("PropertyName").and_then(|v| v.as_str()),
        }
    }
}

/// Persisted clip, tagged by curve kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum ClipRecord {
    Scalar(ClipBody<f32>),
    Shininess(ClipBody<f32>),
    Integer(ClipBody<i32>),
    FaceCount(ClipBody<i32>),
    Vector3(ClipBody<Vec3>),
    Color3(ClipBody<Vec3>),
    Color4(ClipBody<Vec4>),
}

/// Fields shared by every clip type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClipBody<T> {
    pub property_name: String,
    pub start_time: f32,
    pub end_time: f32,
    pub default_value: T,
    pub states: Vec<T>,
}

impl<T: Interpolable> ClipBody<T> {
    fn from_curve(curve: &Curve<T>) -> Self {
        Self {
            property_name: curve.property_name().to_owned(),
            start_time: curve.start_time(),
            end_time: curve.end_time(),
            default_value: curve.default_value(),
            states: curve.states().to_vec(),
        }
    }

    fn into_curve(self, kind: CurveKind) -> Curve<T> {
        Curve::from_parts(
            kind,
            self.property_name,
            self.start_time,
            self.end_time,
            self.default_value,
            self.states,
        )
    }
}

impl ClipRecord {
    pub fn kind(&self) -> CurveKind {
        match self {
            ClipRecord::Scalar(_) => CurveKind::Scalar,
            ClipRecord::Shininess(_) => CurveKind::Shininess,
            ClipRecord::Integer(_) => CurveKind::Integer,
            ClipRecord::FaceCount(_) => CurveKind::FaceCount,
            ClipRecord::Vector3(_) => CurveKind::Vector3,
            ClipRecord::Color3(_) => CurveKind::Color3,
            ClipRecord::Color4(_) => CurveKind::Color4,
        }
    }

    pub fn property_name(&self) -> &str {
        match self {
            ClipRecord::Scalar(b) | ClipRecord::Shininess(b) => &b.property_name,
            ClipRecord::Integer(b) | ClipRecord::FaceCount(b) => &b.property_name,
            ClipRecord::Vector3(b) | ClipRecord::Color3(b) => &b.property_name,
            ClipRecord::Color4(b) => &b.property_name,
        }
    }

    /// Encode a live curve, tagging it with the curve's own kind.
    pub fn from_curve(curve: CurveRef<'_>) -> Self {
        match curve {
            CurveRef::Scalar(c) => match c.kind() {
                CurveKind::Shininess => ClipRecord::Shininess(ClipBody::from_curve(c)),
                _ => ClipRecord::Scalar(ClipBody::from_curve(c)),
            },
            CurveRef::Integer(c) => match c.kind() {
                CurveKind::FaceCount => ClipRecord::FaceCount(ClipBody::from_curve(c)),
                _ => ClipRecord::Integer(ClipBody::from_curve(c)),
            },
            CurveRef::Vector3(c) => match c.kind() {
                CurveKind::Color3 => ClipRecord::Color3(ClipBody::from_curve(c)),
                _ => ClipRecord::Vector3(ClipBody::from_curve(c)),
            },
            CurveRef::Vector4(c) => ClipRecord::Color4(ClipBody::from_curve(c)),
        }
    }

    /// Decode into a live curve, healing the time window and state count.
    pub fn into_curve(self) -> AnyCurve {
        let kind = self.kind();
        match self {
            ClipRecord::Scalar(b) | ClipRecord::Shininess(b) => {
                AnyCurve::Scalar(b.into_curve(kind))
            }
            ClipRecord::Integer(b) | ClipRecord::FaceCount(b) => {
                AnyCurve::Integer(b.into_curve(kind))
            }
            ClipRecord::Vector3(b) | ClipRecord::Color3(b) => {
                AnyCurve::Vector3(b.into_curve(kind))
            }
            ClipRecord::Color4(b) => AnyCurve::Vector4(b.into_curve(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clip_json_carries_its_type_tag() {
        let curve = AnyCurve::Scalar(Curve::new(CurveKind::Shininess, "Prism shininess", 32.0));
        let v = serde_json::to_value(ClipRecord::from_curve(curve.view())).unwrap();
        assert_eq!(
            v,
            json!({
                "Type": "Shininess",
                "PropertyName": "Prism shininess",
                "StartTime": 0.0,
                "EndTime": 0.0,
                "DefaultValue": 32.0,
                "States": [32.0, 32.0]
            })
        );
    }

    #[test]
    fn unknown_clip_types_stay_readable_as_raw_entries() {
        let doc: AnimatorDocument = serde_json::from_value(json!({
            "AnimationClips": [
                { "Type": "Quaternion", "PropertyName": "Rotation", "States": [] },
                { "Type": "Integer", "PropertyName": "N", "StartTime": 0.0, "EndTime": 1.0,
                  "DefaultValue": 3, "States": [3, 4] }
            ]
        }))
        .unwrap();
        assert_eq!(doc.animation_clips.len(), 2);
        assert!(matches!(doc.animation_clips[0], ClipEntry::Unreadable(_)));
        assert_eq!(doc.animation_clips[0].property_name(), Some("Rotation"));
        assert_eq!(doc.clips().count(), 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let doc =
            AnimatorDocument::from_json(r#"{ "Enabled": true, "AnimationMode": 2 }"#).unwrap();
        assert!(doc.enabled);
        assert_eq!(doc.animation_mode, AnimationMode::PingPong);
        assert_eq!(doc.time_scale, 1.0);
        assert!(doc.animation_clips.is_empty());
    }

    #[test]
    fn top_level_garbage_is_rejected() {
        assert!(AnimatorDocument::from_json("[1, 2, 3]").is_err());
        assert!(AnimatorDocument::from_json(r#"{ "AnimationTime": "long" }"#).is_err());
        assert!(AnimatorDocument::from_json(r#"{ "AnimationMode": "Bounce" }"#).is_err());
    }

    #[test]
    fn into_curve_heals_window_and_state_count() {
        let clip = ClipRecord::Color4(ClipBody {
            property_name: "Light ambient color".into(),
            start_time: 4.0,
            end_time: 1.0,
            default_value: [0.0, 0.0, 0.0, 1.0],
            states: vec![],
        });
        let curve = clip.into_curve();
        assert_eq!(curve.kind(), CurveKind::Color4);
        assert_eq!((curve.start_time(), curve.end_time()), (4.0, 4.0));
        assert_eq!(curve.states_count(), 2);
    }
}

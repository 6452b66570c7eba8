//! Save/load adapter between a live [`Animator`] and an [`AnimatorDocument`].
//!
//! Loading re-attaches persisted clips to the properties registered *now*,
//! which may differ from the ones registered when the document was saved.
//! Every clip is handled on its own:
//! - unknown property name → dropped (`UnknownProperty`)
//! - property already bound by an earlier clip → dropped (`DuplicateBinding`)
//! - clip kind differs from the property kind → dropped (`TypeMismatch`)
//! - entry that does not decode at all → dropped (`UnreadableClip`)
//!
//! Global playback fields are restored regardless, so saving right after a
//! load writes the healed document.

use crate::animator::Animator;
use crate::clock::PlaybackClock;
use crate::diagnostics::LoadReport;
use crate::document::{AnimatorDocument, ClipEntry, ClipRecord};
use crate::error::AnimatorError;
use crate::Result;

impl<S> Animator<S> {
    /// Snapshot playback fields and active curves (activation order).
    pub fn save(&self) -> AnimatorDocument {
        let clock = self.clock();
        AnimatorDocument {
            enabled: clock.enabled(),
            paused: clock.paused(),
            animation_time: clock.animation_time(),
            current_time: clock.current_time(),
            animation_mode: clock.mode(),
            time_scale: clock.time_scale(),
            animation_clips: self
                .animations()
                .map(|curve| ClipRecord::from_curve(curve).into())
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(self.save().to_json_pretty()?)
    }

    /// Replace playback state and active curves with `document`.
    ///
    /// Never fails: anomalous clips are dropped and reported, everything else
    /// is restored. Prior activations are cleared first.
    pub fn load(&mut self, document: AnimatorDocument) -> LoadReport {
        let mut report = LoadReport::default();
        self.deactivate_all();
        self.clock = PlaybackClock::restore(
            document.enabled,
            document.paused,
            document.animation_mode,
            document.animation_time,
            document.current_time,
            document.time_scale,
        );

        for entry in document.animation_clips {
            match self.attach(entry) {
                Ok(name) => report.activate(&name),
                Err(err) => report.drop_clip(err),
            }
        }

        log::info!(
            "animator load: {} clip(s) attached, {} dropped",
            report.activated.len(),
            report.dropped.len()
        );
        report
    }

    /// Parse and load. A document that does not parse leaves the animator
    /// untouched and returns `DocumentMalformed`.
    pub fn load_json(&mut self, json: &str) -> Result<LoadReport> {
        let document = AnimatorDocument::from_json(json)?;
        Ok(self.load(document))
    }

    fn attach(&mut self, entry: ClipEntry) -> Result<String> {
        let clip = match entry {
            ClipEntry::Clip(clip) => clip,
            ClipEntry::Unreadable(raw) => return Err(unreadable(raw)),
        };
        let name = clip.property_name().to_owned();
        let Some(&idx) = self.index.get(&name) else {
            return Err(AnimatorError::UnknownProperty { name });
        };
        let binding = &mut self.properties[idx];
        if binding.is_activated() {
            return Err(AnimatorError::DuplicateBinding { name });
        }
        binding.activate_with(clip.into_curve())?;
        self.animated.push(idx);
        Ok(name)
    }
}

fn unreadable(raw: serde_json::Value) -> AnimatorError {
    let property = raw
        .get("PropertyName")
        .and_then(|v| v.as_str())
        .unwrap_or("<unnamed>")
        .to_owned();
    // Re-run the typed decode to recover the reason.
    let reason = match serde_json::from_value::<ClipRecord>(raw) {
        Err(err) => err.to_string(),
        Ok(_) => "unrecognized clip".to_owned(),
    };
    AnimatorError::UnreadableClip { property, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::AnimationMode;
    use crate::config::AnimatorConfig;
    use crate::curve::CurveKind;
    use serde_json::json;

    #[derive(Default)]
    struct Scene {
        position: [f32; 3],
        n: i32,
    }

    fn animator() -> Animator<Scene> {
        let mut a = Animator::with_config(AnimatorConfig {
            enabled: true,
            ..AnimatorConfig::default()
        });
        a.register_field(
            "Position",
            CurveKind::Vector3,
            |s: &mut Scene| &mut s.position,
            [0.0, 0.0, -1.0],
        )
        .unwrap();
        a.register_field("N", CurveKind::FaceCount, |s: &mut Scene| &mut s.n, 3)
            .unwrap();
        a
    }

    #[test]
    fn save_then_load_restores_the_same_document() {
        let mut a = animator();
        a.activate_property_animation("N").unwrap();
        a.activate_property_animation("Position").unwrap();
        a.curve_typed_mut::<i32>("N").unwrap().set_time_window(1.0, 4.0);
        a.set_animation_mode(AnimationMode::PingPong);
        a.set_current_time(2.5);
        let saved = a.save();

        let mut b = animator();
        let report = b.load(saved.clone());
        assert!(report.is_clean());
        assert_eq!(report.activated, vec!["N", "Position"]);
        assert_eq!(b.save(), saved);
    }

    #[test]
    fn bad_clips_are_dropped_one_by_one() {
        let mut a = animator();
        a.activate_property_animation("N").unwrap();
        let doc: AnimatorDocument = serde_json::from_value(json!({
            "Enabled": true,
            "AnimationTime": 8.0,
            "CurrentTime": 3.0,
            "AnimationMode": "Loop",
            "AnimationClips": [
                { "Type": "Scalar", "PropertyName": "Texture", "StartTime": 0.0, "EndTime": 1.0,
                  "DefaultValue": 0.0, "States": [0.0, 1.0] },
                { "Type": "Color3", "PropertyName": "Position", "StartTime": 0.0, "EndTime": 1.0,
                  "DefaultValue": [1.0, 1.0, 1.0], "States": [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]] },
                { "Type": "FaceCount", "PropertyName": "N", "StartTime": 0.0, "EndTime": 2.0,
                  "DefaultValue": 3, "States": [3, 7] },
                { "Type": "FaceCount", "PropertyName": "N", "StartTime": 0.0, "EndTime": 2.0,
                  "DefaultValue": 3, "States": [3, 9] },
                { "Type": "Spline", "PropertyName": "Rotation" }
            ]
        }))
        .unwrap();

        let report = a.load(doc);
        assert_eq!(report.activated, vec!["N"]);
        assert_eq!(report.dropped.len(), 4);
        assert!(matches!(report.dropped[0], AnimatorError::UnknownProperty { .. }));
        assert!(matches!(report.dropped[1], AnimatorError::TypeMismatch { .. }));
        assert!(matches!(report.dropped[2], AnimatorError::DuplicateBinding { .. }));
        assert!(matches!(
            report.dropped[3],
            AnimatorError::UnreadableClip { ref property, .. } if property == "Rotation"
        ));

        // earlier activations were cleared; the first N clip won
        assert_eq!(a.animated_properties_count(), 1);
        assert_eq!(a.curve_typed::<i32>("N").unwrap().states(), &[3, 7]);
        assert_eq!(a.animation_time(), 8.0);
        assert_eq!(a.current_time(), 3.0);
        assert_eq!(a.animation_mode(), AnimationMode::Loop);
    }

    #[test]
    fn malformed_json_leaves_the_animator_untouched() {
        let mut a = animator();
        a.activate_property_animation("Position").unwrap();
        a.set_current_time(4.0);
        let err = a.load_json(r#"{ "AnimationClips": 12 }"#).unwrap_err();
        assert!(matches!(err, AnimatorError::DocumentMalformed { .. }));
        assert!(!err.is_recoverable());
        assert_eq!(a.animated_properties_count(), 1);
        assert_eq!(a.current_time(), 4.0);
    }

    #[test]
    fn to_json_uses_pascal_case_fields() {
        let a = animator();
        let v: serde_json::Value = serde_json::from_str(&a.to_json().unwrap()).unwrap();
        assert_eq!(v["AnimationMode"], json!("Once"));
        assert_eq!(v["AnimationTime"], json!(10.0));
        assert_eq!(v["AnimationClips"], json!([]));
    }
}

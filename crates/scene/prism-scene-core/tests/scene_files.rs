use std::path::PathBuf;

use prism_animator_core::{AnimationMode, AnimatorError, DiagnosticLevel};
use prism_scene_core::{RenderMode, SceneDocument, SceneError};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("prism-scene-{}-{name}", std::process::id()))
}

#[test]
fn ping_pong_fixture_animates_rotation_and_color() {
    let path = prism_test_fixtures::scenes::path("ping-pong-prism").expect("fixture path");
    let mut doc = SceneDocument::new_default().unwrap();
    let report = doc.load_from_file(&path).expect("load ping-pong-prism");

    assert!(report.is_clean());
    assert_eq!(report.activated, vec!["Rotation", "Prism color"]);
    let info: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Info)
        .collect();
    assert_eq!(info.len(), 1);
    assert!(info[0].message.starts_with("Scene loaded. Path - "));
    assert_eq!(doc.path(), Some(path.as_path()));

    assert_eq!(doc.scene().n(), 5);
    assert!(doc.scene().lighting);
    assert_eq!(doc.animator().animation_mode(), AnimationMode::PingPong);
    assert!(doc.is_driven("Rotation"));
    assert!(!doc.is_driven("Position"));

    // time scale 0.5: 2 s of frames move the timeline by 1 s
    doc.tick(2.0);
    approx(doc.animator().current_time(), 1.0, 1e-6);
    approx(doc.scene().rotation[1], 90.0, 1e-4);
    approx(doc.scene().prism_color[0], 0.5, 1e-6);
    approx(doc.scene().prism_color[2], 0.5, 1e-6);

    // bounce off the end and come back
    doc.tick(4.0);
    assert_eq!(doc.animator().current_time(), 2.0);
    assert_eq!(doc.animator().time_scale(), -1.0);
    doc.tick(1.0);
    approx(doc.animator().current_time(), 1.5, 1e-6);
}

#[test]
fn healing_fixture_repairs_the_scene_and_drops_unknown_clips() {
    let json = prism_test_fixtures::scenes::json("needs-healing").expect("fixture text");
    let mut doc = SceneDocument::new_default().unwrap();
    let report = doc.load_from_str(&json).unwrap();

    assert_eq!(doc.scene().n(), 3);
    assert_eq!(doc.scene().time_scale, 0.0);
    assert_eq!(doc.scene().render_mode, RenderMode::Wireframe);
    assert_eq!(doc.animator().animation_time(), 0.0);
    assert_eq!(doc.animator().current_time(), 0.0);

    assert_eq!(report.activated, vec!["Light diffuse color"]);
    assert_eq!(
        report.dropped,
        vec![AnimatorError::UnknownProperty {
            name: "Texture blend".into()
        }]
    );
    let curve = doc
        .animator()
        .curve_typed::<[f32; 4]>("Light diffuse color")
        .unwrap();
    assert_eq!((curve.start_time(), curve.end_time()), (3.0, 3.0));
    assert_eq!(curve.states_count(), 2);
}

#[test]
fn truncated_file_leaves_the_open_document_alone() {
    let mut doc = SceneDocument::new_default().unwrap();
    doc.scene_mut().set_n(7);
    doc.animator_mut().activate_property_animation("Scale").unwrap();

    let path = prism_test_fixtures::scenes::path("truncated").unwrap();
    let err = doc.load_from_file(&path).unwrap_err();
    assert!(matches!(err, SceneError::Json(_)));
    assert_eq!(doc.scene().n(), 7);
    assert_eq!(doc.animator().animated_properties_count(), 1);
    assert!(doc.path().is_none());

    let err = doc.load_from_file(scratch_file("missing.json")).unwrap_err();
    assert_eq!(err.category(), "io");
}

#[test]
fn every_scene_fixture_but_the_truncated_one_loads() {
    let mut names = prism_test_fixtures::scenes::keys();
    names.sort();
    assert_eq!(names, vec!["needs-healing", "ping-pong-prism", "truncated"]);

    for name in &names {
        let path = prism_test_fixtures::scenes::path(name).expect("fixture path");
        let mut doc = SceneDocument::new_default().unwrap();
        let loaded = doc.load_from_file(&path);
        if name == "truncated" {
            assert!(loaded.is_err());
            assert!(doc.path().is_none());
            continue;
        }
        loaded.unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(doc.path(), Some(path.as_path()));

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"Lightning\""), "{name}");
        let mut reloaded = SceneDocument::new_default().unwrap();
        let report = reloaded.load_from_str(&json).unwrap();
        assert!(report.is_clean(), "{name}: {:?}", report.dropped);
        assert_eq!(reloaded.scene(), doc.scene(), "{name}");
        assert_eq!(reloaded.animator().save(), doc.animator().save(), "{name}");
    }
}

#[test]
fn save_then_load_from_disk() {
    let path = scratch_file("round-trip.json");
    let mut doc = SceneDocument::new_default().unwrap();
    doc.scene_mut().set_n(12);
    doc.scene_mut().render_mode = RenderMode::Texture;
    doc.animator_mut().set_enabled(true);
    doc.animator_mut().activate_property_animation("Prism shininess").unwrap();
    doc.animator_mut()
        .curve_typed_mut::<f32>("Prism shininess")
        .unwrap()
        .set_state(1, 300.0);
    doc.save_to_file(&path).expect("save scene");
    assert_eq!(doc.path(), Some(path.as_path()));

    let mut loaded = SceneDocument::new_default().unwrap();
    let report = loaded.load_from_file(&path).expect("reload scene");
    std::fs::remove_file(&path).ok();

    assert!(report.is_clean());
    assert_eq!(loaded.scene(), doc.scene());
    assert_eq!(loaded.animator().save(), doc.animator().save());
    assert_eq!(
        loaded.animator().curve_typed::<f32>("Prism shininess").unwrap().states(),
        &[0.0, 128.0]
    );
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prism_animator_core::{AnimationMode, Animator, AnimatorConfig, CurveKind};

#[derive(Default)]
struct Rig {
    joints: Vec<[f32; 3]>,
    tint: [f32; 4],
}

fn rig_animator(joints: usize, states: usize) -> (Animator<Rig>, Rig) {
    let mut a = Animator::with_config(AnimatorConfig {
        animation_time: 5.0,
        mode: AnimationMode::PingPong,
        enabled: true,
        ..AnimatorConfig::default()
    });
    for i in 0..joints {
        let name = format!("Joint {i}");
        a.register_setter(
            name.clone(),
            CurveKind::Vector3,
            move |r: &mut Rig, v: [f32; 3]| r.joints[i] = v,
            [0.0; 3],
        )
        .unwrap();
        a.activate_property_animation(&name).unwrap();
        let c = a.curve_typed_mut::<[f32; 3]>(&name).unwrap();
        c.set_end_time(5.0);
        c.change_states_count(states);
        for s in 0..states {
            c.set_state(s, [s as f32, i as f32, 1.0]);
        }
    }
    a.register_field("Tint", CurveKind::Color4, |r: &mut Rig| &mut r.tint, [1.0; 4])
        .unwrap();
    a.activate_property_animation("Tint").unwrap();
    let rig = Rig {
        joints: vec![[0.0; 3]; joints],
        ..Rig::default()
    };
    (a, rig)
}

fn bench_update(c: &mut Criterion) {
    for (joints, states) in [(16, 2), (16, 8), (128, 4)] {
        let (mut animator, mut rig) = rig_animator(joints, states);
        c.bench_function(&format!("update_{joints}x{states}"), |b| {
            b.iter(|| animator.update(black_box(1.0 / 60.0), &mut rig))
        });
    }
}

criterion_group!(benches, bench_update);
criterion_main!(benches);

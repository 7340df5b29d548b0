use tween_machine_core::{
    config::TweenConfig,
    data::{AnimationCurve, Keyframe},
    engine::TweenEngine,
    memory::MemoryHost,
    outputs::TangentRule,
    request::TweenRequest,
    tangent::{TangentPair, TangentType},
};

fn load_blink() -> (MemoryHost, tween_machine_core::ids::CurveId, f64) {
    let json = tween_test_fixtures::curve_sets::json("stepped-blink").expect("stepped-blink fixture");
    let playhead = tween_test_fixtures::curve_sets::playhead("stepped-blink")
        .expect("stepped-blink entry")
        .expect("stepped-blink playhead");
    let mut host = MemoryHost::new();
    let ids = host.load_curve_set_json(&json).expect("parse stepped-blink");
    (host, ids[0], playhead)
}

#[test]
fn stepped_neighbours_step_out_and_leave_in_tangent_to_the_host() {
    let (mut host, blink, playhead) = load_blink();
    host.set_default_tangents(TangentPair::new(TangentType::Auto, TangentType::Auto));

    let report = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![blink], playhead, 0.0).unwrap())
        .unwrap();

    let planned = report.key_for(&blink).expect("blink keyed");
    assert_eq!(planned.rule, TangentRule::StepForward);
    assert_eq!(planned.in_tangent, TangentType::Step);
    assert_eq!(planned.out_tangent, TangentType::Step);
    assert!(!planned.writes_in_tangent());

    let k = host.curve(blink).unwrap().key_at(playhead).unwrap();
    assert_eq!(k.value, 0.5);
    assert_eq!(k.out_tangent, TangentType::Step);
    // The step in-tangent is never written explicitly; the host default stays.
    assert_eq!(k.in_tangent, TangentType::Auto);
}

#[test]
fn fixed_beats_step_forward() {
    let mut host = MemoryHost::new();
    host.set_default_tangents(TangentPair::new(TangentType::Spline, TangentType::Clamped));
    let c = host.add_curve(
        AnimationCurve::with_keys(
            "eye.blink",
            vec![
                Keyframe::new(0.0, 1.0, TangentType::Fixed, TangentType::Fixed),
                Keyframe::new(6.0, 0.0, TangentType::Step, TangentType::Step),
            ],
        )
        .unwrap(),
    );

    let report = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![c], 3.0, 0.0).unwrap())
        .unwrap();

    assert_eq!(report.key_for(&c).unwrap().rule, TangentRule::FixedFallback);
    let k = host.curve(c).unwrap().key_at(3.0).unwrap();
    assert_eq!(k.in_tangent, TangentType::Spline);
    assert_eq!(k.out_tangent, TangentType::Clamped);
}

#[test]
fn step_next_is_not_treated_as_step() {
    let mut host = MemoryHost::new();
    let c = host.add_curve(
        AnimationCurve::with_keys(
            "eye.blink",
            vec![
                Keyframe::new(0.0, 1.0, TangentType::Auto, TangentType::Linear),
                Keyframe::new(6.0, 0.0, TangentType::Flat, TangentType::StepNext),
            ],
        )
        .unwrap(),
    );

    TweenEngine::new(TweenConfig::default())
        .tween(&mut host, &TweenRequest::new(vec![c], 3.0, 0.0).unwrap())
        .unwrap();

    let k = host.curve(c).unwrap().key_at(3.0).unwrap();
    assert_eq!(k.in_tangent, TangentType::Linear);
    assert_eq!(k.out_tangent, TangentType::Flat);
}

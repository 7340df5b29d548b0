use std::panic::{catch_unwind, AssertUnwindSafe};

use tween_machine_core::{
    data::{AnimationCurve, Keyframe},
    engine::TweenEngine,
    error::{HostError, TweenError},
    host::{CurveAccess, Timeline},
    ids::CurveId,
    memory::{Fault, MemoryHost},
    request::TweenRequest,
    tangent::{TangentPair, TangentType},
};

fn linear_curve(name: &str, t0: f64, v0: f64, t1: f64, v1: f64) -> AnimationCurve {
    AnimationCurve::with_keys(
        name,
        vec![
            Keyframe::new(t0, v0, TangentType::Auto, TangentType::Linear),
            Keyframe::new(t1, v1, TangentType::Linear, TangentType::Auto),
        ],
    )
    .expect("valid curve")
}

/// Host whose key writes scrub the playhead to the keyed frame (as a real
/// animation package does when it evaluates the new key), and which can panic
/// mid-write.
struct ScrubbingHost {
    inner: MemoryHost,
    panic_on: Option<CurveId>,
}

impl CurveAccess for ScrubbingHost {
    type Curve = CurveId;

    fn find_bounding_keys(&self, curve: &CurveId, time: f64) -> Option<(f64, f64)> {
        self.inner.find_bounding_keys(curve, time)
    }

    fn read_tangents(&self, curve: &CurveId, time: f64) -> Result<TangentPair, HostError> {
        self.inner.read_tangents(curve, time)
    }

    fn read_value(&self, curve: &CurveId, time: f64) -> Result<f64, HostError> {
        self.inner.read_value(curve, time)
    }

    fn write_keyframe(
        &mut self,
        curve: &CurveId,
        time: f64,
        value: f64,
        out_tangent: TangentType,
    ) -> Result<(), HostError> {
        if self.panic_on == Some(*curve) {
            panic!("host crashed while keying {curve}");
        }
        self.inner.set_current_time(time);
        self.inner.write_keyframe(curve, time, value, out_tangent)
    }

    fn write_in_tangent(
        &mut self,
        curve: &CurveId,
        time: f64,
        in_tangent: TangentType,
    ) -> Result<(), HostError> {
        self.inner.write_in_tangent(curve, time, in_tangent)
    }

    fn global_default_tangents(&self) -> Result<TangentPair, HostError> {
        self.inner.global_default_tangents()
    }
}

impl Timeline for ScrubbingHost {
    fn current_time(&self) -> f64 {
        self.inner.current_time()
    }

    fn set_current_time(&mut self, time: f64) {
        self.inner.set_current_time(time)
    }

    fn begin_busy(&mut self) {
        self.inner.begin_busy()
    }

    fn end_busy(&mut self) {
        self.inner.end_busy()
    }
}

#[test]
fn successful_batch_restores_playhead_and_releases_busy() {
    let mut host = ScrubbingHost {
        inner: MemoryHost::new(),
        panic_on: None,
    };
    let a = host.inner.add_curve(linear_curve("a.tx", 0.0, 0.0, 24.0, 24.0));
    let b = host.inner.add_curve(linear_curve("a.ty", 0.0, 0.0, 24.0, 48.0));
    host.set_current_time(3.0);

    let report = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![a, b], 12.0, 0.0).unwrap())
        .unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(host.current_time(), 3.0);
    assert_eq!(host.inner.busy_depth(), 0);
    assert_eq!(host.inner.busy_acquisitions(), 1);
}

#[test]
fn skip_only_batch_still_restores() {
    let mut host = MemoryHost::new();
    let c = host.add_curve(linear_curve("a.tx", 0.0, 0.0, 10.0, 1.0));
    host.set_current_time(42.0);

    let report = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![c], 50.0, 0.0).unwrap())
        .unwrap();

    assert_eq!(report.skipped, vec![c]);
    assert_eq!(host.current_time(), 42.0);
    assert_eq!(host.busy_depth(), 0);
    assert_eq!(host.busy_acquisitions(), 1);
}

#[test]
fn read_failure_aborts_after_cleanup_and_keeps_earlier_keys() {
    let mut host = MemoryHost::new();
    let first = host.add_curve(linear_curve("a.tx", 0.0, 0.0, 10.0, 10.0));
    let broken = host.add_curve(linear_curve("a.ty", 0.0, 0.0, 10.0, 10.0));
    let last = host.add_curve(linear_curve("a.tz", 0.0, 0.0, 10.0, 10.0));
    host.inject_fault(broken, Fault::Read);
    host.set_current_time(7.0);

    let err = TweenEngine::default()
        .tween(
            &mut host,
            &TweenRequest::new(vec![first, broken, last], 5.0, 0.0).unwrap(),
        )
        .unwrap_err();

    assert!(matches!(err, TweenError::HostQuery { .. }), "got {err:?}");
    assert!(err.is_fatal());
    assert_eq!(host.current_time(), 7.0);
    assert_eq!(host.busy_depth(), 0);
    // No rollback of what was already written; nothing after the failure is touched.
    assert!(host.curve(first).unwrap().key_at(5.0).is_some());
    assert!(host.curve(broken).unwrap().key_at(5.0).is_none());
    assert!(host.curve(last).unwrap().key_at(5.0).is_none());
}

#[test]
fn default_tangent_query_failure_aborts_before_any_curve() {
    let mut host = MemoryHost::new();
    let a = host.add_curve(linear_curve("a.tx", 0.0, 0.0, 10.0, 10.0));
    let b = host.add_curve(linear_curve("a.ty", 0.0, 0.0, 10.0, 10.0));
    host.fail_default_tangents();
    host.set_current_time(2.0);

    let err = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![a, b], 5.0, 0.0).unwrap())
        .unwrap_err();

    match err {
        TweenError::HostQuery { ref source, .. } => {
            assert!(source.message.contains("default tangent"));
        }
        other => panic!("expected HostQuery, got {other:?}"),
    }
    assert_eq!(host.default_tangent_reads(), 1);
    assert_eq!(host.current_time(), 2.0);
    assert_eq!(host.busy_depth(), 0);
    assert_eq!(host.busy_acquisitions(), 1);
    for id in [a, b] {
        assert_eq!(host.curve(id).unwrap().len(), 2);
    }
}

#[test]
fn write_failure_propagates_as_host_write() {
    let mut host = MemoryHost::new();
    let c = host.add_curve(linear_curve("a.tx", 0.0, 0.0, 10.0, 10.0));
    host.inject_fault(c, Fault::Write);
    host.set_current_time(1.0);

    let err = TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![c], 5.0, 0.0).unwrap())
        .unwrap_err();

    match err {
        TweenError::HostWrite { time, ref source, .. } => {
            assert_eq!(time, 5.0);
            assert!(source.message.contains("write fault"));
        }
        other => panic!("expected HostWrite, got {other:?}"),
    }
    assert_eq!(host.current_time(), 1.0);
    assert_eq!(host.busy_depth(), 0);

    host.clear_faults();
    TweenEngine::default()
        .tween(&mut host, &TweenRequest::new(vec![c], 5.0, 0.0).unwrap())
        .unwrap();
    assert!(host.curve(c).unwrap().key_at(5.0).is_some());
}

#[test]
fn panic_inside_the_host_still_restores_the_playhead() {
    let mut host = ScrubbingHost {
        inner: MemoryHost::new(),
        panic_on: None,
    };
    let ok = host.inner.add_curve(linear_curve("a.tx", 0.0, 0.0, 10.0, 10.0));
    let crashing = host.inner.add_curve(linear_curve("a.ty", 0.0, 0.0, 10.0, 10.0));
    host.panic_on = Some(crashing);
    host.set_current_time(9.0);

    let eng = TweenEngine::default();
    let req = TweenRequest::new(vec![ok, crashing], 5.0, 0.0).unwrap();
    let result = catch_unwind(AssertUnwindSafe(|| eng.tween(&mut host, &req)));

    assert!(result.is_err());
    assert_eq!(host.current_time(), 9.0);
    assert_eq!(host.inner.busy_depth(), 0);
}

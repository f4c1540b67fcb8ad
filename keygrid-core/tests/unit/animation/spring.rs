use super::*;

fn run(s: &mut ScalarSpring, n: usize) {
    for _ in 0..n {
        s.update();
    }
}

#[test]
fn new_spring_is_at_rest_on_its_target() {
    let s = ScalarSpring::new(42.0, SpringParams::default());
    assert_eq!(s.get(), 42.0);
    assert_eq!(s.target(), 42.0);
    assert_eq!(s.velocity(), 0.0);
    assert!(s.is_settled(0.0));
}

#[test]
fn first_step_matches_update_rule() {
    let mut s = ScalarSpring::new(0.0, SpringParams::default());
    s.set_target(100.0);
    s.update();
    // force = 15, v = 15 * 0.75
    assert!((s.velocity() - 11.25).abs() < 1e-12);
    assert!((s.get() - 11.25).abs() < 1e-12);
}

#[test]
fn set_target_does_not_move_value() {
    let mut s = ScalarSpring::new(10.0, SpringParams::default());
    s.set_target(-500.0);
    assert_eq!(s.get(), 10.0);
    assert_eq!(s.velocity(), 0.0);
}

#[test]
fn converges_to_fixed_target() {
    let params = SpringParams::default();
    let mut s = ScalarSpring::new(250.0, params);
    s.set_target(175.0);
    run(&mut s, 400);
    assert!((s.get() - 175.0).abs() < 1e-6);
    assert!(s.is_settled(1e-6));
}

#[test]
fn error_envelope_shrinks_over_windows() {
    let mut s = ScalarSpring::new(0.0, SpringParams::default());
    s.set_target(1.0);
    let mut prev_window_max = f64::INFINITY;
    for _ in 0..20 {
        let mut window_max = 0.0f64;
        for _ in 0..10 {
            s.update();
            window_max = window_max.max((s.get() - 1.0).abs());
        }
        assert!(window_max <= prev_window_max + 1e-15);
        prev_window_max = window_max;
    }
    assert!(prev_window_max < 1e-6);
}

#[test]
fn value_may_overshoot_without_clamping() {
    let mut s = ScalarSpring::new(0.0, SpringParams::default());
    s.set_target(1.0);
    let mut max_seen = 0.0f64;
    for _ in 0..100 {
        s.update();
        max_seen = max_seen.max(s.get());
    }
    assert!(max_seen > 1.0);
    assert!(max_seen < 1.3);
}

#[test]
fn decay_factor_is_bounded_for_defaults() {
    let f = SpringParams::default().decay_factor();
    assert!(f > 0.0 && f < 1.0);
}

#[test]
fn params_deserialize_with_defaults() {
    let p: SpringParams = serde_json::from_str(r#"{"stiffness":0.3}"#).unwrap();
    assert_eq!(p.stiffness, 0.3);
    assert_eq!(p.damping, 0.75);
}

use super::*;
use crate::animation::spring::Animatable;

fn sim() -> Simulation {
    Simulation::new(2.0, 6.0, SpringParams::default(), 12, 9)
}

#[test]
fn same_seed_gives_same_run() {
    let mut a = sim();
    let mut b = sim();
    for _ in 0..30 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.grid().keys(), b.grid().keys());
    assert_eq!(a.frame(), 30);
}

#[test]
fn grid_inputs_rebuild_only_on_change() {
    let mut s = sim();
    let same = TargetInputs::new()
        .with(ParamKey::Rows, 2.0)
        .with(ParamKey::Cols, 6.0);
    assert!(!s.apply_inputs(&same, None));

    let taller = TargetInputs::new().with(ParamKey::Rows, 4.0);
    assert!(s.apply_inputs(&taller, None));
    assert_eq!(s.grid().count(), 24);

    let too_many = TargetInputs::new().with(ParamKey::Cols, 100.0);
    assert!(s.apply_inputs(&too_many, None));
    assert_eq!(s.grid().cols(), 24);
}

#[test]
fn key_inputs_target_only_the_selected_model() {
    let mut s = sim();
    let inputs = TargetInputs::new().with(ParamKey::ToothExtra, 20.0);
    s.apply_inputs(&inputs, Some(3));
    for (i, k) in s.grid().keys().iter().enumerate() {
        if i == 3 {
            assert_eq!(k.tooth_extra.target(), 20.0);
        } else {
            assert!(k.tooth_extra.target() <= 20.0);
        }
    }

    let before = s.grid().keys().to_vec();
    s.apply_inputs(&inputs.clone().with(ParamKey::HeadW, 100.0), None);
    assert_eq!(s.grid().keys(), before.as_slice());
}

#[test]
fn out_of_range_selection_is_clamped() {
    let mut s = sim();
    let inputs = TargetInputs::new().with(ParamKey::Roundness, 0.3);
    s.apply_inputs(&inputs, Some(1000));
    let last = s.grid().count() - 1;
    assert_eq!(s.grid().get(last).unwrap().roundness.target(), 0.3);
}

#[test]
fn inputs_are_clamped_to_slider_bounds() {
    let mut s = sim();
    let inputs = TargetInputs::new()
        .with(ParamKey::HeadH, 10_000.0)
        .with(ParamKey::ColorIndex, 7.7);
    s.apply_inputs(&inputs, Some(0));
    let k = s.grid().get(0).unwrap();
    assert_eq!(k.head_h.target(), 325.0);
    assert_eq!(k.color_idx.target(), 8.0);
}

#[test]
fn shaft_target_follows_head_target_every_tick() {
    let mut s = sim();
    let wide = TargetInputs::new()
        .with(ParamKey::HeadW, 300.0)
        .with(ParamKey::ShaftW, 110.0);
    s.step(&wide, Some(0));
    assert_eq!(s.grid().get(0).unwrap().shaft_w.target(), 110.0);

    let narrow = TargetInputs::new().with(ParamKey::HeadW, 150.0);
    s.step(&narrow, Some(0));
    assert_eq!(s.grid().get(0).unwrap().shaft_w.target(), 60.0);

    for k in s.grid().keys() {
        let hw = k.head_w.target();
        let sw = k.shaft_w.target();
        assert!(sw >= hw * 0.2 - 1e-9 && sw <= hw * 0.4 + 1e-9);
    }
}

#[test]
fn step_from_polls_the_source() {
    let mut s = sim();
    let mut source = TargetInputs::new().with(ParamKey::Cols, 7.0);
    assert!(s.step_from(&mut source, None));
    assert_eq!(s.grid().cols(), 7);
    assert!(!s.step_from(&mut source, None));
    assert_eq!(s.frame(), 2);
}

#[test]
fn randomize_all_keeps_values() {
    let mut s = sim();
    let values: Vec<f64> = s.grid().keys().iter().map(|k| k.head_w.get()).collect();
    s.randomize_all();
    let after: Vec<f64> = s.grid().keys().iter().map(|k| k.head_w.get()).collect();
    assert_eq!(values, after);
}

#[test]
fn apply_inputs_alone_keeps_shaft_inside_head_bounds() {
    let mut s = sim();
    let inputs = TargetInputs::new()
        .with(ParamKey::HeadW, 70.0)
        .with(ParamKey::ShaftW, 150.0);
    s.apply_inputs(&inputs, Some(3));

    let key = s.grid().get(3).unwrap();
    assert!((key.shaft_w.target() - 28.0).abs() < 1e-9);
    assert_eq!(
        key.targets().get(ParamKey::ShaftW),
        Some(key.shaft_w.target())
    );
    assert_eq!(s.frame(), 0);
}

#[test]
fn rebuild_batch_leaves_key_inputs_unapplied() {
    let mut edited = sim();
    let mut plain = sim();
    let resize = TargetInputs::new().with(ParamKey::Rows, 3.0);

    assert!(edited.apply_inputs(&resize.clone().with(ParamKey::Roundness, 0.3), Some(0)));
    assert!(plain.apply_inputs(&resize, Some(0)));
    assert_eq!(edited.grid().keys(), plain.grid().keys());
}

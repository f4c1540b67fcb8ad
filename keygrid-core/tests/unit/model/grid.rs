use super::*;
use crate::animation::spring::Animatable;

fn grid(rows: f64, cols: f64) -> (KeyGrid, Rng64) {
    let mut rng = Rng64::new(42);
    let g = KeyGrid::new(rows, cols, SpringParams::default(), 12, &mut rng);
    (g, rng)
}

#[test]
fn rebuild_9_by_22_has_198_keys() {
    let (g, _) = grid(9.0, 22.0);
    assert_eq!(g.rows(), 9);
    assert_eq!(g.cols(), 22);
    assert_eq!(g.count(), 198);
    assert_eq!(g.keys().len(), 198);
}

#[test]
fn dimensions_are_floored_and_clamped() {
    assert_eq!(normalize_dims(0.0, 2.0), (1, 6));
    assert_eq!(normalize_dims(3.9, 7.99), (3, 7));
    assert_eq!(normalize_dims(-4.0, -1.0), (1, 6));
    assert_eq!(normalize_dims(f64::NAN, f64::NAN), (1, 6));
    assert_eq!(normalize_dims(f64::INFINITY, 6.0), (1, 6));
    assert_eq!(normalize_dims(6.0, f64::NEG_INFINITY), (6, 6));
    assert_eq!(normalize_dims(1e30, 100_000.0), (MAX_DIM, MAX_DIM));

    let (mut g, mut rng) = grid(2.0, 6.0);
    for (r, c) in [(0.5, 3.0), (4.2, 9.7), (12.0, 24.0), (1.0, 6.0)] {
        g.rebuild(r, c, &mut rng);
        let (er, ec) = normalize_dims(r, c);
        assert_eq!(g.count(), er * ec);
        assert!(g.rows() >= 1 && g.cols() >= 6);
    }
}

#[test]
fn rebuild_discards_previous_state() {
    let (mut g, mut rng) = grid(2.0, 6.0);
    for k in g.keys_mut() {
        k.head_w.set_target(999.0);
    }
    g.rebuild(2.0, 6.0, &mut rng);
    assert!(g.keys().iter().all(|k| k.head_w.target() < 999.0));
}

#[test]
fn rebuild_randomizes_targets_within_constraints() {
    let (g, _) = grid(3.0, 8.0);
    for k in g.keys() {
        let hw = k.head_w.target();
        assert!((175.0..=325.0).contains(&hw));
        let sw = k.shaft_w.target();
        assert!(sw >= hw * 0.2 && sw <= hw * 0.4);
        assert_ne!(k.head_w.target(), k.head_w.get());
    }
}

#[test]
fn rows_are_contiguous_slices() {
    let (g, _) = grid(3.0, 7.0);
    assert_eq!(g.row(0).len(), 7);
    assert_eq!(g.row(2).len(), 7);
    assert!(g.row(3).is_empty());
    assert_eq!(g.index_of(1, 2), Some(9));
    assert_eq!(g.index_of(3, 0), None);
    assert_eq!(g.index_of(0, 7), None);
    assert_eq!(&g.row(1)[2], g.get(9).unwrap());
}

#[test]
fn selection_is_clamped_into_count() {
    assert_eq!(clamp_selection(Some(500), 198), Some(197));
    assert_eq!(clamp_selection(Some(3), 198), Some(3));
    assert_eq!(clamp_selection(None, 198), None);
    assert_eq!(clamp_selection(Some(0), 0), None);
}

#[test]
fn update_springs_moves_every_key() {
    let (mut g, _) = grid(1.0, 6.0);
    let before: Vec<f64> = g.keys().iter().map(|k| k.head_w.get()).collect();
    g.update_springs();
    for (k, b) in g.keys().iter().zip(before) {
        assert_ne!(k.head_w.get(), b);
    }
}

#[test]
fn infinite_or_huge_dimensions_build_a_bounded_grid() {
    let (g, mut rng) = grid(f64::INFINITY, 6.0);
    assert_eq!((g.rows(), g.cols()), (1, 6));

    let (mut g, _) = grid(2.0, 6.0);
    g.rebuild(1e12, 7.0, &mut rng);
    assert_eq!((g.rows(), g.cols()), (MAX_DIM, 7));
    assert_eq!(g.count(), MAX_DIM * 7);
}

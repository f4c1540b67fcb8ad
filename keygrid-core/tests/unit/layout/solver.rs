use super::*;
use crate::{animation::spring::SpringParams, foundation::math::Rng64};

#[test]
fn five_keys_of_200_in_1000_scale_exactly_one() {
    let row = solve_row([200.0; 5], 1000.0, 0.0, 15.0);
    assert_eq!(row.x_scale, 1.0);
    assert_eq!(row.slots[0].left, 0.0);
    assert_eq!(row.slots[0].center, 100.0);
    assert_eq!(row.slots[1].left, 215.0);
    assert_eq!(row.slots[4].left, 860.0);
}

#[test]
fn row_fill_is_exact_for_arbitrary_widths() {
    let mut rng = Rng64::new(17);
    for _ in 0..200 {
        let n = 6 + rng.index(19);
        let widths: Vec<f64> = (0..n).map(|_| rng.range(1.0, 400.0)).collect();
        let avail = rng.range(10.0, 5000.0);
        let gap = 15.0;
        let row = solve_row(widths.iter().copied(), avail, 15.0, gap);
        assert!((row.scaled_width_sum() - avail).abs() <= 1e-9 * avail);
        let expected_span = avail + gap * (n - 1) as f64;
        assert!((row.span() - expected_span).abs() <= 1e-9 * expected_span);
    }
}

#[test]
fn non_positive_sum_falls_back_to_unit_scale() {
    let row = solve_row([0.0, 0.0, 0.0], 500.0, 0.0, 5.0);
    assert_eq!(row.x_scale, 1.0);
    let row = solve_row([-10.0, 5.0], 500.0, 0.0, 5.0);
    assert_eq!(row.x_scale, 1.0);
    let row = solve_row(std::iter::empty::<f64>(), 500.0, 0.0, 5.0);
    assert_eq!(row.x_scale, 1.0);
    assert!(row.slots.is_empty());
    assert_eq!(row.span(), 0.0);
}

#[test]
fn config_derives_available_width_and_cell_height() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.available_width(1000.0, 6), 1000.0 - 30.0 - 75.0);
    assert_eq!(cfg.cell_height(330.0, 3), (330.0 - 30.0 - 20.0) / 3.0);
    assert_eq!(cfg.available_width(50.0, 24), 0.0);
    assert_eq!(cfg.row_top(2, 100.0), 15.0 + 220.0);
}

#[test]
fn resolve_grid_places_every_key_and_rows_fit_independently() {
    let mut rng = Rng64::new(4);
    let mut grid = KeyGrid::new(3.0, 8.0, SpringParams::default(), 12, &mut rng);
    for _ in 0..5 {
        grid.update_springs();
    }
    let canvas = Canvas {
        width: 1600,
        height: 900,
    };
    let cfg = LayoutConfig::default();
    let layout = resolve_grid(&grid, canvas, &cfg);
    assert_eq!(layout.placements.len(), grid.count());
    assert_eq!(layout.rows.len(), 3);

    for (i, p) in layout.placements.iter().enumerate() {
        assert_eq!(p.index, i);
        assert_eq!(p.row * 8 + p.col, i);
        assert_eq!(p.cell_h, layout.cell_h);
    }

    for row in &layout.rows {
        assert!((row.scaled_width_sum() - layout.available_width).abs() < 1e-6);
        let right = row.slots.last().unwrap();
        assert!((right.left + right.width - (1600.0 - cfg.margin_x)).abs() < 1e-6);
    }
    assert_ne!(layout.rows[0].x_scale, layout.rows[1].x_scale);
}

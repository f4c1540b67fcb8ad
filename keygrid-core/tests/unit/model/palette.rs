use super::*;

#[test]
fn reference_has_twelve_entries() {
    let p = Palette::reference();
    assert_eq!(p.len(), 12);
    assert_eq!(p.resolve(0.0), Rgb8::new(0, 122, 255));
    assert_eq!(p.resolve(11.0), Rgb8::new(188, 143, 143));
}

#[test]
fn resolve_rounds_to_nearest_neighbour() {
    let p = Palette::reference();
    assert_eq!(p.snap(2.49), 2);
    assert_eq!(p.snap(2.5), 3);
    assert_eq!(p.snap(2.51), 3);
    for step in 0..=100 {
        let idx = 4.0 + f64::from(step) / 100.0;
        let c = p.resolve(idx);
        assert!(c == p.colors()[4] || c == p.colors()[5]);
    }
}

#[test]
fn resolve_clamps_out_of_range() {
    let p = Palette::reference();
    assert_eq!(p.snap(-3.7), 0);
    assert_eq!(p.snap(11.6), 11);
    assert_eq!(p.snap(1e9), 11);
    assert_eq!(p.snap(f64::NAN), 0);
}

#[test]
fn empty_palette_is_rejected() {
    assert!(Palette::new(vec![]).is_err());
    assert!(serde_json::from_str::<Palette>("[]").is_err());
    let p: Palette = serde_json::from_str("[[1,2,3]]").unwrap();
    assert_eq!(p.len(), 1);
    assert_eq!(p.resolve(5.0), Rgb8::new(1, 2, 3));
}

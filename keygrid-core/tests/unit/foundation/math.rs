use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn range_stays_in_bounds() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.range(175.0, 325.0);
        assert!((175.0..325.0).contains(&v));
    }
    assert_eq!(rng.range(3.0, 3.0), 3.0);
    assert_eq!(rng.range(5.0, 1.0), 5.0);
}

#[test]
fn index_covers_domain() {
    let mut rng = Rng64::new(99);
    let mut seen = [false; 12];
    for _ in 0..2000 {
        let i = rng.index(12);
        assert!(i < 12);
        seen[i] = true;
    }
    assert!(seen.iter().all(|s| *s));
    assert_eq!(rng.index(0), 0);
}

//! Tick engine tests: placement, minor suppression and adaptive density.

use linegraph::ticks::{MAX_MAJOR_TICKS, MAX_TICKS, find_ticks, minor_ticks};
use linegraph::{TickDensity, TickWeight};
use rand_distr::{Distribution, Normal};

// ====================
// find_ticks
// ====================

#[test]
fn test_boundary_ticks_included() {
    assert_eq!(find_ticks(5.0, 0.0, 20.0), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
}

#[test]
fn test_range_is_widened_to_integers() {
    // [-3.2, 11.7] becomes [-4, 12].
    assert_eq!(find_ticks(5.0, -3.2, 11.7), vec![0.0, 5.0, 10.0]);
    assert_eq!(find_ticks(2.0, -3.2, 11.7), vec![
        -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0
    ]);
}

#[test]
fn test_degenerate_inputs_yield_nothing() {
    assert!(find_ticks(0.0, 0.0, 10.0).is_empty());
    assert!(find_ticks(-1.0, 0.0, 10.0).is_empty());
    assert!(find_ticks(1.0, 10.0, 0.0).is_empty());
    assert!(find_ticks(1.0, f64::NAN, 10.0).is_empty());
}

#[test]
fn test_tick_count_is_capped() {
    assert!(find_ticks(1e-12, 0.0, 1e6).is_empty());
    assert!(find_ticks(f64::MIN_POSITIVE, -1.0, 1.0).is_empty());

    let at_limit = find_ticks(1.0, 0.0, (MAX_TICKS - 1) as f64);
    assert_eq!(at_limit.len(), MAX_TICKS);
    assert!(find_ticks(1.0, 0.0, MAX_TICKS as f64).is_empty());
}

#[test]
fn test_ticks_ascending_multiples_within_range() {
    let mut rng = rand::rng();
    let normal = Normal::new(0.0f64, 10_000.0f64).unwrap();

    for _ in 0..500 {
        let a = normal.sample(&mut rng);
        let width = normal.sample(&mut rng).abs();
        let b = a + width;
        let density = TickDensity::for_extent(width);

        for step in [density.major, density.minor] {
            let ticks = find_ticks(step, a, b);
            for pair in ticks.windows(2) {
                assert!(pair[0] < pair[1], "not ascending: {:?}", pair);
            }
            for t in &ticks {
                assert!(*t >= a.floor() && *t <= b.ceil(), "{} outside [{}, {}]", t, a, b);
                let k = t / step;
                assert!((k - k.round()).abs() < 1e-9, "{} is not a multiple of {}", t, step);
            }
        }
    }
}

// ====================
// Minor suppression
// ====================

#[test]
fn test_minor_ticks_under_majors_suppressed() {
    let majors = find_ticks(5.0, 0.0, 10.0);
    assert_eq!(minor_ticks(1.0, &majors, 0.0, 10.0), vec![
        1.0, 2.0, 3.0, 4.0, 6.0, 7.0, 8.0, 9.0
    ]);
}

#[test]
fn test_suppression_uses_distance_threshold() {
    let minors = minor_ticks(1.0, &[5.00005], 0.0, 10.0);
    assert!(!minors.contains(&5.0));

    let minors = minor_ticks(1.0, &[5.001], 0.0, 10.0);
    assert!(minors.contains(&5.0));
}

#[test]
fn test_density_ticks_lists_majors_then_minors() {
    let ticks = TickDensity::default().ticks(0.0, 10.0);
    let majors: Vec<f64> = ticks
        .iter()
        .filter(|t| t.weight == TickWeight::Major)
        .map(|t| t.value)
        .collect();
    assert_eq!(majors, vec![0.0, 5.0, 10.0]);
    assert_eq!(ticks.len(), 3 + 8);
    assert!(ticks[..3].iter().all(|t| t.weight == TickWeight::Major));
}

// ====================
// Adaptive density
// ====================

#[test]
fn test_small_extent_keeps_initial_density() {
    assert_eq!(TickDensity::for_extent(100.0), TickDensity {
        major: 5.0,
        minor: 1.0
    });
    assert_eq!(TickDensity::for_extent(0.5), TickDensity::default());
}

#[test]
fn test_density_doubles_major_step() {
    assert_eq!(TickDensity::for_extent(101.0), TickDensity {
        major: 10.0,
        minor: 5.0
    });
    assert_eq!(TickDensity::for_extent(1000.0), TickDensity {
        major: 80.0,
        minor: 40.0
    });
}

#[test]
fn test_major_tick_count_is_bounded() {
    let mut rng = rand::rng();
    let normal = Normal::new(0.0f64, 1e7f64).unwrap();

    for _ in 0..1000 {
        let extent = normal.sample(&mut rng).abs();
        let density = TickDensity::for_extent(extent);
        assert!(extent / density.major <= MAX_MAJOR_TICKS);
        if density.major > 5.0 {
            assert_eq!(density.minor * 2.0, density.major);
        }
    }
}

//! Coordinate transform tests.
//!
//! Covers the screen <-> data mapping, its round-trip law, and agreement
//! between the pure functions and the composed `Transform` values.

use linegraph::{ChartError, GUTTER_PX, Point, Rect, Transform, Viewport};
use rand_distr::{Distribution, Normal};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn assert_point_close(actual: Point, expected: Point) {
    assert!(
        close(actual.x, expected.x) && close(actual.y, expected.y),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn viewport(x: f64, y: f64, w: f64, h: f64, ww: u32, wh: u32) -> Viewport {
    Viewport::new(Rect::new(x, y, w, h), ww, wh).unwrap()
}

// ====================
// Fixed scenarios
// ====================

#[test]
fn test_screen_to_data_reference_point() {
    let vp = viewport(0.0, 0.0, 100.0, 100.0, 800, 600);
    let p = vp.screen_to_data(Point::new(450.0, 350.0)).unwrap();

    // x: (450 - 50) * 100 / 800 = 50
    // y: ((600 - 350) - 50) * 100 / 600 = 33.33..
    assert!((p.x - 50.0).abs() < 1e-12);
    assert!((p.y - 100.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_data_origin_maps_to_gutter_corner() {
    let vp = viewport(-20.0, 5.0, 40.0, 10.0, 640, 480);
    let screen = vp.data_to_screen(Point::new(-20.0, 5.0)).unwrap();
    assert_point_close(screen, Point::new(GUTTER_PX, 480.0 - GUTTER_PX));
}

#[test]
fn test_zero_window_fails() {
    let vp = viewport(0.0, 0.0, 10.0, 10.0, 0, 300);
    assert_eq!(
        vp.screen_to_data(Point::new(1.0, 1.0)),
        Err(ChartError::ZeroWindow {
            width: 0,
            height: 300
        })
    );
    assert!(vp.data_to_screen(Point::new(1.0, 1.0)).is_err());
}

#[test]
fn test_invalid_extent_rejected() {
    let err = Viewport::new(Rect::new(0.0, 0.0, 0.0, 10.0), 100, 100).unwrap_err();
    assert!(matches!(err, ChartError::InvalidExtent { .. }));
    assert!(Viewport::new(Rect::new(0.0, 0.0, 10.0, f64::NAN), 100, 100).is_err());
}

// ====================
// Round-trip law
// ====================

#[test]
fn test_round_trip_random_points() {
    let mut rng = rand::rng();
    let coord = Normal::new(0.0f64, 1000.0f64).unwrap();
    let extent = Normal::new(0.0f64, 500.0f64).unwrap();

    let windows = [(1, 1), (800, 600), (1920, 1080), (333, 7)];
    for &(ww, wh) in &windows {
        for _ in 0..200 {
            let vp = viewport(
                coord.sample(&mut rng),
                coord.sample(&mut rng),
                extent.sample(&mut rng).abs() + 1e-3,
                extent.sample(&mut rng).abs() + 1e-3,
                ww,
                wh,
            );
            let p = Point::new(coord.sample(&mut rng), coord.sample(&mut rng));

            let there = vp.screen_to_data(p).unwrap();
            assert_point_close(vp.data_to_screen(there).unwrap(), p);

            let back = vp.data_to_screen(p).unwrap();
            assert_point_close(vp.screen_to_data(back).unwrap(), p);
        }
    }
}

// ====================
// Transform values
// ====================

#[test]
fn test_data_transform_agrees_with_data_to_screen() {
    let vp = viewport(10.0, -4.0, 25.0, 8.0, 800, 600);
    let t = Transform::data(&vp);

    for p in [
        Point::new(10.0, -4.0),
        Point::new(22.5, 0.0),
        Point::new(35.0, 4.0),
        Point::new(-3.0, 100.0),
    ] {
        let unit = t.apply(p);
        let from_transform = Point::new(unit.x * 800.0, 600.0 - unit.y * 600.0);
        assert_point_close(from_transform, vp.data_to_screen(p).unwrap());
    }
}

#[test]
fn test_pixel_transform_maps_window_to_unit_square() {
    let vp = viewport(0.0, 0.0, 1.0, 1.0, 400, 200);
    let t = Transform::pixels(&vp);
    assert_point_close(t.apply(Point::new(400.0, 200.0)), Point::new(1.0, 1.0));
    assert_point_close(t.apply(Point::new(200.0, 50.0)), Point::new(0.5, 0.25));
}

#[test]
fn test_then_applies_inner_first() {
    let t = Transform::scale(2.0, 2.0).then(Transform::translate(1.0, 0.0));
    assert_point_close(t.apply(Point::new(1.0, 1.0)), Point::new(4.0, 2.0));

    let inv = t.inverse();
    assert_point_close(inv.apply(Point::new(4.0, 2.0)), Point::new(1.0, 1.0));
}

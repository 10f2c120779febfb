//! Property tests for the workspace transform.

use polygon_workspace::geometry::Point;
use polygon_workspace::state::{Axis, ScaleLimits, Viewport};
use proptest::prelude::*;

fn limits() -> ScaleLimits {
    ScaleLimits { min: 0.2, max: 10.0 }
}

fn viewport() -> impl Strategy<Value = Viewport> {
    (-5_000.0..5_000.0f64, -5_000.0..5_000.0f64, 0.2..10.0f64)
        .prop_map(|(x, y, s)| Viewport::new(x, y, s))
}

fn point() -> impl Strategy<Value = Point> {
    (-5_000.0..5_000.0f64, -5_000.0..5_000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn screen_world_round_trip(vp in viewport(), p in point()) {
        let back = vp.world_to_screen(vp.screen_to_world(p));
        prop_assert!(back.distance_to(p) < 1e-6);
    }

    #[test]
    fn wheel_zoom_pins_world_point_under_cursor(vp in viewport(), cursor in point(), delta in -2_000.0..2_000.0f64) {
        let mut after = vp;
        after.wheel_zoom(cursor, delta, 0.001, &limits());
        let before_world = vp.screen_to_world(cursor);
        let after_world = after.screen_to_world(cursor);
        prop_assert!(before_world.distance_to(after_world) < 1e-6);
    }

    #[test]
    fn scale_stays_clamped(deltas in prop::collection::vec(-5_000.0..5_000.0f64, 1..200)) {
        let mut vp = Viewport::IDENTITY;
        for d in deltas {
            vp.wheel_zoom(Point::new(100.0, 100.0), d, 0.001, &limits());
            prop_assert!(vp.scale >= 0.2 && vp.scale <= 10.0);
        }
    }

    #[test]
    fn ruler_spacing_is_readable(vp in viewport(), extent in 50.0..3_000.0f64) {
        let step = vp.ruler_step(50.0);
        prop_assert!([50.0, 100.0, 200.0, 400.0].contains(&step));
        prop_assert!(step * vp.scale >= 10.0);
        let ticks = vp.ruler_ticks(Axis::X, extent, 50.0);
        prop_assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            prop_assert!(pair[1].screen - pair[0].screen >= 10.0 - 1e-9);
        }
        let scaled = step * vp.scale;
        for t in &ticks {
            prop_assert!(t.screen >= -scaled && t.screen <= extent + scaled);
        }
    }
}

#[test]
fn ten_thousand_zoom_out_ticks_hit_min_scale() {
    let mut vp = Viewport::IDENTITY;
    for _ in 0..10_000 {
        vp.wheel_zoom(Point::new(320.0, 240.0), 100.0, 0.001, &limits());
    }
    assert_eq!(vp.scale, 0.2);
}

#[test]
fn button_zoom_around_centre_keeps_centre() {
    let mut vp = Viewport::new(15.0, -40.0, 1.0);
    let centre = Point::new(400.0, 300.0);
    let world = vp.screen_to_world(centre);
    vp.zoom_by_factor(centre, 1.25, &limits());
    assert!((vp.scale - 1.25).abs() < 1e-12);
    assert!(vp.screen_to_world(centre).distance_to(world) < 1e-9);
}

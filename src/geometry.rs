//! Polygon generation and bounding boxes.
//! Randomness is passed in as a `FnMut() -> f64` returning values in [0, 1)
//! so callers in the browser use `js_sys::Math::random` and tests use fixed sequences.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const MIN_VERTICES: u32 = 3;
pub const MAX_VERTICES: u32 = 10;
pub const MIN_RADIUS: u32 = 40;
pub const MAX_RADIUS: u32 = 80;
/// Upper bound of the random angle added to every vertex.
pub const ANGLE_JITTER: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned box. Width and height may be zero for degenerate inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Grows the box by `pad` on every side.
    pub fn padded(&self, pad: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    /// `viewBox` attribute value for an `<svg>` framing this box.
    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

pub fn bounding_box(points: &[Point]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    BoundingBox {
        min_x,
        min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Integer uniformly drawn from `min..=max`.
pub fn random_int_with(rng: &mut impl FnMut() -> f64, min: u32, max: u32) -> u32 {
    let span = f64::from(max.saturating_sub(min) + 1);
    // Guard against sources that return exactly 1.0.
    let pick = ((rng() * span).floor() as u32).min(max - min);
    min + pick
}

pub fn random_color_with(rng: &mut impl FnMut() -> f64) -> String {
    let hue = (rng() * 360.0).floor() as u32 % 360;
    format!("hsl({hue}, 70%, 60%)")
}

/// Star-ish polygon around the origin. May self-intersect.
pub fn generate_polygon_with(rng: &mut impl FnMut() -> f64) -> (Vec<Point>, BoundingBox) {
    let vertex_count = random_int_with(rng, MIN_VERTICES, MAX_VERTICES);
    let radius = f64::from(random_int_with(rng, MIN_RADIUS, MAX_RADIUS));
    let step = (PI * 2.0) / f64::from(vertex_count);
    let points: Vec<Point> = (0..vertex_count)
        .map(|i| {
            let angle = step * f64::from(i) + rng() * ANGLE_JITTER;
            let r = radius * (0.2 + rng());
            Point::new(r * angle.cos(), r * angle.sin())
        })
        .collect();
    let bbox = bounding_box(&points);
    (points, bbox)
}

pub fn js_random() -> f64 {
    js_sys::Math::random()
}

/// SVG `points` attribute: `x1,y1 x2,y2 ...`.
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inverse of [`format_points`]. Pairs that do not parse are skipped.
pub fn parse_points(raw: &str) -> Vec<Point> {
    raw.split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0;
        move || {
            let v = values[i % values.len()];
            i += 1;
            v
        }
    }

    #[test]
    fn bounding_box_reduces_min_max() {
        let pts = [Point::new(-3.0, 4.0), Point::new(5.0, -2.0), Point::new(1.0, 1.0)];
        let b = bounding_box(&pts);
        assert_eq!(b.min_x, -3.0);
        assert_eq!(b.min_y, -2.0);
        assert_eq!(b.width, 8.0);
        assert_eq!(b.height, 6.0);
    }

    #[test]
    fn degenerate_boxes_are_zero_sized() {
        let single = bounding_box(&[Point::new(2.0, 7.0)]);
        assert_eq!((single.width, single.height), (0.0, 0.0));
        assert_eq!((single.min_x, single.min_y), (2.0, 7.0));

        let dup = bounding_box(&[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]);
        assert_eq!((dup.width, dup.height), (0.0, 0.0));

        assert_eq!(bounding_box(&[]), BoundingBox::default());
    }

    #[test]
    fn padded_box_grows_each_side() {
        let b = BoundingBox { min_x: 0.0, min_y: 10.0, width: 20.0, height: 5.0 }.padded(5.0);
        assert_eq!(b.view_box(), "-5 5 30 15");
    }

    #[test]
    fn random_int_covers_inclusive_range() {
        assert_eq!(random_int_with(&mut || 0.0, 3, 10), 3);
        assert_eq!(random_int_with(&mut || 0.999_999, 3, 10), 10);
        assert_eq!(random_int_with(&mut || 1.0, 3, 10), 10);
    }

    #[test]
    fn generated_polygon_respects_ranges() {
        let values = [0.0, 0.5, 0.3, 0.9, 0.1, 0.7, 0.42];
        for start in 0..values.len() {
            let mut rotated = values.to_vec();
            rotated.rotate_left(start);
            let (points, bbox) = generate_polygon_with(&mut sequence(&rotated));
            assert!(points.len() >= MIN_VERTICES as usize);
            assert!(points.len() <= MAX_VERTICES as usize);
            for p in &points {
                let r = p.distance_to(Point::ORIGIN);
                assert!(r <= f64::from(MAX_RADIUS) * 1.2 + 1e-9);
            }
            assert_eq!(bbox, bounding_box(&points));
        }
    }

    #[test]
    fn first_vertex_lies_on_positive_x_axis_without_jitter() {
        // count pick, radius pick, then (jitter, radius factor) per vertex
        let (points, _) = generate_polygon_with(&mut sequence(&[0.0, 0.0, 0.0, 0.8]));
        assert_eq!(points.len(), 3);
        assert!((points[0].x - 40.0).abs() < 1e-9);
        assert!(points[0].y.abs() < 1e-9);
    }

    #[test]
    fn points_string_round_trips_and_skips_garbage() {
        let pts = vec![Point::new(1.5, -2.0), Point::new(0.0, 3.25)];
        let s = format_points(&pts);
        assert_eq!(s, "1.5,-2 0,3.25");
        assert_eq!(parse_points(&s), pts);
        assert_eq!(parse_points("1,2 nope 3,x 4,5"), vec![Point::new(1.0, 2.0), Point::new(4.0, 5.0)]);
    }

    #[test]
    fn random_color_is_hsl() {
        assert_eq!(random_color_with(&mut || 0.5), "hsl(180, 70%, 60%)");
    }
}

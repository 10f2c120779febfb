//! Pan/zoom transform of the workspace and the visual aids derived from it.
//!
//! Every point inside the content group is drawn at
//! `screen = world * scale + offset`. Grid and rulers are pure functions of the
//! same triple so they stay aligned with the content after any update.

use crate::config::WorkspaceConfig;
use crate::geometry::Point;
use crate::util::fmt_num;

/// Largest pan offset kept, in screen pixels. Stored transforms beyond it are
/// pulled back so ruler and grid math stays in exact f64 range.
pub const MAX_OFFSET: f64 = 1e6;
/// Upper bound on ticks produced for one ruler.
pub const MAX_RULER_TICKS: usize = 1000;

fn bound_offset(v: f64) -> f64 {
    if v.is_finite() { v.clamp(-MAX_OFFSET, MAX_OFFSET) } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl ScaleLimits {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl From<&WorkspaceConfig> for ScaleLimits {
    fn from(cfg: &WorkspaceConfig) -> Self {
        Self {
            min: cfg.min_scale,
            max: cfg.max_scale,
        }
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        (&WorkspaceConfig::default()).into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    pub const IDENTITY: Viewport = Viewport {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            scale,
        }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    /// Screen-space delta to world-space delta.
    pub fn screen_delta_to_world(&self, dx: f64, dy: f64) -> Point {
        Point::new(dx / self.scale, dy / self.scale)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x = bound_offset(self.offset_x + dx);
        self.offset_y = bound_offset(self.offset_y + dy);
    }

    /// Sets a new scale while keeping the world point under `pivot` fixed on screen.
    pub fn zoom_to(&mut self, pivot: Point, scale: f64, limits: &ScaleLimits) {
        let world = self.screen_to_world(pivot);
        self.scale = limits.clamp(scale);
        self.offset_x = pivot.x - world.x * self.scale;
        self.offset_y = pivot.y - world.y * self.scale;
    }

    /// Wheel zoom: scale moves linearly with `delta_y`, anchored at the pointer.
    pub fn wheel_zoom(&mut self, pointer: Point, delta_y: f64, sensitivity: f64, limits: &ScaleLimits) {
        let target = self.scale - delta_y * sensitivity;
        self.zoom_to(pointer, target, limits);
    }

    pub fn zoom_by_factor(&mut self, pivot: Point, factor: f64, limits: &ScaleLimits) {
        let target = self.scale * factor;
        self.zoom_to(pivot, target, limits);
    }

    /// Re-applies the limits, e.g. after restoring a stored transform.
    pub fn clamped(mut self, limits: &ScaleLimits) -> Self {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            self.scale = 1.0;
        }
        self.scale = limits.clamp(self.scale);
        self.offset_x = bound_offset(self.offset_x);
        self.offset_y = bound_offset(self.offset_y);
        self
    }

    /// `transform` attribute of the content group.
    pub fn transform_attr(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            fmt_num(self.offset_x),
            fmt_num(self.offset_y),
            fmt_num(self.scale)
        )
    }

    pub fn grid(&self, base_size: f64) -> GridPattern {
        let factor = if self.scale >= 0.5 { 2.5 } else { 5.0 };
        let cell = base_size * self.scale * factor;
        GridPattern {
            cell,
            x: self.offset_x % cell,
            y: self.offset_y % cell,
        }
    }

    /// World-unit distance between ruler labels for the current scale.
    pub fn ruler_step(&self, base_step: f64) -> f64 {
        let scaled = base_step * self.scale;
        if scaled > 50.0 {
            base_step
        } else if scaled > 25.0 {
            base_step * 2.0
        } else if scaled > 10.0 {
            base_step * 4.0
        } else {
            base_step * 8.0
        }
    }

    /// Ticks for one ruler. `extent` is the visible length of that axis in pixels.
    pub fn ruler_ticks(&self, axis: Axis, extent: f64, base_step: f64) -> Vec<RulerTick> {
        let step = self.ruler_step(base_step);
        let scaled_step = step * self.scale;
        if !(scaled_step > 0.0 && scaled_step.is_finite() && extent.is_finite()) {
            return Vec::new();
        }
        let offset = match axis {
            Axis::X => self.offset_x,
            Axis::Y => self.offset_y,
        };
        let first = (-offset / self.scale / step).floor() * step;
        let first_screen = first * self.scale + offset;
        let limit = extent + scaled_step;
        let count = ((limit - first_screen) / scaled_step).ceil();
        if !(count > 0.0) {
            return Vec::new();
        }
        let count = if count.is_finite() { (count as usize).min(MAX_RULER_TICKS) } else { MAX_RULER_TICKS };

        // Multiply instead of accumulating so long rulers do not drift.
        (0..count)
            .filter_map(|i| {
                let world = first + step * i as f64;
                let screen = world * self.scale + offset;
                (screen >= -scaled_step && screen < limit).then(|| RulerTick {
                    screen,
                    label: world.round() as i64,
                })
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Attributes of the repeating grid `<pattern>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPattern {
    pub cell: f64,
    pub x: f64,
    pub y: f64,
}

impl GridPattern {
    pub fn path(&self) -> String {
        let c = fmt_num(self.cell);
        format!("M {c} 0 L 0 0 0 {c}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerTick {
    /// Pixel position along the ruler.
    pub screen: f64,
    pub label: i64,
}

// Pointer gesture classification for the workspace.
// The coordinator only decides what a gesture means; the caller applies the
// returned effect to the board and owns the window listeners.

use crate::geometry::Point;
use crate::state::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDrag {
    pub id: String,
    /// Shape offset when the drag started (world units).
    pub origin: Point,
    /// Pointer position when the drag started (screen pixels).
    pub start: Point,
    /// Last offset handed out. Its y is held while hovering the tray.
    pub current: Point,
}

impl ShapeDrag {
    /// Offset for `pointer` under the viewport as it is now, so a zoom in the
    /// middle of a drag changes the rate immediately.
    fn offset_for(&self, pointer: Point, viewport: &Viewport) -> Point {
        let delta = viewport.screen_delta_to_world(pointer.x - self.start.x, pointer.y - self.start.y);
        self.origin.offset(delta.x, delta.y)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        last: Point,
    },
    DraggingShape(ShapeDrag),
    /// A workspace shape dragged over the tray; release hands it back.
    TrayHover(ShapeDrag),
}

/// What the pointer went down on.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerTarget {
    Shape { id: String, offset: Point },
    Canvas,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GestureEffect {
    None,
    Pan { dx: f64, dy: f64 },
    MoveShape { id: String, offset: Point },
    ReturnToTray { id: String },
}

#[derive(Debug, Default)]
pub struct DragCoordinator {
    gesture: Gesture,
}

impl DragCoordinator {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Starts a gesture. Returns false when one is already running, in which
    /// case nothing changes and the caller must not attach new listeners.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.gesture = match target {
            PointerTarget::Shape { id, offset } => Gesture::DraggingShape(ShapeDrag {
                id,
                origin: offset,
                start: pointer,
                current: offset,
            }),
            PointerTarget::Canvas => Gesture::Panning { last: pointer },
        };
        true
    }

    /// `viewport` is the live transform; shape drags divide by its scale.
    /// Over the tray a dragged shape keeps following the pointer horizontally
    /// while its vertical offset stays where it was.
    pub fn pointer_move(&mut self, pointer: Point, over_tray: bool, viewport: &Viewport) -> GestureEffect {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => GestureEffect::None,
            Gesture::Panning { last } => {
                self.gesture = Gesture::Panning { last: pointer };
                GestureEffect::Pan {
                    dx: pointer.x - last.x,
                    dy: pointer.y - last.y,
                }
            }
            Gesture::DraggingShape(mut drag) | Gesture::TrayHover(mut drag) => {
                let mut offset = drag.offset_for(pointer, viewport);
                if over_tray {
                    offset.y = drag.current.y;
                }
                drag.current = offset;
                let id = drag.id.clone();
                self.gesture = if over_tray {
                    Gesture::TrayHover(drag)
                } else {
                    Gesture::DraggingShape(drag)
                };
                GestureEffect::MoveShape { id, offset }
            }
        }
    }

    /// Ends the gesture. Safe to call any number of times.
    pub fn pointer_up(&mut self) -> GestureEffect {
        match std::mem::take(&mut self.gesture) {
            Gesture::TrayHover(drag) => GestureEffect::ReturnToTray { id: drag.id },
            _ => GestureEffect::None,
        }
    }

    /// Drops the gesture without applying anything (window blur, unmount).
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

/// Enter/leave depth of a native drop target. Child elements fire their own
/// enter/leave pairs, so only the 0 boundary toggles the highlight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropTarget {
    depth: u32,
}

impl DropTarget {
    /// Returns true when the target just became active.
    pub fn enter(&mut self) -> bool {
        self.depth += 1;
        self.depth == 1
    }

    /// Returns true when the target just became inactive.
    pub fn leave(&mut self) -> bool {
        match self.depth {
            0 => false,
            1 => {
                self.depth = 0;
                true
            }
            _ => {
                self.depth -= 1;
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::IDENTITY;

    fn grab(c: &mut DragCoordinator, offset: Point, at: Point) {
        assert!(c.pointer_down(PointerTarget::Shape { id: "s".into(), offset }, at));
    }

    #[test]
    fn pan_uses_incremental_deltas() {
        let mut c = DragCoordinator::default();
        assert!(c.pointer_down(PointerTarget::Canvas, Point::new(10.0, 10.0)));
        assert_eq!(c.pointer_move(Point::new(15.0, 12.0), false, &VP), GestureEffect::Pan { dx: 5.0, dy: 2.0 });
        assert_eq!(c.pointer_move(Point::new(16.0, 12.0), false, &VP), GestureEffect::Pan { dx: 1.0, dy: 0.0 });
        assert_eq!(c.pointer_up(), GestureEffect::None);
        assert!(c.is_idle());
        assert_eq!(c.pointer_move(Point::new(50.0, 50.0), false, &VP), GestureEffect::None);
    }

    #[test]
    fn shape_drag_divides_by_scale() {
        let mut c = DragCoordinator::default();
        grab(&mut c, Point::new(100.0, 100.0), Point::ORIGIN);
        let vp = Viewport::new(0.0, 0.0, 2.0);
        assert_eq!(
            c.pointer_move(Point::new(20.0, -10.0), false, &vp),
            GestureEffect::MoveShape { id: "s".into(), offset: Point::new(110.0, 95.0) }
        );
    }

    #[test]
    fn zoom_during_drag_uses_new_scale() {
        let mut c = DragCoordinator::default();
        grab(&mut c, Point::ORIGIN, Point::ORIGIN);
        let mut vp = Viewport::IDENTITY;
        vp.zoom_by_factor(Point::ORIGIN, 2.0, &crate::state::ScaleLimits::default());
        let effect = c.pointer_move(Point::new(100.0, 0.0), false, &vp);
        let GestureEffect::MoveShape { offset, .. } = effect else {
            panic!("unexpected {effect:?}");
        };
        assert_eq!(offset, Point::new(50.0, 0.0));
        // The grabbed point is back under the pointer.
        assert_eq!(vp.world_to_screen(offset), Point::new(100.0, 0.0));
    }

    #[test]
    fn tray_hover_holds_y_and_release_returns_shape() {
        let mut c = DragCoordinator::default();
        grab(&mut c, Point::ORIGIN, Point::ORIGIN);
        c.pointer_move(Point::new(4.0, 4.0), false, &VP);
        assert_eq!(
            c.pointer_move(Point::new(9.0, -40.0), true, &VP),
            GestureEffect::MoveShape { id: "s".into(), offset: Point::new(9.0, 4.0) }
        );
        match c.gesture() {
            Gesture::TrayHover(drag) => assert_eq!(drag.current, Point::new(9.0, 4.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(c.pointer_up(), GestureEffect::ReturnToTray { id: "s".into() });
        assert_eq!(c.pointer_up(), GestureEffect::None);
    }

    #[test]
    fn leaving_tray_resumes_drag() {
        let mut c = DragCoordinator::default();
        grab(&mut c, Point::ORIGIN, Point::ORIGIN);
        c.pointer_move(Point::new(0.0, -50.0), true, &VP);
        assert_eq!(
            c.pointer_move(Point::new(3.0, 3.0), false, &VP),
            GestureEffect::MoveShape { id: "s".into(), offset: Point::new(3.0, 3.0) }
        );
        assert_eq!(c.pointer_up(), GestureEffect::None);
    }

    #[test]
    fn second_pointer_down_is_rejected() {
        let mut c = DragCoordinator::default();
        assert!(c.pointer_down(PointerTarget::Canvas, Point::ORIGIN));
        assert!(!c.pointer_down(PointerTarget::Shape { id: "s".into(), offset: Point::ORIGIN }, Point::ORIGIN));
        assert!(matches!(c.gesture(), Gesture::Panning { .. }));
        c.cancel();
        assert!(c.is_idle());
    }

    #[test]
    fn drop_target_toggles_only_at_zero() {
        let mut t = DropTarget::default();
        assert!(t.enter());
        assert!(!t.enter());
        assert!(!t.leave());
        assert!(t.leave());
        assert!(!t.leave());
        t.enter();
        t.enter();
        t.reset();
        assert!(t.enter());
    }
}

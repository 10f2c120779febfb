pub mod gesture;
pub mod viewport;

pub use gesture::{DragCoordinator, DropTarget, Gesture, GestureEffect, PointerTarget, ShapeDrag};
pub use viewport::{Axis, GridPattern, RulerTick, ScaleLimits, Viewport};

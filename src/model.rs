//! Shapes and the board that owns them.
//! A shape lives in exactly one container; transfers go through [`Board::attach_to`].

use std::rc::Rc;

use yew::Reducible;

use crate::config::WorkspaceConfig;
use crate::geometry::{self, BoundingBox, Point};
use crate::state::viewport::{ScaleLimits, Viewport};
use crate::util::{clog, fmt_num};

pub const ID_PREFIX: &str = "polygon-";
pub const DEFAULT_FILL: &str = "rgb(145 0 35)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    Tray,
    Workspace,
}

/// Drag payload. Carries nothing but the shape id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragToken(String);

impl DragToken {
    pub const MIME: &'static str = "text/plain";

    pub fn from_payload(raw: &str) -> Option<Self> {
        let id = raw.trim();
        (!id.is_empty()).then(|| Self(id.to_string()))
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn into_id(self) -> String {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: String,
    /// Local coordinates around the shape's own origin.
    pub points: Vec<Point>,
    pub fill: String,
    /// World translation while on the workspace; `None` in the tray.
    pub placement: Option<Point>,
}

impl Shape {
    pub fn new_id() -> String {
        format!("{ID_PREFIX}{}", uuid::Uuid::new_v4())
    }

    pub fn create_with(rng: &mut impl FnMut() -> f64) -> Shape {
        let (points, _) = geometry::generate_polygon_with(rng);
        Shape {
            id: Self::new_id(),
            points,
            fill: geometry::random_color_with(rng),
            placement: None,
        }
    }

    pub fn create() -> Shape {
        Self::create_with(&mut geometry::js_random)
    }

    pub fn bbox(&self) -> BoundingBox {
        geometry::bounding_box(&self.points)
    }

    /// Box the tray `<svg>` is sized to.
    pub fn frame(&self, padding: f64) -> BoundingBox {
        self.bbox().padded(padding)
    }

    pub fn begin_drag(&self) -> DragToken {
        DragToken(self.id.clone())
    }

    pub fn offset(&self) -> Point {
        self.placement.unwrap_or(Point::ORIGIN)
    }

    pub fn points_attr(&self) -> String {
        geometry::format_points(&self.points)
    }

    pub fn transform_attr(&self) -> Option<String> {
        self.placement
            .map(|p| format!("translate({},{})", fmt_num(p.x), fmt_num(p.y)))
    }

    fn attach(&mut self, target: Container, at: Option<Point>) {
        self.placement = match target {
            Container::Workspace => Some(at.unwrap_or(Point::ORIGIN)),
            Container::Tray => None,
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub tray: Vec<Shape>,
    /// Paint order: later entries are drawn on top.
    pub workspace: Vec<Shape>,
    pub viewport: Viewport,
    pub config: Rc<WorkspaceConfig>,
}

impl Board {
    pub fn new(config: Rc<WorkspaceConfig>) -> Self {
        Self {
            tray: Vec::new(),
            workspace: Vec::new(),
            viewport: Viewport::IDENTITY,
            config,
        }
    }

    pub fn limits(&self) -> ScaleLimits {
        ScaleLimits::from(self.config.as_ref())
    }

    pub fn locate(&self, id: &str) -> Option<(Container, usize)> {
        if let Some(i) = self.tray.iter().position(|s| s.id == id) {
            return Some((Container::Tray, i));
        }
        self.workspace
            .iter()
            .position(|s| s.id == id)
            .map(|i| (Container::Workspace, i))
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.locate(id).map(|(c, i)| &self.container(c)[i])
    }

    pub fn container(&self, which: Container) -> &Vec<Shape> {
        match which {
            Container::Tray => &self.tray,
            Container::Workspace => &self.workspace,
        }
    }

    fn container_mut(&mut self, which: Container) -> &mut Vec<Shape> {
        match which {
            Container::Tray => &mut self.tray,
            Container::Workspace => &mut self.workspace,
        }
    }

    /// Moves the shape to the end of `target`. `at` is the world position used
    /// when entering the workspace. Unknown ids leave the board untouched.
    pub fn attach_to(&mut self, id: &str, target: Container, at: Option<Point>) -> bool {
        let Some((source, idx)) = self.locate(id) else {
            return false;
        };
        let mut shape = self.container_mut(source).remove(idx);
        shape.attach(target, at);
        self.container_mut(target).push(shape);
        true
    }

    pub fn move_shape(&mut self, id: &str, offset: Point) -> bool {
        match self.workspace.iter_mut().find(|s| s.id == id) {
            Some(shape) => {
                shape.placement = Some(offset);
                true
            }
            None => false,
        }
    }
}

pub enum BoardAction {
    /// Replaces the tray contents.
    FillTray { shapes: Vec<Shape> },
    /// Native drop on the workspace at a screen position relative to it.
    DropOnWorkspace { id: String, screen: Point },
    ReturnToTray { id: String },
    MoveShape { id: String, offset: Point },
    Pan { dx: f64, dy: f64 },
    WheelZoom { pointer: Point, delta_y: f64 },
    ZoomBy { pivot: Point, factor: f64 },
    ResetView,
    Restore { viewport: Viewport, shapes: Vec<Shape> },
    ClearWorkspace,
}

impl Reducible for Board {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use BoardAction::*;
        let mut new = (*self).clone();
        match action {
            FillTray { shapes } => {
                new.tray = shapes;
            }
            DropOnWorkspace { id, screen } => {
                let world = new.viewport.screen_to_world(screen);
                if !new.attach_to(&id, Container::Workspace, Some(world)) {
                    clog(&format!("drop ignored, no shape {id}"));
                    return self;
                }
            }
            ReturnToTray { id } => {
                if !new.attach_to(&id, Container::Tray, None) {
                    return self;
                }
            }
            MoveShape { id, offset } => {
                if !new.move_shape(&id, offset) {
                    return self;
                }
            }
            Pan { dx, dy } => new.viewport.pan_by(dx, dy),
            WheelZoom { pointer, delta_y } => {
                let limits = new.limits();
                let sensitivity = new.config.wheel_sensitivity;
                new.viewport.wheel_zoom(pointer, delta_y, sensitivity, &limits);
            }
            ZoomBy { pivot, factor } => {
                let limits = new.limits();
                new.viewport.zoom_by_factor(pivot, factor, &limits);
            }
            ResetView => new.viewport = Viewport::IDENTITY,
            Restore { viewport, shapes } => {
                new.viewport = viewport.clamped(&new.limits());
                new.workspace = shapes;
                let ids: Vec<String> = new.workspace.iter().map(|s| s.id.clone()).collect();
                new.tray.retain(|s| !ids.contains(&s.id));
            }
            ClearWorkspace => new.workspace.clear(),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: &str) -> Shape {
        Shape {
            id: id.to_string(),
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)],
            fill: DEFAULT_FILL.to_string(),
            placement: None,
        }
    }

    fn board_with_tray(ids: &[&str]) -> Rc<Board> {
        let board = Rc::new(Board::new(Rc::new(WorkspaceConfig::default())));
        board.reduce(BoardAction::FillTray {
            shapes: ids.iter().map(|id| shape(id)).collect(),
        })
    }

    #[test]
    fn drop_at_scale_two_divides_screen_position() {
        let board = board_with_tray(&["a"]);
        let board = board.reduce(BoardAction::ZoomBy { pivot: Point::ORIGIN, factor: 2.0 });
        assert_eq!(board.viewport, Viewport::new(0.0, 0.0, 2.0));
        let board = board.reduce(BoardAction::DropOnWorkspace {
            id: "a".into(),
            screen: Point::new(100.0, 50.0),
        });
        assert!(board.tray.is_empty());
        assert_eq!(board.workspace[0].transform_attr().as_deref(), Some("translate(50,25)"));
    }

    #[test]
    fn stale_drop_is_a_noop() {
        let board = board_with_tray(&["a"]);
        let after = board.clone().reduce(BoardAction::DropOnWorkspace {
            id: "missing".into(),
            screen: Point::new(1.0, 1.0),
        });
        assert!(Rc::ptr_eq(&board, &after));
        let after = board.clone().reduce(BoardAction::ReturnToTray { id: "missing".into() });
        assert!(Rc::ptr_eq(&board, &after));
    }

    #[test]
    fn returning_to_tray_clears_placement_and_keeps_id() {
        let board = board_with_tray(&["a", "b"]);
        let board = board.reduce(BoardAction::DropOnWorkspace { id: "a".into(), screen: Point::new(5.0, 5.0) });
        let board = board.reduce(BoardAction::ReturnToTray { id: "a".into() });
        assert!(board.workspace.is_empty());
        let ids: Vec<&str> = board.tray.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(board.tray[1].placement, None);
        assert_eq!(board.tray[1].transform_attr(), None);
    }

    #[test]
    fn shape_is_owned_by_one_container() {
        let mut board = Board::new(Rc::new(WorkspaceConfig::default()));
        board.tray.push(shape("x"));
        assert!(board.attach_to("x", Container::Workspace, Some(Point::new(1.0, 2.0))));
        assert!(board.attach_to("x", Container::Workspace, Some(Point::new(3.0, 4.0))));
        assert_eq!(board.tray.len() + board.workspace.len(), 1);
        assert_eq!(board.locate("x"), Some((Container::Workspace, 0)));
        assert_eq!(board.shape("x").map(Shape::offset), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn redrop_moves_shape_to_top() {
        let board = board_with_tray(&["a", "b"]);
        let board = board.reduce(BoardAction::DropOnWorkspace { id: "a".into(), screen: Point::ORIGIN });
        let board = board.reduce(BoardAction::DropOnWorkspace { id: "b".into(), screen: Point::ORIGIN });
        let board = board.reduce(BoardAction::DropOnWorkspace { id: "a".into(), screen: Point::ORIGIN });
        let ids: Vec<&str> = board.workspace.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn move_shape_only_touches_workspace() {
        let board = board_with_tray(&["a"]);
        let same = board.clone().reduce(BoardAction::MoveShape { id: "a".into(), offset: Point::new(1.0, 1.0) });
        assert!(Rc::ptr_eq(&board, &same));
        let board = board.reduce(BoardAction::DropOnWorkspace { id: "a".into(), screen: Point::ORIGIN });
        let board = board.reduce(BoardAction::MoveShape { id: "a".into(), offset: Point::new(7.0, -2.0) });
        assert_eq!(board.workspace[0].offset(), Point::new(7.0, -2.0));
    }

    #[test]
    fn restore_clamps_and_removes_tray_duplicates() {
        let board = board_with_tray(&["a", "b"]);
        let mut restored = shape("a");
        restored.placement = Some(Point::new(1.0, 1.0));
        let board = board.reduce(BoardAction::Restore {
            viewport: Viewport::new(3.0, 4.0, 99.0),
            shapes: vec![restored],
        });
        assert_eq!(board.viewport, Viewport::new(3.0, 4.0, 10.0));
        assert_eq!(board.tray.len(), 1);
        assert_eq!(board.workspace.len(), 1);
    }

    #[test]
    fn created_shapes_get_prefixed_unique_ids() {
        let mut r = 0.3;
        let mut rng = move || {
            r = (r + 0.17) % 1.0;
            r
        };
        let a = Shape::create_with(&mut rng);
        let b = Shape::create_with(&mut rng);
        assert!(a.id.starts_with(ID_PREFIX));
        assert_ne!(a.id, b.id);
        assert!(a.placement.is_none());
        assert!(a.fill.starts_with("hsl("));
    }

    #[test]
    fn drag_token_rejects_blank_payload() {
        assert_eq!(DragToken::from_payload("  "), None);
        let token = shape("abc").begin_drag();
        assert_eq!(DragToken::from_payload(" abc "), Some(token.clone()));
        assert_eq!(token.id(), "abc");
    }

    #[test]
    fn frame_adds_padding() {
        let f = shape("a").frame(5.0);
        assert_eq!(f.view_box(), "-5 -5 20 20");
    }
}

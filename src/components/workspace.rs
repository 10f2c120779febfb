use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use super::ruler::{Ruler, RULER_THICKNESS};
use crate::geometry::Point;
use crate::model::{Board, BoardAction, DragToken};
use crate::state::viewport::{Axis, Viewport};
use crate::state::{DragCoordinator, DropTarget, GestureEffect, PointerTarget};
use crate::util::clog;

type GestureListeners = Rc<RefCell<Option<Vec<EventListener>>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct WorkspaceProps {
    pub board: UseReducerHandle<Board>,
    pub tray_ref: NodeRef,
}

/// Pointer position relative to the top-left corner of `el`.
fn local_point(el: &Element, client_x: i32, client_y: i32) -> Point {
    let rect = el.get_bounding_client_rect();
    Point::new(f64::from(client_x) - rect.x(), f64::from(client_y) - rect.y())
}

fn contains_client(node: &NodeRef, client: Point) -> bool {
    node.cast::<Element>().is_some_and(|el| {
        let r = el.get_bounding_client_rect();
        client.x >= r.left() && client.x <= r.right() && client.y >= r.top() && client.y <= r.bottom()
    })
}

fn measure(node: &NodeRef) -> Option<(f64, f64)> {
    node.cast::<HtmlElement>()
        .map(|el| (f64::from(el.client_width()), f64::from(el.client_height())))
}

fn apply_effect(board: &UseReducerHandle<Board>, effect: GestureEffect) {
    match effect {
        GestureEffect::None => {}
        GestureEffect::Pan { dx, dy } => board.dispatch(BoardAction::Pan { dx, dy }),
        GestureEffect::MoveShape { id, offset } => board.dispatch(BoardAction::MoveShape { id, offset }),
        GestureEffect::ReturnToTray { id } => {
            clog(&format!("shape {id} returned to tray"));
            board.dispatch(BoardAction::ReturnToTray { id });
        }
    }
}

/// Pannable, zoomable drawing surface with grid and rulers.
#[function_component(Workspace)]
pub fn workspace(props: &WorkspaceProps) -> Html {
    let workplace_ref = use_node_ref();
    let coordinator = use_mut_ref(DragCoordinator::default);
    let gesture_listeners: GestureListeners = use_mut_ref(|| None);
    let drop_target = use_mut_ref(DropTarget::default);
    let drop_active = use_state(|| false);
    let size = use_state(|| (0.0_f64, 0.0_f64));
    // Window listeners outlive this render; they read the transform from here.
    let live_viewport = use_mut_ref(|| Viewport::IDENTITY);
    *live_viewport.borrow_mut() = props.board.viewport;

    // Mount: measure, wheel zoom, resize. Gesture listeners are dropped on unmount too.
    {
        let workplace_ref = workplace_ref.clone();
        let board = props.board.clone();
        let size = size.clone();
        let coordinator = coordinator.clone();
        let gesture_listeners = gesture_listeners.clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            if let Some(dims) = measure(&workplace_ref) {
                size.set(dims);
            }
            if let (Some(window), Some(el)) = (web_sys::window(), workplace_ref.cast::<Element>()) {
                let wheel = {
                    let target = el.clone();
                    let board = board.clone();
                    // Non-passive so the page does not scroll while zooming.
                    let options = EventListenerOptions::enable_prevent_default();
                    EventListener::new_with_options(&el, "wheel", options, move |event| {
                        let Some(e) = event.dyn_ref::<web_sys::WheelEvent>() else {
                            return;
                        };
                        e.prevent_default();
                        let pointer = local_point(&target, e.client_x(), e.client_y());
                        board.dispatch(BoardAction::WheelZoom {
                            pointer,
                            delta_y: e.delta_y(),
                        });
                    })
                };
                let resize = {
                    let workplace_ref = workplace_ref.clone();
                    let size = size.clone();
                    EventListener::new(&window, "resize", move |_| {
                        if let Some(dims) = measure(&workplace_ref) {
                            size.set(dims);
                        }
                    })
                };
                listeners.push(wheel);
                listeners.push(resize);
            } else {
                clog("workspace mounted without a window or element");
            }
            move || {
                drop(listeners);
                coordinator.borrow_mut().cancel();
                gesture_listeners.borrow_mut().take();
            }
        });
    }

    let onmousedown = {
        let board = props.board.clone();
        let tray_ref = props.tray_ref.clone();
        let coordinator = coordinator.clone();
        let gesture_listeners = gesture_listeners.clone();
        let live_viewport = live_viewport.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            let shape_id = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-id"));
            let target = match shape_id.and_then(|id| board.shape(&id).map(|s| (id, s.offset()))) {
                Some((id, offset)) => PointerTarget::Shape { id, offset },
                None => PointerTarget::Canvas,
            };
            let pointer = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
            if !coordinator.borrow_mut().pointer_down(target, pointer) {
                return;
            }
            e.prevent_default();
            let Some(window) = web_sys::window() else {
                coordinator.borrow_mut().cancel();
                return;
            };

            let on_move = {
                let board = board.clone();
                let tray_ref = tray_ref.clone();
                let coordinator = coordinator.clone();
                let live_viewport = live_viewport.clone();
                EventListener::new(&window, "mousemove", move |event| {
                    let Some(e) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let client = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
                    let over_tray = contains_client(&tray_ref, client);
                    let viewport = *live_viewport.borrow();
                    let effect = coordinator.borrow_mut().pointer_move(client, over_tray, &viewport);
                    apply_effect(&board, effect);
                })
            };
            let release = {
                let board = board.clone();
                let coordinator = coordinator.clone();
                let gesture_listeners = gesture_listeners.clone();
                move || {
                    let effect = coordinator.borrow_mut().pointer_up();
                    apply_effect(&board, effect);
                    // Detaching twice is harmless: the slot is already empty.
                    gesture_listeners.borrow_mut().take();
                }
            };
            let on_up = {
                let release = release.clone();
                EventListener::new(&window, "mouseup", move |_| release())
            };
            let on_blur = EventListener::new(&window, "blur", move |_| release());
            *gesture_listeners.borrow_mut() = Some(vec![on_move, on_up, on_blur]);
        })
    };

    let ondragenter = {
        let drop_target = drop_target.clone();
        let drop_active = drop_active.clone();
        Callback::from(move |_e: DragEvent| {
            if drop_target.borrow_mut().enter() {
                drop_active.set(true);
            }
        })
    };
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondragleave = {
        let drop_target = drop_target.clone();
        let drop_active = drop_active.clone();
        Callback::from(move |_e: DragEvent| {
            if drop_target.borrow_mut().leave() {
                drop_active.set(false);
            }
        })
    };
    let ondrop = {
        let drop_target = drop_target.clone();
        let drop_active = drop_active.clone();
        let board = props.board.clone();
        let workplace_ref = workplace_ref.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drop_target.borrow_mut().reset();
            drop_active.set(false);
            let Some(token) = e
                .data_transfer()
                .and_then(|dt| dt.get_data(DragToken::MIME).ok())
                .and_then(|raw| DragToken::from_payload(&raw))
            else {
                return;
            };
            let Some(el) = workplace_ref.cast::<Element>() else {
                return;
            };
            let screen = local_point(&el, e.client_x(), e.client_y());
            board.dispatch(BoardAction::DropOnWorkspace {
                id: token.into_id(),
                screen,
            });
        })
    };

    let zoom_cb = |factor_of: fn(f64) -> f64| {
        let board = props.board.clone();
        let size = size.clone();
        Callback::from(move |_: ()| {
            let (w, h) = *size;
            board.dispatch(BoardAction::ZoomBy {
                pivot: Point::new(w / 2.0, h / 2.0),
                factor: factor_of(board.config.button_zoom_factor),
            });
        })
    };
    let on_zoom_in = zoom_cb(|f| f);
    let on_zoom_out = zoom_cb(|f| 1.0 / f);
    let on_reset = {
        let board = props.board.clone();
        Callback::from(move |_: ()| board.dispatch(BoardAction::ResetView))
    };

    let board = &*props.board;
    let viewport = board.viewport;
    let (width, height) = *size;
    let base_step = board.config.ruler_base_step;
    let ticks_x = viewport.ruler_ticks(Axis::X, width, base_step);
    let ticks_y = viewport.ruler_ticks(Axis::Y, height, base_step);
    let grid = viewport.grid(board.config.grid_size);
    let outline = if *drop_active { "inset 0 0 0 2px #58a6ff" } else { "none" };

    html! {
        <div class="workspace-root" style="position:relative; flex:1; overflow:hidden; color:#8b949e;">
            <div class="ruler ruler-corner" style={format!("position:absolute; left:0; top:0; width:{t}px; height:{t}px; background:#161b22; z-index:2;", t = RULER_THICKNESS)}></div>
            <Ruler axis={Axis::X} ticks={ticks_x} />
            <Ruler axis={Axis::Y} ticks={ticks_y} />
            <div ref={workplace_ref} class={classes!("workplace", (*drop_active).then_some("dragenter"))}
                {onmousedown} {ondragenter} {ondragover} {ondragleave} {ondrop}
                style={format!("position:absolute; left:{t}px; top:{t}px; right:0; bottom:0; overflow:hidden; cursor:grab; box-shadow:{outline};", t = RULER_THICKNESS)}>
                <svg class="grid-pattern" width="100%" height="100%" style="position:absolute; left:0; top:0; pointer-events:none;">
                    <defs>
                        <pattern id="grid" patternUnits="userSpaceOnUse"
                            width={grid.cell.to_string()} height={grid.cell.to_string()}
                            x={grid.x.to_string()} y={grid.y.to_string()}>
                            <path d={grid.path()} fill="none" stroke="currentColor" stroke-width="1" opacity="0.3" />
                        </pattern>
                    </defs>
                    <rect width="100%" height="100%" fill="url(#grid)" />
                </svg>
                <svg class="content-svg" width="100%" height="100%" style="position:absolute; left:0; top:0;">
                    <g id="workplace-content" transform={viewport.transform_attr()}>
                        { for board.workspace.iter().map(|shape| html! {
                            <polygon key={shape.id.clone()} class="draggable" data-id={shape.id.clone()}
                                points={shape.points_attr()} fill={shape.fill.clone()}
                                transform={shape.transform_attr()}
                                stroke="currentColor" stroke-width="2" style="cursor:move;" />
                        }) }
                    </g>
                </svg>
                <CameraControls scale={viewport.scale} {on_zoom_in} {on_zoom_out} {on_reset} />
            </div>
        </div>
    }
}

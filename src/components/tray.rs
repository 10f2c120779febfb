use yew::prelude::*;

use super::polygon_item::PolygonItem;
use crate::model::{DragToken, Shape};
use crate::state::DropTarget;

#[derive(Properties, PartialEq, Clone)]
pub struct TrayProps {
    pub shapes: Vec<Shape>,
    pub padding: f64,
    /// Lets the workspace hit-test the tray during pointer drags.
    pub node_ref: NodeRef,
    pub on_drop: Callback<String>,
}

#[function_component(Tray)]
pub fn tray(props: &TrayProps) -> Html {
    let target = use_mut_ref(DropTarget::default);
    let active = use_state(|| false);

    let ondragenter = {
        let target = target.clone();
        let active = active.clone();
        Callback::from(move |_e: DragEvent| {
            if target.borrow_mut().enter() {
                active.set(true);
            }
        })
    };
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondragleave = {
        let target = target.clone();
        let active = active.clone();
        Callback::from(move |_e: DragEvent| {
            if target.borrow_mut().leave() {
                active.set(false);
            }
        })
    };
    let ondrop = {
        let target = target.clone();
        let active = active.clone();
        let on_drop = props.on_drop.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            target.borrow_mut().reset();
            active.set(false);
            let payload = e
                .data_transfer()
                .and_then(|dt| dt.get_data(DragToken::MIME).ok())
                .and_then(|raw| DragToken::from_payload(&raw));
            if let Some(token) = payload {
                on_drop.emit(token.into_id());
            }
        })
    };

    let border = if *active { "#58a6ff" } else { "#30363d" };
    html! {
        <div ref={props.node_ref.clone()} class={classes!("buffer", (*active).then_some("dragenter"))}
            {ondragenter} {ondragover} {ondragleave} {ondrop}
            style={format!("min-height:120px; max-height:30vh; overflow:auto; padding:6px; border-bottom:2px solid {border};")}>
            { if props.shapes.is_empty() {
                html! { <div style="opacity:0.6; padding:8px; font-size:12px;">{"Press \"Create polygons\" to fill the tray."}</div> }
            } else {
                html! { <>{ for props.shapes.iter().map(|shape| html! {
                    <PolygonItem key={shape.id.clone()} shape={shape.clone()} padding={props.padding} />
                }) }</> }
            } }
        </div>
    }
}

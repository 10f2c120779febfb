use yew::prelude::*;

use crate::model::{DragToken, Shape};
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct PolygonItemProps {
    pub shape: Shape,
    pub padding: f64,
}

/// Tray entry: the polygon framed by an `<svg>` sized to its padded bounding box.
#[function_component(PolygonItem)]
pub fn polygon_item(props: &PolygonItemProps) -> Html {
    let frame = props.shape.frame(props.padding);
    let ondragstart = {
        let token = props.shape.begin_drag();
        Callback::from(move |e: DragEvent| {
            if let Some(dt) = e.data_transfer() {
                if let Err(err) = dt.set_data(DragToken::MIME, token.id()) {
                    cwarn(&format!("could not set drag payload for {}: {err:?}", token.id()));
                }
                dt.set_effect_allowed("move");
            }
        })
    };
    html! {
        <div id={props.shape.id.clone()} class="polygon-item draggable" draggable="true" {ondragstart}
            style="display:inline-block; margin:4px; cursor:grab;">
            <svg width={frame.width.to_string()} height={frame.height.to_string()} viewBox={frame.view_box()}>
                <polygon points={props.shape.points_attr()} fill={props.shape.fill.clone()}
                    stroke="currentColor" stroke-width="2" />
            </svg>
        </div>
    }
}

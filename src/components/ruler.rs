use yew::prelude::*;

use crate::state::viewport::{Axis, RulerTick};

pub const RULER_THICKNESS: f64 = 20.0;

#[derive(Properties, PartialEq, Clone)]
pub struct RulerProps {
    pub axis: Axis,
    pub ticks: Vec<RulerTick>,
}

#[function_component(Ruler)]
pub fn ruler(props: &RulerProps) -> Html {
    let (class, frame) = match props.axis {
        Axis::X => (
            "ruler ruler-x",
            format!("position:absolute; left:{t}px; top:0; right:0; height:{t}px;", t = RULER_THICKNESS),
        ),
        Axis::Y => (
            "ruler ruler-y",
            format!("position:absolute; left:0; top:{t}px; bottom:0; width:{t}px;", t = RULER_THICKNESS),
        ),
    };
    let ticks = props.ticks.iter().map(|tick| {
        let (tick_style, label_style) = match props.axis {
            Axis::X => (
                format!("position:absolute; left:{}px; bottom:0; width:1px; height:6px; background:currentColor;", tick.screen),
                format!("position:absolute; left:{}px; top:1px; padding-left:2px; font-size:9px;", tick.screen),
            ),
            Axis::Y => (
                format!("position:absolute; top:{}px; right:0; height:1px; width:6px; background:currentColor;", tick.screen),
                format!("position:absolute; top:{}px; left:1px; padding-top:2px; font-size:9px; writing-mode:vertical-rl;", tick.screen),
            ),
        };
        html! {
            <>
                <div class="ruler-tick" style={tick_style}></div>
                <div class="ruler-label" style={label_style}>{ tick.label }</div>
            </>
        }
    });
    html! {
        <div class={class} style={format!("{frame} overflow:hidden; background:#161b22; z-index:2; pointer-events:none;")}>
            { for ticks }
        </div>
    }
}

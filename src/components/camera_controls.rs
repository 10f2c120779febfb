use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub scale: f64,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rc = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Stop mousedown so clicking a button does not start a pan underneath.
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());
    html! {<div onmousedown={swallow} style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center; z-index:3;">
        <button onclick={zo}> {"-"} </button>
        <span style="min-width:48px; text-align:center; font-size:12px;">{ format!("{:.0}%", props.scale * 100.0) }</span>
        <button onclick={zi}> {"+"} </button>
        <span style="width:8px;"></span>
        <button onclick={rc}> {"Reset view"} </button>
    </div>}
}

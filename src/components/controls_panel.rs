use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_create: Callback<()>,
    pub on_save: Callback<()>,
    pub on_clear: Callback<()>,
    pub tray_count: usize,
    pub workspace_count: usize,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let create_cb = {
        let cb = props.on_create.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let save_cb = {
        let cb = props.on_save.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let clear_cb = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div id="top-bar" style="display:flex; align-items:center; gap:8px; padding:6px 12px; background:rgba(22,27,34,0.9); border-bottom:1px solid #30363d;">
        <button id="create-polygons" onclick={create_cb}>{"Create polygons"}</button>
        <button onclick={save_cb}>{"Save"}</button>
        <button onclick={clear_cb}>{"Clear workspace"}</button>
        <span style="font-size:11px; opacity:0.7; margin-left:auto;">
            { format!("tray: {}  workspace: {}", props.tray_count, props.workspace_count) }
        </span>
    </div>}
}

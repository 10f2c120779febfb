use super::{controls_panel::ControlsPanel, tray::Tray, workspace::Workspace};
use crate::config::WorkspaceConfig;
use crate::geometry::{js_random, random_int_with};
use crate::model::{Board, BoardAction, Shape};
use crate::persist::{self, Snapshot};
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| WorkspaceConfig::load());
    let board = {
        let config = config.clone();
        use_reducer(move || Board::new(config))
    };
    let tray_ref = use_node_ref();

    // Restore the saved workspace
    {
        let board = board.clone();
        let key = config.snapshot_key.clone();
        use_effect_with((), move |_| {
            match persist::load(&key) {
                Ok(Some(snapshot)) => {
                    let viewport = snapshot.viewport();
                    let shapes = snapshot.into_shapes();
                    clog(&format!("restored {} shapes from {key}", shapes.len()));
                    board.dispatch(BoardAction::Restore { viewport, shapes });
                }
                Ok(None) => {}
                Err(err) => cwarn(&format!("could not restore workspace: {err}")),
            }
            || ()
        });
    }

    let on_create = {
        let board = board.clone();
        let config = config.clone();
        Callback::from(move |_| {
            let count = random_int_with(&mut js_random, config.tray_min, config.tray_max);
            let shapes: Vec<Shape> = (0..count).map(|_| Shape::create()).collect();
            board.dispatch(BoardAction::FillTray { shapes });
        })
    };
    let on_save = {
        let board = board.clone();
        let key = config.snapshot_key.clone();
        Callback::from(move |_| {
            let snapshot = Snapshot::capture(&board);
            match persist::save(&key, &snapshot) {
                Ok(()) => clog(&format!("saved {} shapes", snapshot.polygons.len())),
                Err(err) => cwarn(&format!("could not save workspace: {err}")),
            }
        })
    };
    let on_clear = {
        let board = board.clone();
        let key = config.snapshot_key.clone();
        Callback::from(move |_| {
            board.dispatch(BoardAction::ClearWorkspace);
            if let Err(err) = persist::clear(&key) {
                cwarn(&format!("could not clear stored workspace: {err}"));
            }
        })
    };
    let on_tray_drop = {
        let board = board.clone();
        Callback::from(move |id: String| board.dispatch(BoardAction::ReturnToTray { id }))
    };

    html! {
        <div id="root" style="display:flex; flex-direction:column; width:100vw; height:100vh; background:#0e1116; color:#c9d1d9; user-select:none;">
            <ControlsPanel {on_create} {on_save} {on_clear}
                tray_count={board.tray.len()} workspace_count={board.workspace.len()} />
            <Tray shapes={board.tray.clone()} padding={config.shape_padding}
                node_ref={tray_ref.clone()} on_drop={on_tray_drop} />
            <Workspace board={board.clone()} {tray_ref} />
        </div>
    }
}

//! Polygon workspace: generate random polygons in a tray, drag them onto a
//! pannable, zoomable workspace and keep the layout in local storage.

pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod persist;
pub mod state;
pub mod util;

pub use error::WorkspaceError;

pub fn run() {
    yew::Renderer::<components::app::App>::new().render();
}

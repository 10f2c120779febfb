pub mod app;
pub mod camera_controls;
pub mod controls_panel;
pub mod polygon_item;
pub mod ruler;
pub mod tray;
pub mod workspace;

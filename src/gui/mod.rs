//! GUI module
//!
//! Slint popup panel and `tray-icon` system tray, both driven from the GUI
//! thread and kept in sync through `AppState` snapshots from the controller.

pub mod gui_controller;
pub mod tray;

pub use gui_controller::GuiController;

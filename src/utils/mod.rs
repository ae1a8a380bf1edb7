//! Utility modules
//!
//! Provides logging setup, tray icon rendering and popup panel placement.

pub mod icon;
pub mod logging;
pub mod placement;

pub use icon::{ICON_SIZE, render_tray_icon};
pub use logging::init_logging;
pub use placement::{ScreenSize, TaskbarEdge, WorkArea, panel_position, scale_panel};

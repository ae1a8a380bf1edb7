//! Runtime settings
//!
//! `MonitorTray` has no configuration file and persists nothing between runs:
//! every start re-discovers monitors. The constants the rest of the crate needs
//! are gathered in [`AppSettings`] so that tests and the GUI share one source.

pub mod models;

pub use models::{AppSettings, PanelGeometry, data_dir};

//! `MonitorTray` - DDC/CI brightness and contrast control from the system tray
//!
//! Discovers displays that speak DDC/CI, caches their brightness and contrast,
//! and keeps a tray menu and a popup panel in sync with that cache. A single
//! `AppController` thread owns the monitor registry and the selection; both UI
//! surfaces talk to it through a command channel and render the `AppState`
//! snapshots it sends back.
//!
//! # Requirements
//!
//! - Windows 10 or 11 for the tray interface
//! - Displays with DDC/CI enabled in their on-screen menu

// Module declarations
pub mod config;
pub mod controller;
pub mod ddc;
pub mod error;
pub mod registry;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{MonitorTrayError, Result};

//! Settings synchronization and selection
//!
//! This module owns the monitor registry and the current selection, and is
//! the only place where either is mutated.
//!
//! # Architecture
//!
//! - `AppController`: registry + selection, settings synchronizer
//! - `ControlCommand`: requests sent by the tray menu and the popup panel
//! - `AppState`: snapshot sent back to the GUI after every command
//! - `PanelVisibility`: HIDDEN/VISIBLE state machine of the popup panel
//!
//! # Event Flow
//!
//! ```text
//! Tray menu ─┐
//!            ├─ ControlCommand → AppController (own thread) → DDC/CI (best effort)
//! Panel ─────┘                         ↓
//!                                   AppState → GUI (tray label, sliders, labels)
//! ```
//!
//! The controller thread performs discovery itself, so display handles never
//! cross threads. Both UI surfaces only ever see `AppState` snapshots.
//!
//! # Hardware writes
//!
//! Commands that pile up while a write is in flight are coalesced, so a
//! slider drag ends in one write of the final value rather than a backlog.
//!
//! `set_brightness`/`set_contrast` always update the cached value, then report
//! the hardware outcome as a `HardwareWrite`. A failed write is never retried
//! and never rolls back the cache, so the UI shows the requested value even
//! when the display ignored it.

pub mod app_controller;
pub mod panel;

pub use app_controller::{
    AppController, AppState, ControlCommand, HardwareWrite, coalesce, format_percent,
};
pub use panel::{PanelTransition, PanelVisibility};

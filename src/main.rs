//! `MonitorTray` - DDC/CI brightness and contrast control from the system tray
//!
//! Starts the controller thread (monitor discovery + settings synchronizer)
//! and runs the tray icon and popup panel on the main thread.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
#[cfg(windows)]
mod gui;

use anyhow::{Context, Result};
use monitor_tray::{
    config::AppSettings,
    controller::{AppController, AppState, ControlCommand},
    ddc,
    error::{MonitorTrayError, get_user_friendly_error},
    utils,
};
use std::sync::mpsc;
use tracing::{error, info, warn};

// Include Slint-generated code
slint::include_modules!();

/// Capacity of the controller → GUI state channel
const STATE_CHANNEL_CAPACITY: usize = 32;

fn main() {
    if let Err(e) = run() {
        error!("MonitorTray failed: {:#}", e);

        let message = e
            .downcast_ref::<MonitorTrayError>()
            .map_or_else(|| format!("{e:#}"), get_user_friendly_error);

        show_error_and_exit(&format!("Failed to start MonitorTray:\n\n{message}"));
    }
}

fn run() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("MonitorTray v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = AppSettings::default();

    let (command_tx, command_rx) = mpsc::channel::<ControlCommand>();
    let (state_tx, state_rx) = mpsc::sync_channel::<AppState>(STATE_CHANNEL_CAPACITY);

    info!("Starting controller thread");
    let controller_handle = AppController::spawn_event_loop(
        ddc::enumerate_devices,
        settings.reset_level,
        command_rx,
        state_tx,
    )
    .context("Failed to start controller thread")?;

    run_gui(settings, command_tx, state_rx)?;

    if controller_handle.join().is_err() {
        warn!("Controller thread panicked during shutdown");
    }

    info!("MonitorTray shutting down");

    Ok(())
}

#[cfg(windows)]
fn run_gui(
    settings: AppSettings,
    command_tx: mpsc::Sender<ControlCommand>,
    state_rx: mpsc::Receiver<AppState>,
) -> Result<()> {
    info!("Creating GUI controller");
    let gui_controller = gui::GuiController::new(settings, command_tx, state_rx)
        .context("Failed to create GUI controller")?;

    gui_controller
        .run()
        .context("GUI event loop terminated with error")
}

#[cfg(not(windows))]
fn run_gui(
    _settings: AppSettings,
    _command_tx: mpsc::Sender<ControlCommand>,
    _state_rx: mpsc::Receiver<AppState>,
) -> Result<()> {
    anyhow::bail!("The MonitorTray tray interface is only available on Windows")
}

/// Shows an error dialog and exits the application.
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("MonitorTray - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}

/// Shows an error dialog and exits the application (non-Windows fallback).
#[cfg(not(windows))]
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}

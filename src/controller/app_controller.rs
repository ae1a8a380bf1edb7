//! Application controller implementation
//!
//! This module implements the controller that owns the monitor registry and
//! the selection, applies settings to hardware and publishes state snapshots
//! to the GUI.

use crate::config::models::MAX_LEVEL;
use crate::ddc::{MonitorDevice, VcpFeature, with_session};
use crate::error::{MonitorTrayError, Result};
use crate::registry::Registry;
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Requests sent by the tray menu and the popup panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Make the monitor at this index active
    Select(usize),
    /// Set brightness of the active monitor (clamped to 0-100)
    SetBrightness(i32),
    /// Set contrast of the active monitor (clamped to 0-100)
    SetContrast(i32),
    /// Set brightness and contrast of the active monitor to the reset level
    Reset,
    /// Leave the event loop
    Shutdown,
}

/// Application state for GUI updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Monitor names in enumeration order
    pub monitor_names: Vec<String>,
    /// Index of the active monitor
    pub selected: usize,
    /// Cached brightness of the active monitor
    pub brightness: u8,
    /// Cached contrast of the active monitor
    pub contrast: u8,
    /// Whether any monitor was discovered
    pub connected: bool,
}

impl AppState {
    /// Name of the active monitor, or "No monitor"
    pub fn current_monitor_name(&self) -> &str {
        self.monitor_names
            .get(self.selected)
            .map_or("No monitor", String::as_str)
    }

    /// Label of the display-only tray menu entry
    pub fn current_monitor_label(&self) -> String {
        format!("Current Monitor: {}", self.current_monitor_name())
    }

    /// Percentage label under the brightness slider
    pub fn brightness_label(&self) -> String {
        format_percent(self.brightness)
    }

    /// Percentage label under the contrast slider
    pub fn contrast_label(&self) -> String {
        format_percent(self.contrast)
    }

    /// Tray tooltip
    pub fn tooltip(&self, app_name: &str) -> String {
        format!(
            "{app_name} - {}",
            if self.connected {
                "Connected"
            } else {
                "Disconnected"
            }
        )
    }
}

/// Format a level as shown next to the sliders ("50%")
pub fn format_percent(level: u8) -> String {
    format!("{level}%")
}

/// Outcome of a best-effort hardware write
///
/// The cached value is updated whatever the outcome; callers may ignore it.
#[derive(Debug)]
pub enum HardwareWrite {
    /// The display accepted the value
    Applied,
    /// The display rejected the value or did not answer
    Failed(MonitorTrayError),
    /// No monitor is available, nothing was written or cached
    NoMonitor,
}

impl HardwareWrite {
    /// Whether the value reached the display
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

fn clamp_level(value: i32) -> u8 {
    u8::try_from(value.clamp(0, i32::from(MAX_LEVEL))).unwrap_or(MAX_LEVEL)
}

/// Application logic controller
pub struct AppController {
    /// Discovered monitors with cached levels
    registry: Registry,
    /// Index of the active monitor
    selected: usize,
    /// Level applied by `reset`
    reset_level: u8,
    /// State sender to GUI
    gui_state_sender: mpsc::SyncSender<AppState>,
}

impl AppController {
    /// Create a controller over a discovered registry
    ///
    /// The first monitor starts selected, so the GUI has values to render
    /// before the user picks anything.
    ///
    /// # Arguments
    ///
    /// * `registry` - Monitors found by `Registry::discover`
    /// * `reset_level` - Level applied by `reset`, clamped to 0-100
    /// * `gui_state_sender` - Channel for `AppState` snapshots to the GUI
    pub fn new(
        registry: Registry,
        reset_level: u8,
        gui_state_sender: mpsc::SyncSender<AppState>,
    ) -> Self {
        Self {
            registry,
            selected: 0,
            reset_level: clamp_level(i32::from(reset_level)),
            gui_state_sender,
        }
    }

    /// Discover monitors and run the event loop on a dedicated thread.
    ///
    /// Discovery happens on the new thread so that display handles are created,
    /// used and dropped by a single owner. The loop ends on
    /// `ControlCommand::Shutdown` or when every command sender is dropped.
    pub fn spawn_event_loop<F>(
        discover: F,
        reset_level: u8,
        command_receiver: mpsc::Receiver<ControlCommand>,
        gui_state_sender: mpsc::SyncSender<AppState>,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce() -> Vec<Box<dyn MonitorDevice>> + Send + 'static,
    {
        let handle = std::thread::Builder::new()
            .name("controller".to_string())
            .spawn(move || {
                let registry = Registry::discover(discover());
                let mut controller = AppController::new(registry, reset_level, gui_state_sender);
                controller.send_initial_state();
                controller.run(&command_receiver);
            })?;
        Ok(handle)
    }

    /// Process commands until shutdown or until all senders are gone
    ///
    /// Commands that queued up while the previous batch was being written are
    /// drained together and coalesced (see [`coalesce`]), then a single state
    /// update is published for the whole batch. Dragging a slider therefore
    /// costs one DDC/CI write per batch instead of one per tick.
    pub fn run(&mut self, command_receiver: &mpsc::Receiver<ControlCommand>) {
        info!("Entering controller event loop");
        while let Ok(first) = command_receiver.recv() {
            let batch = coalesce(std::iter::once(first).chain(command_receiver.try_iter()));
            if self.handle_batch(batch).is_break() {
                break;
            }
        }
        info!("Controller event loop exited");
    }

    /// Apply one command and publish the resulting state
    pub fn handle_command(&mut self, command: ControlCommand) -> ControlFlow<()> {
        self.handle_batch(vec![command])
    }

    /// Apply commands in order and publish the resulting state once.
    ///
    /// Stops at `ControlCommand::Shutdown` without publishing.
    pub fn handle_batch(&mut self, commands: Vec<ControlCommand>) -> ControlFlow<()> {
        for command in commands {
            if self.apply(command).is_break() {
                return ControlFlow::Break(());
            }
        }
        self.send_state_update();
        ControlFlow::Continue(())
    }

    fn apply(&mut self, command: ControlCommand) -> ControlFlow<()> {
        debug!("Handling command: {:?}", command);

        match command {
            ControlCommand::Select(index) => {
                if let Err(e) = self.select(index) {
                    warn!("Ignoring monitor selection: {}", e);
                }
            }
            ControlCommand::SetBrightness(value) => {
                log_write("brightness", &self.set_brightness(value));
            }
            ControlCommand::SetContrast(value) => {
                log_write("contrast", &self.set_contrast(value));
            }
            ControlCommand::Reset => {
                let (brightness, contrast) = self.reset();
                log_write("brightness", &brightness);
                log_write("contrast", &contrast);
            }
            ControlCommand::Shutdown => {
                info!("Shutdown requested");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Discovered monitors
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Index of the active monitor
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Make the monitor at `index` active.
    ///
    /// Out-of-range indices are rejected and the previous selection is kept.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if self.registry.is_empty() {
            return Err(MonitorTrayError::NoMonitors);
        }
        if index >= self.registry.len() {
            return Err(MonitorTrayError::InvalidSelection {
                index,
                count: self.registry.len(),
            });
        }

        self.selected = index;
        if let Some(record) = self.registry.get(index) {
            info!(
                "Selected monitor {}: \"{}\" brightness={} contrast={}",
                index,
                record.name(),
                record.brightness(),
                record.contrast()
            );
        }
        Ok(())
    }

    /// Cached brightness of the active monitor
    pub fn brightness(&self) -> Option<u8> {
        self.registry.get(self.selected).map(|r| r.brightness())
    }

    /// Cached contrast of the active monitor
    pub fn contrast(&self) -> Option<u8> {
        self.registry.get(self.selected).map(|r| r.contrast())
    }

    /// Write brightness to the active monitor (best effort) and cache it
    pub fn set_brightness(&mut self, value: i32) -> HardwareWrite {
        self.apply_level(VcpFeature::Luminance, value)
    }

    /// Write contrast to the active monitor (best effort) and cache it
    pub fn set_contrast(&mut self, value: i32) -> HardwareWrite {
        self.apply_level(VcpFeature::Contrast, value)
    }

    /// Set brightness and contrast of the active monitor to the reset level
    pub fn reset(&mut self) -> (HardwareWrite, HardwareWrite) {
        let level = i32::from(self.reset_level);
        info!("Resetting monitor {} to {}%", self.selected, level);
        (self.set_brightness(level), self.set_contrast(level))
    }

    fn apply_level(&mut self, feature: VcpFeature, value: i32) -> HardwareWrite {
        let level = clamp_level(value);
        let Some(record) = self.registry.get_mut(self.selected) else {
            debug!("No monitor available, ignoring {:?} = {}", feature, level);
            return HardwareWrite::NoMonitor;
        };

        let written = with_session(record.device_mut(), |session| match feature {
            VcpFeature::Luminance => session.set_luminance(level),
            VcpFeature::Contrast => session.set_contrast(level),
        });

        match feature {
            VcpFeature::Luminance => record.set_brightness(level),
            VcpFeature::Contrast => record.set_contrast(level),
        }

        match written {
            Ok(()) => HardwareWrite::Applied,
            Err(e) => HardwareWrite::Failed(e),
        }
    }

    /// Snapshot of what the GUI displays
    pub fn state(&self) -> AppState {
        AppState {
            monitor_names: self.registry.names(),
            selected: self.selected,
            brightness: self.brightness().unwrap_or(self.reset_level),
            contrast: self.contrast().unwrap_or(self.reset_level),
            connected: self.registry.connected(),
        }
    }

    /// Send current state update to GUI
    fn send_state_update(&self) {
        let state = self.state();
        debug!(
            "Sending state update to GUI: monitor={} brightness={} contrast={}",
            state.selected, state.brightness, state.contrast
        );

        if let Err(e) = self.gui_state_sender.send(state) {
            warn!("Failed to send state update to GUI: {}", e);
        }
    }

    /// Send the state right after discovery so the GUI can populate its lists
    pub fn send_initial_state(&self) {
        info!(
            "Sending initial state ({} monitor(s), connected={})",
            self.registry.len(),
            self.registry.connected()
        );
        self.send_state_update();
    }
}

/// Drop slider values superseded later in the same batch.
///
/// A `SetBrightness`/`SetContrast` replaces an earlier one of the same kind
/// only when no `Select`, `Reset` or `Shutdown` sits between them, so every
/// surviving write still targets the monitor it was meant for.
pub fn coalesce(commands: impl IntoIterator<Item = ControlCommand>) -> Vec<ControlCommand> {
    let mut batch: Vec<ControlCommand> = Vec::new();
    let mut barrier = 0;

    for command in commands {
        match command {
            ControlCommand::SetBrightness(_) | ControlCommand::SetContrast(_) => {
                let kind = std::mem::discriminant(&command);
                if let Some(slot) = batch[barrier..]
                    .iter_mut()
                    .find(|queued| std::mem::discriminant(*queued) == kind)
                {
                    *slot = command;
                    continue;
                }
            }
            ControlCommand::Select(_) | ControlCommand::Reset | ControlCommand::Shutdown => {
                barrier = batch.len() + 1;
            }
        }
        batch.push(command);
    }

    batch
}

fn log_write(what: &str, outcome: &HardwareWrite) {
    match outcome {
        HardwareWrite::Applied => debug!("Applied {} to display", what),
        HardwareWrite::Failed(e) => debug!("Display ignored {} write: {}", what, e),
        HardwareWrite::NoMonitor => {}
    }
}

//! System tray integration
//!
//! The tray icon is the persistent entry point of the application. Its context
//! menu contains:
//!
//! - "MonitorTray vX.Y.Z | Site" - opens the project site
//! - "Current Monitor: <name>" - display-only
//! - "Show Controls" - toggles the popup panel (also triggered by left-click)
//! - "Reset to 50%" - resets the active monitor
//! - "Exit"
//!
//! The icon's screen turns red when no monitor was discovered.

use monitor_tray::config::AppSettings;
use monitor_tray::controller::AppState;
use monitor_tray::error::{MonitorTrayError, Result};
use monitor_tray::utils::{ICON_SIZE, render_tray_icon};
use tracing::{debug, info};
use tray_icon::{
    Icon, MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
};

/// What a tray interaction asks the GUI to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    /// Open the project site in the browser
    OpenSite,
    /// Show or hide the popup panel
    TogglePanel,
    /// Reset the active monitor
    Reset,
    /// Quit the application
    Exit,
}

/// System tray icon with context menu
pub struct TrayIcon {
    /// The actual tray icon
    tray: tray_icon::TrayIcon,
    /// Display-only "Current Monitor" entry
    current_item: MenuItem,
    about_id: MenuId,
    toggle_id: MenuId,
    reset_id: MenuId,
    exit_id: MenuId,
    /// Connection state the icon was last rendered for
    connected: Option<bool>,
}

fn tray_error(e: impl std::error::Error + Send + Sync + 'static) -> MonitorTrayError {
    MonitorTrayError::TrayError(Box::new(e))
}

impl TrayIcon {
    /// Create the tray icon in its "no monitor yet" state
    ///
    /// The context menu starts with "Current Monitor: No monitor" and a red
    /// icon; the first `AppState` from the controller replaces both.
    ///
    /// # Arguments
    ///
    /// * `settings` - Provides the application name, version label and reset level
    ///
    /// # Returns
    ///
    /// Returns a Result containing the TrayIcon or an error if the menu or the
    /// icon could not be created.
    pub fn new(settings: &AppSettings) -> Result<Self> {
        info!("Creating system tray icon");

        let tray_menu = Menu::new();

        let about_item = MenuItem::new(settings.about_label(), true, None);
        let current_item = MenuItem::new("Current Monitor: No monitor", false, None);
        let toggle_item = MenuItem::new("Show Controls", true, None);
        let reset_item = MenuItem::new(
            format!("Reset to {}%", settings.reset_level),
            true,
            None,
        );
        let exit_item = MenuItem::new("Exit", true, None);

        tray_menu
            .append_items(&[
                &about_item,
                &current_item,
                &PredefinedMenuItem::separator(),
                &toggle_item,
                &reset_item,
                &PredefinedMenuItem::separator(),
                &exit_item,
            ])
            .map_err(tray_error)?;

        debug!("Tray menu created");

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(tray_menu))
            .with_menu_on_left_click(false)
            .with_icon(Self::build_icon(false)?)
            .with_tooltip(format!("{} - Disconnected", settings.app_name))
            .build()
            .map_err(tray_error)?;

        info!("System tray icon created successfully");

        Ok(Self {
            tray,
            current_item,
            about_id: about_item.id().clone(),
            toggle_id: toggle_item.id().clone(),
            reset_id: reset_item.id().clone(),
            exit_id: exit_item.id().clone(),
            connected: None,
        })
    }

    fn build_icon(connected: bool) -> Result<Icon> {
        let image = render_tray_icon(ICON_SIZE, connected);
        let (width, height) = image.dimensions();
        Icon::from_rgba(image.into_raw(), width, height).map_err(tray_error)
    }

    /// Map a menu click to an action
    pub fn menu_action(&self, event: &MenuEvent) -> Option<TrayAction> {
        let id = event.id();
        if *id == self.about_id {
            Some(TrayAction::OpenSite)
        } else if *id == self.toggle_id {
            Some(TrayAction::TogglePanel)
        } else if *id == self.reset_id {
            Some(TrayAction::Reset)
        } else if *id == self.exit_id {
            Some(TrayAction::Exit)
        } else {
            None
        }
    }

    /// Map an icon click to an action: left-click runs the default entry
    pub fn icon_action(event: &TrayIconEvent) -> Option<TrayAction> {
        match event {
            TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } => Some(TrayAction::TogglePanel),
            _ => None,
        }
    }

    /// Refresh the monitor label, tooltip and icon
    pub fn apply_state(&mut self, state: &AppState, app_name: &str) -> Result<()> {
        self.current_item.set_text(state.current_monitor_label());

        if self.connected != Some(state.connected) {
            self.tray
                .set_icon(Some(Self::build_icon(state.connected)?))
                .map_err(tray_error)?;
            self.tray
                .set_tooltip(Some(state.tooltip(app_name)))
                .map_err(tray_error)?;
            self.connected = Some(state.connected);
        }

        Ok(())
    }
}

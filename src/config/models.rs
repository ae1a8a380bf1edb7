//! Settings data models

use std::path::PathBuf;
use std::time::Duration;

/// Application name used for titles, tooltips and the log directory
pub const APP_NAME: &str = "MonitorTray";

/// Level applied by the "Reset to 50%" actions
pub const RESET_LEVEL: u8 = 50;

/// Level recorded for a monitor whose values could not be read
pub const FALLBACK_LEVEL: u8 = 50;

/// Upper bound of the brightness and contrast scale
pub const MAX_LEVEL: u8 = 100;

/// Size and margins of the popup panel
///
/// The default size is the logical size of the Slint window; placement works
/// on physical pixels (see `utils::placement::scale_panel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Panel width
    pub width: u32,
    /// Panel height
    pub height: u32,
    /// Horizontal gap kept from the screen edge when the taskbar is horizontal
    pub edge_margin: i32,
    /// Gap kept between the panel and the taskbar
    pub taskbar_margin: i32,
    /// Vertical gap kept from the bottom when the taskbar is vertical or unknown
    pub bottom_margin: i32,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            width: 300,
            height: 220,
            edge_margin: 20,
            taskbar_margin: 10,
            bottom_margin: 60,
        }
    }
}

/// Runtime settings (never persisted)
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Title shown on the panel and in the tray tooltip
    pub app_name: String,
    /// Project site opened by the help entry of the tray menu
    pub help_url: String,
    /// Level applied by reset actions
    pub reset_level: u8,
    /// Popup panel geometry
    pub panel: PanelGeometry,
    /// How often the GUI drains controller and tray events
    pub poll_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            help_url: "https://github.com/paulomarconi/MonitorPy".to_string(),
            reset_level: RESET_LEVEL,
            panel: PanelGeometry::default(),
            poll_interval: Duration::from_millis(30),
        }
    }
}

impl AppSettings {
    /// Label of the help entry in the tray menu
    pub fn about_label(&self) -> String {
        format!("{} v{} | Site", self.app_name, env!("CARGO_PKG_VERSION"))
    }
}

/// Directory holding the log files
///
/// Returns: %APPDATA%\MonitorTray (or `./MonitorTray` when APPDATA is unset)
pub fn data_dir() -> PathBuf {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(appdata).join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.reset_level, 50);
        assert_eq!(FALLBACK_LEVEL, 50);
        assert_eq!(settings.panel.width, 300);
        assert_eq!(settings.app_name, "MonitorTray");
    }

    #[test]
    fn test_about_label_carries_version() {
        let label = AppSettings::default().about_label();
        assert!(label.starts_with("MonitorTray v"));
        assert!(label.contains(env!("CARGO_PKG_VERSION")));
        assert!(label.ends_with("| Site"));
    }

    #[test]
    fn test_data_dir_ends_with_app_name() {
        assert!(data_dir().ends_with(APP_NAME));
    }
}

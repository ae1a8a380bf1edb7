//! Error types for `MonitorTray`
//!
//! Startup failures are fatal and reported through an error dialog. Device
//! failures are absorbed by discovery and by the settings synchronizer, but
//! still travel as values of this type so callers can log them.
//!
//! Error variants use `#[source]` to preserve error chains.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `MonitorTray`
#[derive(Debug, Error)]
pub enum MonitorTrayError {
    /// The display did not answer a DDC/CI request
    #[error("DDC/CI request failed: {0}")]
    DdcFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The capability string reported by the display could not be parsed
    #[error("Malformed capability string: {0}")]
    CapabilityParse(String),

    /// A selection index outside the registry bounds
    #[error("Monitor index {index} is out of range ({count} monitors)")]
    InvalidSelection {
        /// Requested index
        index: usize,
        /// Number of monitors in the registry
        count: usize,
    },

    /// The operation requires at least one monitor
    #[error("No monitors available")]
    NoMonitors,

    /// Failed to build or drive the popup panel
    #[error("GUI error: {0}")]
    GuiError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failed to create or update the tray icon
    #[error("Tray icon error: {0}")]
    TrayError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failed to set up logging
    #[error("Logging error: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for `MonitorTray` operations
pub type Result<T> = std::result::Result<T, MonitorTrayError>;

impl MonitorTrayError {
    /// Wrap any transport error coming out of the DDC/CI backend
    pub fn ddc<E>(err: E) -> Self
    where
        Box<dyn std::error::Error + Send + Sync>: From<E>,
    {
        Self::DdcFailed(err.into())
    }
}

/// Convert an error to a user-friendly message for the startup error dialog
pub fn get_user_friendly_error(error: &MonitorTrayError) -> String {
    match error {
        MonitorTrayError::DdcFailed(_)
        | MonitorTrayError::CapabilityParse(_) => "A monitor did not respond to DDC/CI.\n\n\
             Please ensure:\n\
             - DDC/CI is enabled in the monitor's on-screen menu\n\
             - The monitor is connected directly (not through a dock or KVM)"
            .to_string(),
        MonitorTrayError::InvalidSelection { index, count } => {
            // Monitors are numbered from 1 in every label the user sees
            format!(
                "Monitor {} does not exist.\n\nOnly {count} monitor(s) were detected.",
                index + 1
            )
        }
        MonitorTrayError::NoMonitors => "No monitors were detected.\n\n\
             Please check that your displays are connected and powered on."
            .to_string(),
        MonitorTrayError::GuiError(e) => {
            format!(
                "The control panel could not be created:\n\n{e}\n\n\
                 Please ensure your graphics drivers are up to date."
            )
        }
        MonitorTrayError::TrayError(e) => {
            format!(
                "The tray icon could not be created:\n\n{e}\n\n\
                 Please check that the Windows notification area is available."
            )
        }
        MonitorTrayError::LoggingError(e) => {
            format!("Logging could not be initialized:\n\n{e}")
        }
        #[cfg(windows)]
        MonitorTrayError::WindowsApiError(e) => {
            format!(
                "A Windows API error occurred:\n\n{e}\n\n\
                 Please ensure your Windows installation is up to date."
            )
        }
        MonitorTrayError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MonitorTrayError::NoMonitors;
        assert_eq!(error.to_string(), "No monitors available");
    }

    #[test]
    fn test_invalid_selection_display() {
        let error = MonitorTrayError::InvalidSelection { index: 4, count: 2 };
        assert_eq!(
            error.to_string(),
            "Monitor index 4 is out of range (2 monitors)"
        );
    }

    #[test]
    fn test_ddc_wraps_string_error() {
        let error = MonitorTrayError::ddc(StringError::new("no reply"));
        assert_eq!(error.to_string(), "DDC/CI request failed: no reply");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MonitorTrayError = io_error.into();
        assert!(matches!(error, MonitorTrayError::IoError(_)));
    }

    #[test]
    fn test_user_friendly_messages() {
        let message = get_user_friendly_error(&MonitorTrayError::CapabilityParse(
            "unbalanced".to_string(),
        ));
        assert!(message.contains("DDC/CI"));

        let message =
            get_user_friendly_error(&MonitorTrayError::InvalidSelection { index: 3, count: 1 });
        assert!(message.contains("Monitor 4 does not exist"));
        assert!(message.contains("Only 1"));
    }

    #[test]
    fn test_tray_error_user_friendly() {
        let error = MonitorTrayError::TrayError(StringError::new("shell unavailable"));
        let message = get_user_friendly_error(&error);
        assert!(message.contains("tray icon"));
        assert!(message.contains("shell unavailable"));
    }
}

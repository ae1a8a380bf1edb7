//! `ddc-hi` backend
//!
//! On Windows `ddc-hi` goes through the Monitor Configuration API, on Linux
//! through `/dev/i2c-*`. The physical monitor handle is acquired during
//! enumeration and released when the `Display` is dropped, so `open`/`close`
//! keep the trait defaults.

use super::capabilities::{self, Capabilities};
use super::{MonitorDevice, VcpFeature};
use crate::error::{MonitorTrayError, Result};
use ddc_hi::{Ddc, Display};
use tracing::{debug, info};

/// A display found by `ddc-hi`
pub struct DdcHiDevice {
    display: Display,
}

impl DdcHiDevice {
    /// Wrap an enumerated display
    pub fn new(display: Display) -> Self {
        Self { display }
    }
}

impl MonitorDevice for DdcHiDevice {
    fn id(&self) -> String {
        format!("{:?}:{}", self.display.info.backend, self.display.info.id)
    }

    fn capabilities(&mut self) -> Result<Capabilities> {
        // Raw string rather than `Handle::capabilities` so truncated replies still parse
        let raw = self
            .display
            .handle
            .capabilities_string()
            .map_err(MonitorTrayError::ddc)?;
        capabilities::parse(&String::from_utf8_lossy(&raw))
    }

    fn read_feature(&mut self, feature: VcpFeature) -> Result<u16> {
        let value = self
            .display
            .handle
            .get_vcp_feature(feature.code())
            .map_err(MonitorTrayError::ddc)?;
        debug!(
            "Read VCP {:#04x} from {}: {} (max {})",
            feature.code(),
            self.display.info.id,
            value.value(),
            value.maximum()
        );
        Ok(value.value())
    }

    fn write_feature(&mut self, feature: VcpFeature, value: u16) -> Result<()> {
        self.display
            .handle
            .set_vcp_feature(feature.code(), value)
            .map_err(MonitorTrayError::ddc)
    }
}

/// Enumerate connected displays in OS order
///
/// Enumeration itself cannot fail; displays that do not speak DDC/CI are still
/// returned and fail on first use.
pub fn enumerate_devices() -> Vec<Box<dyn MonitorDevice>> {
    let displays = Display::enumerate();
    info!("ddc-hi enumerated {} display(s)", displays.len());
    displays
        .into_iter()
        .map(|display| Box::new(DdcHiDevice::new(display)) as Box<dyn MonitorDevice>)
        .collect()
}

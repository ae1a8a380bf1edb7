//! DDC/CI device abstraction
//!
//! This module defines the contract the rest of the crate needs from a
//! physical display and the scoped session used to talk to it.
//!
//! # Overview
//!
//! - `MonitorDevice`: a display reachable over DDC/CI (luminance, contrast,
//!   capabilities)
//! - `DeviceSession`: RAII guard that opens the device and always closes it,
//!   including on early returns through `?`
//! - `capabilities`: MCCS capability string parsing on top of `mccs-caps`
//! - `backend`: the `ddc-hi` implementation used by the application
//!
//! # VCP codes
//!
//! | Feature    | Code   |
//! |------------|--------|
//! | Luminance  | `0x10` |
//! | Contrast   | `0x12` |
//!
//! Every call may fail: displays without DDC/CI support, displays behind docks
//! and displays that are switched off all reject requests.

pub mod backend;
pub mod capabilities;

pub use backend::{DdcHiDevice, enumerate_devices};
pub use capabilities::Capabilities;

use crate::config::models::MAX_LEVEL;
use crate::error::Result;

/// VCP features this application reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcpFeature {
    /// Brightness (VCP 0x10)
    Luminance,
    /// Contrast (VCP 0x12)
    Contrast,
}

impl VcpFeature {
    /// MCCS feature code
    pub const fn code(self) -> u8 {
        match self {
            Self::Luminance => 0x10,
            Self::Contrast => 0x12,
        }
    }
}

/// A display that can be driven over DDC/CI
///
/// Implementations perform blocking I/O. `open` and `close` bracket every
/// group of requests; callers go through [`DeviceSession`] rather than
/// calling them directly.
pub trait MonitorDevice {
    /// Backend identifier of the display, used for logging
    fn id(&self) -> String;

    /// Prepare the communication channel
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release the communication channel
    fn close(&mut self) {}

    /// Parsed MCCS capabilities
    fn capabilities(&mut self) -> Result<Capabilities>;

    /// Current value of a VCP feature
    fn read_feature(&mut self, feature: VcpFeature) -> Result<u16>;

    /// Set a VCP feature
    fn write_feature(&mut self, feature: VcpFeature, value: u16) -> Result<()>;
}

/// Scoped communication session with a display
///
/// The device is opened on construction and closed when the session is
/// dropped, on every exit path.
pub struct DeviceSession<'a> {
    device: &'a mut dyn MonitorDevice,
}

impl<'a> DeviceSession<'a> {
    /// Open a session on `device`
    pub fn open(device: &'a mut dyn MonitorDevice) -> Result<Self> {
        device.open()?;
        Ok(Self { device })
    }

    /// Query the display's capabilities
    pub fn capabilities(&mut self) -> Result<Capabilities> {
        self.device.capabilities()
    }

    /// Current brightness, clamped to 0-100
    pub fn luminance(&mut self) -> Result<u8> {
        self.read_level(VcpFeature::Luminance)
    }

    /// Set brightness
    pub fn set_luminance(&mut self, value: u8) -> Result<()> {
        self.device
            .write_feature(VcpFeature::Luminance, u16::from(value))
    }

    /// Current contrast, clamped to 0-100
    pub fn contrast(&mut self) -> Result<u8> {
        self.read_level(VcpFeature::Contrast)
    }

    /// Set contrast
    pub fn set_contrast(&mut self, value: u8) -> Result<()> {
        self.device.write_feature(VcpFeature::Contrast, u16::from(value))
    }

    fn read_level(&mut self, feature: VcpFeature) -> Result<u8> {
        let raw = self.device.read_feature(feature)?;
        Ok(u8::try_from(raw).map_or(MAX_LEVEL, |v| v.min(MAX_LEVEL)))
    }
}

impl Drop for DeviceSession<'_> {
    fn drop(&mut self) {
        self.device.close();
    }
}

/// Run `f` inside a session on `device`
pub fn with_session<T>(
    device: &mut dyn MonitorDevice,
    f: impl FnOnce(&mut DeviceSession<'_>) -> Result<T>,
) -> Result<T> {
    let mut session = DeviceSession::open(device)?;
    f(&mut session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeDevice;

    #[test]
    fn test_vcp_codes() {
        assert_eq!(VcpFeature::Luminance.code(), 0x10);
        assert_eq!(VcpFeature::Contrast.code(), 0x12);
    }

    #[test]
    fn test_session_closes_on_success() {
        let mut device = FakeDevice::new("Dell U2720Q").with_levels(30, 70);
        let probe = device.probe();

        let brightness = with_session(&mut device, |session| session.luminance()).unwrap();

        assert_eq!(brightness, 30);
        assert_eq!(probe.opens(), 1);
        assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn test_session_closes_on_error() {
        let mut device = FakeDevice::new("Dell U2720Q").failing_reads();
        let probe = device.probe();

        let result = with_session(&mut device, |session| session.contrast());

        assert!(result.is_err());
        assert_eq!(probe.opens(), 1);
        assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn test_failed_open_does_not_close() {
        let mut device = FakeDevice::new("Dell U2720Q").failing_open();
        let probe = device.probe();

        let result = with_session(&mut device, |session| session.luminance());

        assert!(result.is_err());
        assert_eq!(probe.closes(), 0);
    }

    #[test]
    fn test_out_of_scale_reading_is_clamped() {
        let mut device = FakeDevice::new("Wide").with_levels(250, 40);
        let brightness = with_session(&mut device, |session| session.luminance()).unwrap();
        assert_eq!(brightness, 100);
    }

    #[test]
    fn test_writes_reach_device() {
        let mut device = FakeDevice::new("Dell U2720Q");
        let probe = device.probe();

        with_session(&mut device, |session| {
            session.set_luminance(80)?;
            session.set_contrast(20)
        })
        .unwrap();

        assert_eq!(
            probe.writes(),
            vec![(VcpFeature::Luminance, 80), (VcpFeature::Contrast, 20)]
        );
    }
}

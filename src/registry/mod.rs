//! Monitor registry
//!
//! Builds one [`MonitorRecord`] per enumerated display at startup and keeps
//! the in-memory brightness/contrast cache the UI renders from.
//!
//! # Discovery
//!
//! For each device, in enumeration order:
//!
//! 1. Open a scoped session
//! 2. Parse the capability string; its `model` field becomes the name
//! 3. Read current brightness and contrast
//!
//! Any failure in these steps leaves a record named `Monitor N (No DDC/CI)`
//! with both levels at 50. Discovery never fails as a whole, and an empty
//! registry is a valid outcome.
//!
//! The registry length is fixed once discovery returns: there is no hot-plug
//! support, records are never added or removed.

use crate::config::models::FALLBACK_LEVEL;
use crate::ddc::{MonitorDevice, VcpFeature, capabilities, with_session};
use crate::error::Result;
use std::fmt;
use tracing::{debug, info, warn};

/// Suffix appended to the name of a display that did not answer DDC/CI
pub const NO_DDC_SUFFIX: &str = " (No DDC/CI)";

/// Cached state of one physical display
pub struct MonitorRecord {
    device: Box<dyn MonitorDevice>,
    name: String,
    brightness: u8,
    contrast: u8,
    ddc_supported: bool,
}

impl MonitorRecord {
    /// Display name (model or generic label)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached brightness, 0-100
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Cached contrast, 0-100
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Whether the display answered DDC/CI during discovery
    pub fn ddc_supported(&self) -> bool {
        self.ddc_supported
    }

    pub(crate) fn device_mut(&mut self) -> &mut dyn MonitorDevice {
        self.device.as_mut()
    }

    pub(crate) fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
    }

    pub(crate) fn set_contrast(&mut self, value: u8) {
        self.contrast = value;
    }
}

impl fmt::Debug for MonitorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorRecord")
            .field("device", &self.device.id())
            .field("name", &self.name)
            .field("brightness", &self.brightness)
            .field("contrast", &self.contrast)
            .field("ddc_supported", &self.ddc_supported)
            .finish()
    }
}

/// Values read from a display during discovery
struct Probe {
    model: Option<String>,
    brightness: u8,
    contrast: u8,
}

fn probe(device: &mut dyn MonitorDevice) -> Result<Probe> {
    with_session(device, |session| {
        let caps = session.capabilities()?;
        for feature in [VcpFeature::Luminance, VcpFeature::Contrast] {
            if !capabilities::supports(&caps, feature) {
                debug!("Capability string does not list VCP {:#04x}", feature.code());
            }
        }
        let brightness = session.luminance()?;
        let contrast = session.contrast()?;
        Ok(Probe {
            model: caps.model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
            brightness,
            contrast,
        })
    })
}

/// Ordered, fixed-length set of discovered monitors
#[derive(Debug)]
pub struct Registry {
    records: Vec<MonitorRecord>,
}

impl Registry {
    /// Probe every device and build the registry
    ///
    /// # Arguments
    ///
    /// * `devices` - Displays in enumeration order; each is moved into its record
    ///
    /// # Returns
    ///
    /// A registry with exactly one record per device. Devices that fail any
    /// probing step are kept under a generic annotated name.
    pub fn discover(devices: Vec<Box<dyn MonitorDevice>>) -> Self {
        info!("Discovering monitors...");

        let records: Vec<MonitorRecord> = devices
            .into_iter()
            .enumerate()
            .map(|(index, mut device)| {
                let generic = format!("Monitor {}", index + 1);
                match probe(device.as_mut()) {
                    Ok(found) => {
                        let name = found.model.unwrap_or(generic);
                        info!(
                            "Monitor {} ({}): \"{}\" brightness={} contrast={}",
                            index + 1,
                            device.id(),
                            name,
                            found.brightness,
                            found.contrast
                        );
                        MonitorRecord {
                            device,
                            name,
                            brightness: found.brightness,
                            contrast: found.contrast,
                            ddc_supported: true,
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Monitor {} ({}) does not support DDC/CI: {}",
                            index + 1,
                            device.id(),
                            e
                        );
                        MonitorRecord {
                            device,
                            name: format!("{generic}{NO_DDC_SUFFIX}"),
                            brightness: FALLBACK_LEVEL,
                            contrast: FALLBACK_LEVEL,
                            ddc_supported: false,
                        }
                    }
                }
            })
            .collect();

        info!("Discovered {} monitor(s)", records.len());
        Self { records }
    }

    /// True when at least one monitor was found
    pub fn connected(&self) -> bool {
        !self.records.is_empty()
    }

    /// Number of monitors
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no monitor was found
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&MonitorRecord> {
        self.records.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut MonitorRecord> {
        self.records.get_mut(index)
    }

    /// Records in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &MonitorRecord> {
        self.records.iter()
    }

    /// Monitor names in enumeration order
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }
}

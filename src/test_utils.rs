//! Shared test utilities for `MonitorTray` unit tests.
//!
//! Provides `FakeDevice`, an in-memory `MonitorDevice` whose failures can be
//! switched on per operation, `FakeProbe`, a handle that keeps observing
//! the device after it has been moved into a registry, and temp dir helpers.

use crate::ddc::capabilities::{self, Capabilities};
use crate::ddc::{MonitorDevice, VcpFeature};
use crate::error::{MonitorTrayError, Result, StringError};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

#[derive(Debug, Default)]
struct FakeLog {
    opens: usize,
    closes: usize,
    writes: Vec<(VcpFeature, u16)>,
}

/// Observer for a `FakeDevice`
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    log: Arc<Mutex<FakeLog>>,
}

impl FakeProbe {
    /// Number of sessions opened
    pub fn opens(&self) -> usize {
        self.log.lock().opens
    }

    /// Number of sessions closed
    pub fn closes(&self) -> usize {
        self.log.lock().closes
    }

    /// Successful writes, in order
    pub fn writes(&self) -> Vec<(VcpFeature, u16)> {
        self.log.lock().writes.clone()
    }
}

/// In-memory display
#[derive(Debug)]
pub struct FakeDevice {
    name: String,
    model: Option<String>,
    raw_capabilities: Option<String>,
    luminance: u16,
    contrast: u16,
    fail_open: bool,
    fail_capabilities: bool,
    fail_reads: bool,
    fail_writes: bool,
    probe: FakeProbe,
}

impl FakeDevice {
    /// A working display reporting `model` and levels 50/50
    pub fn new(model: &str) -> Self {
        Self {
            name: format!("fake:{model}"),
            model: Some(model.to_string()),
            raw_capabilities: None,
            luminance: 50,
            contrast: 50,
            fail_open: false,
            fail_capabilities: false,
            fail_reads: false,
            fail_writes: false,
            probe: FakeProbe::default(),
        }
    }

    /// Set the levels reported by reads
    pub fn with_levels(mut self, luminance: u16, contrast: u16) -> Self {
        self.luminance = luminance;
        self.contrast = contrast;
        self
    }

    /// Report a capability string without a `model` field
    pub fn without_model(mut self) -> Self {
        self.model = None;
        self
    }

    /// Answer capability queries with `raw` verbatim
    pub fn with_capability_string(mut self, raw: &str) -> Self {
        self.raw_capabilities = Some(raw.to_string());
        self
    }

    /// Fail to open sessions
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Fail capability queries
    pub fn failing_capabilities(mut self) -> Self {
        self.fail_capabilities = true;
        self
    }

    /// Fail luminance and contrast reads
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Fail luminance and contrast writes
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// A display without DDC/CI: every request fails
    pub fn unsupported(name: &str) -> Self {
        Self::new(name)
            .failing_capabilities()
            .failing_reads()
            .failing_writes()
    }

    /// Observer that stays valid after the device is boxed
    pub fn probe(&self) -> FakeProbe {
        self.probe.clone()
    }

    /// Box the device for a registry
    pub fn boxed(self) -> Box<dyn MonitorDevice> {
        Box::new(self)
    }
}

fn unsupported() -> MonitorTrayError {
    MonitorTrayError::DdcFailed(StringError::new("display does not support DDC/CI"))
}

impl MonitorDevice for FakeDevice {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(unsupported());
        }
        self.probe.log.lock().opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.probe.log.lock().closes += 1;
    }

    fn capabilities(&mut self) -> Result<Capabilities> {
        if self.fail_capabilities {
            return Err(unsupported());
        }
        let raw = match (&self.raw_capabilities, &self.model) {
            (Some(raw), _) => raw.clone(),
            (None, Some(model)) => {
                format!("(prot(monitor)type(LCD)model({model})vcp(10 12)mccs_ver(2.1))")
            }
            (None, None) => "(prot(monitor)type(LCD)vcp(10 12)mccs_ver(2.1))".to_string(),
        };
        capabilities::parse(&raw)
    }

    fn read_feature(&mut self, feature: VcpFeature) -> Result<u16> {
        if self.fail_reads {
            return Err(unsupported());
        }
        Ok(match feature {
            VcpFeature::Luminance => self.luminance,
            VcpFeature::Contrast => self.contrast,
        })
    }

    fn write_feature(&mut self, feature: VcpFeature, value: u16) -> Result<()> {
        if self.fail_writes {
            return Err(unsupported());
        }
        match feature {
            VcpFeature::Luminance => self.luminance = value,
            VcpFeature::Contrast => self.contrast = value,
        }
        self.probe.log.lock().writes.push((feature, value));
        Ok(())
    }
}


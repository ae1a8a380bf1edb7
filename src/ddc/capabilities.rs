//! MCCS capability string parsing
//!
//! Displays describe themselves with a nested, parenthesised string such as
//!
//! ```text
//! (prot(monitor)type(LCD)model(U2720Q)cmds(01 02 03 0C F3)vcp(02 10 12 14(05 08 0B) 60(0F 11))mccs_ver(2.1))
//! ```
//!
//! The grammar itself is handled by `mccs-caps`. Replies read over DDC/CI are
//! often padded with NUL bytes or cut short before the final parentheses, so
//! the raw string is trimmed and its unclosed groups are closed before parsing.

use super::VcpFeature;
use crate::error::{MonitorTrayError, Result};
use tracing::debug;

pub use mccs::Capabilities;

/// Parse a raw capability string
pub fn parse(raw: &str) -> Result<Capabilities> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if trimmed.is_empty() {
        return Err(MonitorTrayError::CapabilityParse(
            "empty capability string".to_string(),
        ));
    }

    let missing = unclosed_groups(trimmed);
    let normalized = if missing == 0 {
        trimmed.to_string()
    } else {
        debug!(
            "Capability string is truncated, closing {} group(s)",
            missing
        );
        format!("{trimmed}{}", ")".repeat(missing))
    };

    mccs_caps::parse_capabilities(normalized.as_bytes())
        .map_err(|e| MonitorTrayError::CapabilityParse(e.to_string()))
}

/// Whether the display advertises a VCP feature
pub fn supports(capabilities: &Capabilities, feature: VcpFeature) -> bool {
    capabilities.vcp_features.contains_key(&feature.code())
}

/// Number of `(` left open at the end of the string
fn unclosed_groups(raw: &str) -> usize {
    raw.bytes().fold(0usize, |depth, b| match b {
        b'(' => depth + 1,
        b')' => depth.saturating_sub(1),
        _ => depth,
    })
}

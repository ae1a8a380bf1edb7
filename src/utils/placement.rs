//! Popup panel placement
//!
//! The panel is placed next to the notification area. The taskbar edge is
//! inferred by comparing the desktop work area with the full screen: the side
//! where the work area stops short of the screen is where the taskbar sits.
//! When the edge cannot be determined (auto-hide taskbar, query failure) the
//! panel goes to a fixed bottom-right offset.

use crate::config::PanelGeometry;

/// Desktop area not covered by the taskbar, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
}

/// Primary screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

/// Screen edge occupied by the taskbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarEdge {
    /// Taskbar along the top
    Top,
    /// Taskbar along the bottom
    Bottom,
    /// Taskbar along the left side
    Left,
    /// Taskbar along the right side
    Right,
}

/// Which edge the taskbar occupies, if any
pub fn taskbar_edge(work_area: WorkArea, screen: ScreenSize) -> Option<TaskbarEdge> {
    if work_area.top > 0 {
        Some(TaskbarEdge::Top)
    } else if work_area.bottom < screen.height {
        Some(TaskbarEdge::Bottom)
    } else if work_area.left > 0 {
        Some(TaskbarEdge::Left)
    } else if work_area.right < screen.width {
        Some(TaskbarEdge::Right)
    } else {
        None
    }
}

/// Top-left corner for the panel
pub fn panel_position(
    work_area: Option<WorkArea>,
    screen: ScreenSize,
    panel: &PanelGeometry,
) -> (i32, i32) {
    let width = i32::try_from(panel.width).unwrap_or(i32::MAX);
    let height = i32::try_from(panel.height).unwrap_or(i32::MAX);

    let right_aligned = screen.width - width - panel.edge_margin;
    let bottom_aligned = screen.height - height - panel.bottom_margin;

    let Some(area) = work_area else {
        return (right_aligned, bottom_aligned);
    };

    match taskbar_edge(area, screen) {
        Some(TaskbarEdge::Top) => (right_aligned, area.top + panel.taskbar_margin),
        Some(TaskbarEdge::Bottom) => (
            right_aligned,
            area.bottom - height - panel.taskbar_margin,
        ),
        Some(TaskbarEdge::Left) => (area.left + panel.taskbar_margin, bottom_aligned),
        Some(TaskbarEdge::Right) => (
            area.right - width - panel.taskbar_margin,
            bottom_aligned,
        ),
        None => (right_aligned, bottom_aligned),
    }
}

/// Convert a panel size given in logical pixels to physical pixels
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "Panel dimensions are small positive values"
)]
pub fn scale_panel(panel: &PanelGeometry, scale: f32) -> PanelGeometry {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let scaled = |logical: u32| (logical as f32 * scale).round() as u32;
    PanelGeometry {
        width: scaled(panel.width),
        height: scaled(panel.height),
        ..*panel
    }
}

/// Query the primary work area and screen size
///
/// A failed work area query falls back to the fixed bottom-right placement.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to read the screen metrics"
)]
pub fn query_desktop() -> (Option<WorkArea>, ScreenSize) {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    // SAFETY: GetSystemMetrics has no preconditions
    let screen = unsafe {
        ScreenSize {
            width: GetSystemMetrics(SM_CXSCREEN),
            height: GetSystemMetrics(SM_CYSCREEN),
        }
    };

    let work_area = work_area()
        .inspect_err(|e| {
            tracing::warn!("Failed to query work area, using default placement: {}", e);
        })
        .ok();

    (work_area, screen)
}

#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to read the desktop work area"
)]
fn work_area() -> crate::error::Result<WorkArea> {
    use windows::Win32::Foundation::RECT;
    use windows::Win32::UI::WindowsAndMessaging::{
        SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
    };

    let mut rect = RECT::default();
    // SAFETY: SPI_GETWORKAREA writes a single RECT into the provided pointer,
    // which points to a live, correctly sized local
    unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(std::ptr::from_mut(&mut rect).cast()),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )?;
    }

    Ok(WorkArea {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    fn area(left: i32, top: i32, right: i32, bottom: i32) -> WorkArea {
        WorkArea {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn test_taskbar_edges() {
        assert_eq!(
            taskbar_edge(area(0, 0, 1920, 1040), SCREEN),
            Some(TaskbarEdge::Bottom)
        );
        assert_eq!(
            taskbar_edge(area(0, 40, 1920, 1080), SCREEN),
            Some(TaskbarEdge::Top)
        );
        assert_eq!(
            taskbar_edge(area(60, 0, 1920, 1080), SCREEN),
            Some(TaskbarEdge::Left)
        );
        assert_eq!(
            taskbar_edge(area(0, 0, 1860, 1080), SCREEN),
            Some(TaskbarEdge::Right)
        );
        assert_eq!(taskbar_edge(area(0, 0, 1920, 1080), SCREEN), None);
    }

    #[test]
    fn test_position_above_bottom_taskbar() {
        let panel = PanelGeometry::default();
        let pos = panel_position(Some(area(0, 0, 1920, 1040)), SCREEN, &panel);
        assert_eq!(pos, (1920 - 300 - 20, 1040 - 220 - 10));
    }

    #[test]
    fn test_position_below_top_taskbar() {
        let panel = PanelGeometry::default();
        let pos = panel_position(Some(area(0, 40, 1920, 1080)), SCREEN, &panel);
        assert_eq!(pos, (1600, 50));
    }

    #[test]
    fn test_position_beside_vertical_taskbars() {
        let panel = PanelGeometry::default();
        assert_eq!(
            panel_position(Some(area(60, 0, 1920, 1080)), SCREEN, &panel),
            (70, 1080 - 220 - 60)
        );
        assert_eq!(
            panel_position(Some(area(0, 0, 1860, 1080)), SCREEN, &panel),
            (1860 - 300 - 10, 800)
        );
    }

    #[test]
    fn test_fallback_to_bottom_right() {
        let panel = PanelGeometry::default();
        let expected = (1600, 800);
        assert_eq!(panel_position(None, SCREEN, &panel), expected);
        assert_eq!(
            panel_position(Some(area(0, 0, 1920, 1080)), SCREEN, &panel),
            expected
        );
    }

    #[test]
    fn test_scale_panel_converts_logical_size() {
        let panel = PanelGeometry::default();

        let scaled = scale_panel(&panel, 1.5);

        assert_eq!((scaled.width, scaled.height), (450, 330));
        assert_eq!(scaled.taskbar_margin, panel.taskbar_margin);
    }

    #[test]
    fn test_scaled_panel_clears_taskbar_at_150_percent() {
        let screen = ScreenSize {
            width: 2560,
            height: 1440,
        };
        let panel = scale_panel(&PanelGeometry::default(), 1.5);

        let (_, y) = panel_position(Some(area(0, 0, 2560, 1380)), screen, &panel);

        assert_eq!(y, 1380 - 330 - 10);
        assert!(y + 330 <= 1380);
    }

    #[test]
    fn test_scale_panel_ignores_invalid_scale() {
        let panel = PanelGeometry::default();
        assert_eq!(scale_panel(&panel, 0.0), panel);
        assert_eq!(scale_panel(&panel, f32::NAN), panel);
    }
}

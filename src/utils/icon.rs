//! Tray icon bitmap
//!
//! Draws a small monitor glyph: a white bezel, a dark frame, a screen area
//! and a stand. The screen is white while at least one monitor is connected
//! and red otherwise.

use image::{Rgba, RgbaImage};

/// Edge length of the tray icon in pixels
pub const ICON_SIZE: u32 = 64;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([204, 0, 0, 255]);

/// Fill the inclusive rectangle `(x0, y0)`-`(x1, y1)`
fn fill_rect(image: &mut RgbaImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgba<u8>) {
    for y in y0..=y1.min(image.height() - 1) {
        for x in x0..=x1.min(image.width() - 1) {
            image.put_pixel(x, y, color);
        }
    }
}

/// Render the tray icon
pub fn render_tray_icon(size: u32, connected: bool) -> RgbaImage {
    let size = size.max(16);
    let mut image = RgbaImage::from_pixel(size, size, BLACK);

    // Bezel
    fill_rect(&mut image, (2, 4), (size - 3, size - 8), WHITE);
    // Frame
    fill_rect(&mut image, (4, 6), (size - 5, size - 10), BLACK);
    // Screen
    let screen = if connected { WHITE } else { RED };
    fill_rect(&mut image, (6, 8), (size - 7, size - 12), screen);
    // Stand
    fill_rect(
        &mut image,
        (size / 2 - 3, size - 6),
        (size / 2 + 3, size - 2),
        WHITE,
    );

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_dimensions() {
        let icon = render_tray_icon(ICON_SIZE, true);
        assert_eq!(icon.dimensions(), (ICON_SIZE, ICON_SIZE));
    }

    #[test]
    fn test_screen_color_reflects_connection() {
        let center = ICON_SIZE / 2;
        assert_eq!(*render_tray_icon(ICON_SIZE, true).get_pixel(center, center - 8), WHITE);
        assert_eq!(*render_tray_icon(ICON_SIZE, false).get_pixel(center, center - 8), RED);
    }

    #[test]
    fn test_frame_and_stand() {
        let icon = render_tray_icon(ICON_SIZE, false);
        assert_eq!(*icon.get_pixel(0, 0), BLACK);
        assert_eq!(*icon.get_pixel(2, 4), WHITE);
        assert_eq!(*icon.get_pixel(4, 6), BLACK);
        assert_eq!(*icon.get_pixel(ICON_SIZE / 2, ICON_SIZE - 3), WHITE);
    }

    #[test]
    fn test_tiny_sizes_are_raised() {
        assert_eq!(render_tray_icon(4, true).dimensions(), (16, 16));
    }
}

use crate::camera::Palette;
use image::{GrayImage, Luma};

/// Converts a rendered frame to a grayscale image, one pixel per cell.
/// Palette characters map linearly onto 0..=255; overlay characters that
/// are not in the palette come out white. Returns `None` when `frame` is
/// shorter than `height` rows of `width + 1` bytes.
pub fn to_gray(
    frame: &[u8],
    width: usize,
    height: usize,
    palette: &Palette,
) -> Option<GrayImage> {
    if frame.len() < (width + 1) * height {
        return None;
    }
    let last = (palette.len() - 1) as u32;
    let img = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let cell = frame[y as usize * (width + 1) + x as usize];
        let level = match palette.level(cell) {
            Some(i) => i as u32 * 255 / last,
            None => 255,
        };
        Luma([level as u8])
    });
    Some(img)
}

//! Backdrop image probing for the display surface.
//!
//! The display window can sit on top of an image chosen by the host. The
//! terminal cannot show pixels, so the decoded image is resized to a fixed
//! character canvas and mapped to a luminance shade ramp. A missing or
//! unreadable file is not an error anywhere in the tracker; it simply yields
//! no art and the display falls back to a plain black backdrop.

use image::imageops::FilterType;
use std::path::Path;

/// Character cells the backdrop is sampled down to.
pub const CANVAS_WIDTH: u32 = 80;
pub const CANVAS_HEIGHT: u32 = 24;

/// Darkest to brightest; index scaled from the pixel luminance.
const SHADE_RAMP: [char; 8] = [' ', '.', ':', '-', '=', '+', '*', '#'];

/// A decoded backdrop, ready to render behind the boss bar.
#[derive(Debug, Clone)]
pub struct BackdropArt {
    /// File name shown in the control panel label.
    pub file_name: String,
    /// One string per canvas row.
    pub rows: Vec<String>,
}

impl BackdropArt {
    /// Decode and downsample the image at `path`.
    ///
    /// Returns `None` for a missing, unreadable, or corrupt file.
    pub fn probe(path: &Path) -> Option<Self> {
        let img = image::open(path).ok()?;
        let small = img
            .resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle)
            .to_luma8();

        let rows = (0..CANVAS_HEIGHT)
            .map(|y| {
                (0..CANVAS_WIDTH)
                    .map(|x| {
                        let lum = small.get_pixel(x, y).0[0] as usize;
                        SHADE_RAMP[lum * SHADE_RAMP.len() / 256]
                    })
                    .collect()
            })
            .collect();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Some(Self { file_name, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_degrades_to_none() {
        assert!(BackdropArt::probe(&PathBuf::from("/no/such/backdrop.png")).is_none());
    }

    #[test]
    fn test_garbage_file_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"this is not image data").unwrap();

        assert!(BackdropArt::probe(&path).is_none());
    }

    #[test]
    fn test_valid_image_fills_the_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        let img = image::RgbImage::from_pixel(32, 32, image::Rgb([200, 200, 200]));
        img.save(&path).unwrap();

        let art = BackdropArt::probe(&path).unwrap();
        assert_eq!(art.file_name, "flat.png");
        assert_eq!(art.rows.len(), CANVAS_HEIGHT as usize);
        assert!(art
            .rows
            .iter()
            .all(|row| row.chars().count() == CANVAS_WIDTH as usize));
    }
}

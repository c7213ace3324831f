//! Multi-monitor screen capture.
//!
//! The virtual desktop spanning every attached display is addressed with
//! [`Rect`] coordinates, so a single capture may straddle monitor boundaries.
//! Regions come back either as an [`image::RgbaImage`] or as a BMP file:
//!
//! ```no_run
//! let screen = screengrab::capture_screen().unwrap();
//! screen.save("screen.png").unwrap();
//!
//! let rect = screengrab::Rect::new(0, 0, 200, 100);
//! screengrab::save_rect_to_bmp("region.bmp", rect).unwrap();
//! ```

mod bmp;
mod buffer;
mod display;
mod error;
mod geometry;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub(crate) use linux as platform;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub(crate) use windows as platform;

pub use bmp::write_bmp;
pub use buffer::{PixelBuffer, PixelFormat, RowOrder};
pub use display::Display;
pub use error::{GrabError, GrabResult};
pub use geometry::{MAX_CAPTURE_DIM, Rect};
pub use image;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::RgbaImage;

/// The bounding rectangle of all attached displays.
///
/// Queried fresh from the OS on every call; its top-left corner is negative
/// when a display sits left of or above the primary one.
pub fn virtual_screen_rect() -> GrabResult<Rect> {
    let displays = Display::all()?;
    let mut rects = displays.iter().map(|display| display.rect());

    let first = rects
        .next()
        .ok_or_else(|| GrabError::new("no active displays"))?;

    Ok(rects.fold(first, |bounding, rect| bounding.union(&rect)))
}

/// Captures the given virtual-desktop rectangle as an RGBA image.
///
/// The image dimensions equal the canonical rectangle's width and height
/// exactly; see [`Rect::normalized`] for how degenerate rectangles are
/// treated.
pub fn capture_rect(rect: Rect) -> GrabResult<RgbaImage> {
    grab_rect(rect)?.into_rgba_image()
}

/// Captures the entire virtual screen as an RGBA image.
pub fn capture_screen() -> GrabResult<RgbaImage> {
    capture_rect(virtual_screen_rect()?)
}

/// Captures the given rectangle and writes it to `path` as a BMP file.
pub fn save_rect_to_bmp<P: AsRef<Path>>(path: P, rect: Rect) -> GrabResult<()> {
    let frame = grab_rect(rect)?;

    let mut sink = BufWriter::new(File::create(path)?);
    write_bmp(&frame, &mut sink)?;
    sink.flush()?;

    Ok(())
}

/// Captures the entire virtual screen and writes it to `path` as a BMP file.
pub fn save_screen_to_bmp<P: AsRef<Path>>(path: P) -> GrabResult<()> {
    save_rect_to_bmp(path, virtual_screen_rect()?)
}

fn grab_rect(rect: Rect) -> GrabResult<PixelBuffer> {
    let bounds = virtual_screen_rect()?;
    let canonical = rect.normalized(&bounds)?;

    platform::capture::capture_area(
        canonical.left,
        canonical.top,
        canonical.width() as u32,
        canonical.height() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run against the real display stack, so they are ignored by
    // default: `cargo test -- --ignored` on a machine with a desktop session.

    #[test]
    #[ignore = "requires a display"]
    fn displays_lie_within_the_virtual_screen() {
        let displays = Display::all().unwrap();
        assert!(!displays.is_empty());

        let bounds = virtual_screen_rect().unwrap();
        for display in &displays {
            assert!(
                bounds.contains(&display.rect()),
                "display {} at {} outside {bounds}",
                display.name(),
                display.rect()
            );
        }
    }

    #[test]
    #[ignore = "requires a display"]
    fn captured_image_matches_rect_dimensions() {
        let image = capture_rect(Rect::new(0, 0, 200, 100)).unwrap();
        assert_eq!((image.width(), image.height()), (200, 100));
    }

    #[test]
    #[ignore = "requires a display"]
    fn degenerate_rects_fail_before_capture() {
        for rect in [
            Rect::new(100, 100, 99, 99),
            Rect::new(100, 100, 99, 100),
            Rect::new(100, 100, 100, 99),
        ] {
            match capture_rect(rect) {
                Err(GrabError::InvalidRect(_)) => {}
                other => panic!("expected InvalidRect for {rect}, got {other:?}"),
            }
        }
    }

    #[test]
    #[ignore = "requires a display"]
    fn zero_size_rect_yields_one_pixel_image_and_bmp() {
        let rect = Rect::new(100, 100, 100, -100);

        let image = capture_rect(rect).unwrap();
        assert_eq!((image.width(), image.height()), (1, 1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.bmp");
        save_rect_to_bmp(&path, rect).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let width = i32::from_le_bytes(bytes[18..22].try_into().unwrap());
        let height = i32::from_le_bytes(bytes[22..26].try_into().unwrap());
        assert_eq!((width, height), (1, 1));
    }

    #[test]
    #[ignore = "requires a display"]
    fn oversized_rect_is_rejected() {
        match capture_rect(Rect::new(0, 0, 2_600_000, 2_600_000)) {
            Err(GrabError::CaptureTooLarge { .. }) => {}
            other => panic!("expected CaptureTooLarge, got {other:?}"),
        }
    }

    #[test]
    #[ignore = "requires a display"]
    fn bmp_and_image_paths_agree() {
        // One grab feeds both paths; capturing twice could race a repaint.
        let frame = grab_rect(Rect::new(0, 0, 64, 32)).unwrap();

        let mut bytes = Vec::new();
        write_bmp(&frame, &mut bytes).unwrap();
        let image = frame.into_rgba_image().unwrap();

        let data_offset = u32::from_le_bytes(bytes[10..14].try_into().unwrap()) as usize;
        let bpp = u16::from_le_bytes(bytes[28..30].try_into().unwrap()) as usize / 8;
        let padded_row = (64 * bpp + 3) & !3;

        for y in 0..32u32 {
            for x in 0..64u32 {
                let row = data_offset + (31 - y) as usize * padded_row;
                let px = &bytes[row + x as usize * bpp..][..bpp];
                let rgba = image.get_pixel(x, y);
                assert_eq!([px[2], px[1], px[0]], [rgba[0], rgba[1], rgba[2]]);
            }
        }
    }

    #[test]
    #[ignore = "requires a display"]
    fn repeated_queries_do_not_leak() {
        for _ in 0..1000 {
            let displays = Display::all().unwrap();
            assert!(!displays.is_empty());
        }

        for _ in 0..200 {
            let image = capture_rect(Rect::new(0, 0, 32, 32)).unwrap();
            assert_eq!((image.width(), image.height()), (32, 32));
        }
    }
}

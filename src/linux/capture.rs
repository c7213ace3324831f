use xcb::{
    Connection,
    x::{Drawable, GetImage, ImageFormat, ImageOrder},
};

use crate::{
    buffer::{PixelBuffer, PixelFormat, RowOrder},
    error::{GrabError, GrabResult},
};

/// Transfers the given virtual-screen region from the X root window.
///
/// The root window spans all RandR monitors, so the region may straddle
/// them; gaps between non-adjacent monitors come back as whatever the server
/// stores there.
pub(crate) fn capture_area(x: i32, y: i32, width: u32, height: u32) -> GrabResult<PixelBuffer> {
    let (conn, index) = Connection::connect(None)?;

    let setup = conn.get_setup();
    let screen = setup
        .roots()
        .nth(index as usize)
        .ok_or_else(|| GrabError::new("screen not found"))?;

    let get_image_cookie = conn.send_request(&GetImage {
        format: ImageFormat::ZPixmap,
        drawable: Drawable::Window(screen.root()),
        x: x as i16,
        y: y as i16,
        width: width as u16,
        height: height as u16,
        plane_mask: u32::MAX,
    });

    let get_image_reply = conn.wait_for_reply(get_image_cookie)?;
    let depth = get_image_reply.depth();

    let pixmap_format = setup
        .pixmap_formats()
        .iter()
        .find(|item| item.depth() == depth)
        .ok_or_else(|| GrabError::new(format!("no pixmap format for depth {depth}")))?;

    if setup.image_byte_order() != ImageOrder::LsbFirst {
        return Err(GrabError::UnsupportedPixelFormat(
            "MSB-first image byte order".into(),
        ));
    }

    let bits_per_pixel = pixmap_format.bits_per_pixel();
    let format = match bits_per_pixel {
        32 => PixelFormat::Bgrx8,
        24 => PixelFormat::Bgr8,
        other => {
            return Err(GrabError::UnsupportedPixelFormat(format!(
                "{other} bits per pixel"
            )));
        }
    };

    let pad_bits = pixmap_format.scanline_pad() as usize;
    let row_bits = width as usize * bits_per_pixel as usize;
    let stride = row_bits.div_ceil(pad_bits) * pad_bits / 8;

    PixelBuffer::new(
        width,
        height,
        stride,
        format,
        RowOrder::TopDown,
        get_image_reply.data().to_vec(),
    )
}

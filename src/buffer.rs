use image::RgbaImage;

use crate::error::{GrabError, GrabResult};

/// Per-pixel byte layout of a captured buffer.
///
/// Only the layouts the capture backends actually produce exist here, so the
/// materializer handles every variant statically instead of failing at run
/// time on an unrecognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24-bit packed blue, green, red.
    Bgr8,
    /// 32-bit blue, green, red plus a dead padding byte.
    Bgrx8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgr8 => 3,
            PixelFormat::Bgrx8 => 4,
        }
    }
}

/// Storage order of the rows in a captured buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    TopDown,
    /// The native DIB layout on Windows: the first stored row is the bottom
    /// scanline of the image.
    BottomUp,
}

/// A raw captured pixel region: `height` rows of `width` pixels, each row
/// occupying `stride` bytes (stride may exceed the packed row length when the
/// platform pads scanlines).
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    row_order: RowOrder,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        row_order: RowOrder,
        bytes: Vec<u8>,
    ) -> GrabResult<PixelBuffer> {
        let row_len = width as usize * format.bytes_per_pixel();
        if stride < row_len {
            return Err(GrabError::new(format!(
                "stride {stride} is shorter than a {width}px row of {row_len} bytes"
            )));
        }
        let expected = stride * height as usize;
        if bytes.len() < expected {
            return Err(GrabError::new(format!(
                "pixel buffer holds {} bytes, expected at least {expected}",
                bytes.len()
            )));
        }

        Ok(PixelBuffer {
            width,
            height,
            stride,
            format,
            row_order,
            bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The packed pixel data of row `y`, counted from the top of the image
    /// regardless of storage order, with any stride padding stripped.
    pub fn row(&self, y: u32) -> &[u8] {
        let stored = match self.row_order {
            RowOrder::TopDown => y,
            RowOrder::BottomUp => self.height - 1 - y,
        };
        let start = stored as usize * self.stride;
        &self.bytes[start..start + self.width as usize * self.format.bytes_per_pixel()]
    }

    /// Converts the buffer into a canonical top-down RGBA image.
    ///
    /// Screen surfaces carry no meaningful alpha, so the channel is forced
    /// opaque. The conversion is pure: rows are reordered and channels
    /// swapped, nothing else.
    pub fn into_rgba_image(self) -> GrabResult<RgbaImage> {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);

        for y in 0..self.height {
            let row = self.row(y);
            match self.format {
                PixelFormat::Bgr8 => {
                    for bgr in row.chunks_exact(3) {
                        rgba.extend_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
                    }
                }
                PixelFormat::Bgrx8 => {
                    for bgrx in row.chunks_exact(4) {
                        rgba.extend_from_slice(&[bgrx[2], bgrx[1], bgrx[0], 255]);
                    }
                }
            }
        }

        RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| GrabError::new("RgbaImage::from_raw failed"))
    }
}

use std::io::Write;

use crate::buffer::PixelBuffer;
use crate::error::GrabResult;

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;

/// Writes `buffer` to `sink` as an uncompressed Windows bitmap.
///
/// The output is the classic container: 14-byte file header, 40-byte
/// `BITMAPINFOHEADER` (positive height, `BI_RGB`), then rows stored bottom-up
/// and padded to a 4-byte boundary. Downstream tools parse this layout
/// directly, so the header fields are computed exactly as a reference writer
/// would. I/O errors propagate unchanged; a partial file is the sink's
/// problem to roll back.
pub fn write_bmp<W: Write>(buffer: &PixelBuffer, sink: &mut W) -> GrabResult<()> {
    let bytes_per_pixel = buffer.format().bytes_per_pixel();
    let row_len = buffer.width() as usize * bytes_per_pixel;
    let padded_row_len = (row_len + 3) & !3;
    let image_size = (padded_row_len * buffer.height() as usize) as u32;
    let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN;

    // BITMAPFILEHEADER
    sink.write_all(b"BM")?;
    sink.write_all(&(data_offset + image_size).to_le_bytes())?;
    sink.write_all(&[0u8; 4])?; // bfReserved1, bfReserved2
    sink.write_all(&data_offset.to_le_bytes())?;

    // BITMAPINFOHEADER
    sink.write_all(&INFO_HEADER_LEN.to_le_bytes())?;
    sink.write_all(&(buffer.width() as i32).to_le_bytes())?;
    sink.write_all(&(buffer.height() as i32).to_le_bytes())?;
    sink.write_all(&1u16.to_le_bytes())?; // biPlanes
    sink.write_all(&((bytes_per_pixel * 8) as u16).to_le_bytes())?;
    sink.write_all(&0u32.to_le_bytes())?; // biCompression = BI_RGB
    sink.write_all(&image_size.to_le_bytes())?;
    sink.write_all(&[0u8; 16])?; // resolution and palette fields

    let padding = [0u8; 3];
    for y in (0..buffer.height()).rev() {
        sink.write_all(buffer.row(y))?;
        sink.write_all(&padding[..padded_row_len - row_len])?;
    }

    Ok(())
}

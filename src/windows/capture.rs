use std::mem;

use scopeguard::guard;
use windows::Win32::{
    Foundation::GetLastError,
    Graphics::Gdi::{
        BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
        DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDIBits, GetWindowDC, HBITMAP, HDC, ReleaseDC,
        SRCCOPY, SelectObject,
    },
    UI::WindowsAndMessaging::GetDesktopWindow,
};

use crate::{
    buffer::{PixelBuffer, PixelFormat, RowOrder},
    error::{GrabError, GrabResult},
};

fn delete_bitmap_object(val: HBITMAP) {
    unsafe {
        let succeed = DeleteObject(val.into()).as_bool();

        if !succeed {
            log::error!("DeleteObject({:?}) failed: {:?}", val, GetLastError());
        }
    }
}

/// Transfers the given virtual-screen region into a bottom-up BGRX buffer.
///
/// The desktop window's DC covers the whole virtual screen, so `x`/`y` may be
/// negative and the region may straddle displays. Every GDI handle acquired
/// here is released before returning, on success and on every error path.
pub(crate) fn capture_area(x: i32, y: i32, width: u32, height: u32) -> GrabResult<PixelBuffer> {
    unsafe {
        let hwnd = GetDesktopWindow();
        let scope_guard_hdc_desktop = guard(GetWindowDC(Some(hwnd)), |val| {
            if ReleaseDC(Some(hwnd), val) != 1 {
                log::error!("ReleaseDC({:?}) failed: {:?}", val, GetLastError());
            }
        });

        let scope_guard_hdc_mem = guard(CreateCompatibleDC(Some(*scope_guard_hdc_desktop)), |val| {
            if !DeleteDC(val).as_bool() {
                log::error!("DeleteDC({:?}) failed: {:?}", val, GetLastError());
            }
        });

        let scope_guard_h_bitmap = guard(
            CreateCompatibleBitmap(*scope_guard_hdc_desktop, width as i32, height as i32),
            delete_bitmap_object,
        );

        SelectObject(*scope_guard_hdc_mem, (*scope_guard_h_bitmap).into());

        BitBlt(
            *scope_guard_hdc_mem,
            0,
            0,
            width as i32,
            height as i32,
            Some(*scope_guard_hdc_desktop),
            x,
            y,
            SRCCOPY,
        )?;

        read_dib(
            *scope_guard_hdc_mem,
            *scope_guard_h_bitmap,
            width,
            height,
        )
    }
}

fn read_dib(hdc_mem: HDC, h_bitmap: HBITMAP, width: u32, height: u32) -> GrabResult<PixelBuffer> {
    // 32bpp rows are already 4-byte aligned, so the stride carries no padding.
    let stride = width as usize * 4;
    let buffer_size = stride * height as usize;

    let mut bitmap_info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width as i32,
            // Positive height requests the native bottom-up row order.
            biHeight: height as i32,
            biPlanes: 1,
            biBitCount: 32,
            biSizeImage: buffer_size as u32,
            biCompression: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut buffer = vec![0u8; buffer_size];

    unsafe {
        let is_failed = GetDIBits(
            hdc_mem,
            h_bitmap,
            0,
            height,
            Some(buffer.as_mut_ptr().cast()),
            &mut bitmap_info,
            DIB_RGB_COLORS,
        ) == 0;

        if is_failed {
            return Err(GrabError::CaptureFailed(format!(
                "GetDIBits failed: {:?}",
                GetLastError()
            )));
        }
    };

    PixelBuffer::new(
        width,
        height,
        stride,
        PixelFormat::Bgrx8,
        RowOrder::BottomUp,
        buffer,
    )
}

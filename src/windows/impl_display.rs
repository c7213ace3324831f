use std::mem;

use windows::Win32::{
    Foundation::{BOOL, LPARAM, POINT, RECT, TRUE},
    Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
        MONITOR_DEFAULTTONULL, MonitorFromPoint,
    },
    UI::WindowsAndMessaging::MONITORINFOF_PRIMARY,
};

use crate::{
    error::{GrabError, GrabResult},
    geometry::Rect,
};

use super::utils::wide_string_to_string;

#[derive(Debug, Clone)]
pub(crate) struct ImplDisplay {
    #[allow(unused)]
    pub hmonitor: HMONITOR,
    pub id: u32,
    pub name: String,
    pub rect: Rect,
    pub is_primary: bool,
}

extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _: HDC,
    _: *mut RECT,
    state: LPARAM,
) -> BOOL {
    unsafe {
        let state = Box::leak(Box::from_raw(state.0 as *mut Vec<HMONITOR>));
        state.push(hmonitor);

        TRUE
    }
}

impl ImplDisplay {
    pub fn new(hmonitor: HMONITOR) -> GrabResult<ImplDisplay> {
        let mut monitor_info_ex_w = MONITORINFOEXW::default();
        monitor_info_ex_w.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;
        let monitor_info_ex_w_ptr =
            &mut monitor_info_ex_w as *mut MONITORINFOEXW as *mut MONITORINFO;

        unsafe { GetMonitorInfoW(hmonitor, monitor_info_ex_w_ptr).ok()? };
        let rc_monitor = monitor_info_ex_w.monitorInfo.rcMonitor;

        Ok(ImplDisplay {
            hmonitor,
            id: hmonitor.0 as u32,
            name: wide_string_to_string(&monitor_info_ex_w.szDevice)?,
            rect: Rect::new(
                rc_monitor.left,
                rc_monitor.top,
                rc_monitor.right,
                rc_monitor.bottom,
            ),
            is_primary: monitor_info_ex_w.monitorInfo.dwFlags == MONITORINFOF_PRIMARY,
        })
    }

    pub fn all() -> GrabResult<Vec<ImplDisplay>> {
        let hmonitors_mut_ptr: *mut Vec<HMONITOR> = Box::into_raw(Box::default());

        let hmonitors = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(monitor_enum_proc),
                LPARAM(hmonitors_mut_ptr as isize),
            )
            .ok()?;
            Box::from_raw(hmonitors_mut_ptr)
        };

        let mut impl_displays = Vec::with_capacity(hmonitors.len());

        for &hmonitor in hmonitors.iter() {
            impl_displays.push(ImplDisplay::new(hmonitor)?);
        }

        Ok(impl_displays)
    }

    pub fn from_point(x: i32, y: i32) -> GrabResult<ImplDisplay> {
        let point = POINT { x, y };
        let hmonitor = unsafe { MonitorFromPoint(point, MONITOR_DEFAULTTONULL) };

        if hmonitor.is_invalid() {
            return Err(GrabError::new(format!("no display at ({x}, {y})")));
        }

        ImplDisplay::new(hmonitor)
    }
}

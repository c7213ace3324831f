use std::str;

use xcb::{
    Connection, Xid,
    randr::{GetMonitors, GetOutputInfo, MonitorInfo, Output},
    x::CURRENT_TIME,
};

use crate::{
    error::{GrabError, GrabResult},
    geometry::Rect,
};

#[derive(Debug, Clone)]
pub(crate) struct ImplDisplay {
    pub id: u32,
    pub name: String,
    pub rect: Rect,
    pub is_primary: bool,
}

impl ImplDisplay {
    fn new(conn: &Connection, monitor_info: &MonitorInfo, output: &Output) -> GrabResult<ImplDisplay> {
        let get_output_info_cookie = conn.send_request(&GetOutputInfo {
            output: *output,
            config_timestamp: CURRENT_TIME,
        });
        let get_output_info_reply = conn.wait_for_reply(get_output_info_cookie)?;

        let x = monitor_info.x() as i32;
        let y = monitor_info.y() as i32;
        let width = monitor_info.width() as i32;
        let height = monitor_info.height() as i32;

        Ok(ImplDisplay {
            id: output.resource_id(),
            name: str::from_utf8(get_output_info_reply.name())?.to_string(),
            rect: Rect::new(x, y, x + width, y + height),
            is_primary: monitor_info.primary(),
        })
    }

    pub fn all() -> GrabResult<Vec<ImplDisplay>> {
        let (conn, index) = Connection::connect(None)?;

        let setup = conn.get_setup();
        let screen = setup
            .roots()
            .nth(index as usize)
            .ok_or_else(|| GrabError::new("screen not found"))?;

        let get_monitors_cookie = conn.send_request(&GetMonitors {
            window: screen.root(),
            get_active: true,
        });

        let get_monitors_reply = conn.wait_for_reply(get_monitors_cookie)?;

        let mut impl_displays = Vec::new();

        for monitor_info in get_monitors_reply.monitors() {
            let output = match monitor_info.outputs().first() {
                Some(output) => output,
                None => continue,
            };

            match ImplDisplay::new(&conn, monitor_info, output) {
                Ok(impl_display) => impl_displays.push(impl_display),
                Err(err) => log::error!("skipping output {:?}: {}", output, err),
            }
        }

        Ok(impl_displays)
    }

    pub fn from_point(x: i32, y: i32) -> GrabResult<ImplDisplay> {
        let impl_displays = ImplDisplay::all()?;

        let impl_display = impl_displays
            .iter()
            .find(|impl_display| {
                let rect = impl_display.rect;
                x >= rect.left && x < rect.right && y >= rect.top && y < rect.bottom
            })
            .ok_or_else(|| GrabError::new(format!("no display at ({x}, {y})")))?;

        Ok(impl_display.clone())
    }
}

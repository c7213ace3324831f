use image::RgbaImage;

use crate::{error::GrabResult, geometry::Rect, platform::impl_display::ImplDisplay};

/// One attached display surface and its place in the virtual desktop.
///
/// Descriptors are produced fresh on every query; nothing is cached, so a
/// display reconfiguration is picked up by the next call. Enumeration order
/// is unspecified.
#[derive(Debug, Clone)]
pub struct Display {
    pub(crate) impl_display: ImplDisplay,
}

impl Display {
    pub(crate) fn new(impl_display: ImplDisplay) -> Display {
        Display { impl_display }
    }

    /// All attached displays. Non-empty on any host with an active display.
    pub fn all() -> GrabResult<Vec<Display>> {
        let displays = ImplDisplay::all()?
            .iter()
            .map(|impl_display| Display::new(impl_display.clone()))
            .collect();

        Ok(displays)
    }

    /// The display whose rectangle contains the given virtual-desktop point.
    pub fn from_point(x: i32, y: i32) -> GrabResult<Display> {
        let impl_display = ImplDisplay::from_point(x, y)?;

        Ok(Display::new(impl_display))
    }
}

impl Display {
    /// Unique identifier associated with the display.
    pub fn id(&self) -> u32 {
        self.impl_display.id
    }

    /// The OS device name of the display.
    pub fn name(&self) -> &str {
        &self.impl_display.name
    }

    /// The display's rectangle in virtual-desktop coordinates.
    pub fn rect(&self) -> Rect {
        self.impl_display.rect
    }

    /// Whether this is the primary display.
    pub fn is_primary(&self) -> bool {
        self.impl_display.is_primary
    }
}

impl Display {
    /// Capture an image of this display.
    pub fn capture_image(&self) -> GrabResult<RgbaImage> {
        crate::capture_rect(self.rect())
    }
}

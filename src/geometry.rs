use std::fmt;

use crate::error::{GrabError, GrabResult};

/// Upper bound for a single capture dimension, in pixels.
///
/// The X11 wire format carries image width/height as `u16`, and GDI surfaces
/// are far smaller than this in practice, so anything larger is rejected with
/// [`GrabError::CaptureTooLarge`] before any allocation or OS call is made.
pub const MAX_CAPTURE_DIM: i64 = 65_535;

/// A rectangle in virtual-desktop coordinates.
///
/// The virtual desktop spans all attached displays, so `left`/`top` may be
/// negative (e.g. a secondary monitor placed left of the primary). Canonical
/// rectangles have `right >= left` and `bottom >= top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal span. Negative for non-canonical rectangles.
    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    /// Vertical span. Negative for non-canonical rectangles.
    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    /// The smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Maps a caller-supplied rectangle to the canonical rectangle the capture
    /// engine will transfer, validating it against `bounds` (the virtual
    /// screen rectangle).
    ///
    /// The policy models the legacy GDI capture behavior:
    ///
    /// - An inverted span (`right < left` or `bottom < top`) between two
    ///   coordinates that both lie inside `bounds` is a caller bug and fails
    ///   with [`GrabError::InvalidRect`].
    /// - An inverted span whose coordinates reach outside `bounds` collapses
    ///   to zero, the way the legacy engine clamped off-screen coordinates.
    /// - A zero span (given directly or collapsed) produces a 1x1 capture
    ///   instead of an empty one. Callers depend on this quirk, so it is kept
    ///   rather than fixed; `(100, 100, 100, -100)` yields a 1x1 image on a
    ///   virtual screen based at the origin.
    /// - A span larger than [`MAX_CAPTURE_DIM`] fails with
    ///   [`GrabError::CaptureTooLarge`].
    pub fn normalized(&self, bounds: &Rect) -> GrabResult<Rect> {
        let width = normalized_span(self.left, self.right, bounds.left, bounds.right)
            .ok_or(GrabError::InvalidRect(*self))?;
        let height = normalized_span(self.top, self.bottom, bounds.top, bounds.bottom)
            .ok_or(GrabError::InvalidRect(*self))?;

        if width > MAX_CAPTURE_DIM || height > MAX_CAPTURE_DIM {
            return Err(GrabError::CaptureTooLarge { width, height });
        }

        let right = self.left as i64 + width.max(1);
        let bottom = self.top as i64 + height.max(1);
        if right > i32::MAX as i64 || bottom > i32::MAX as i64 {
            return Err(GrabError::InvalidRect(*self));
        }

        Ok(Rect::new(self.left, self.top, right as i32, bottom as i32))
    }
}

fn normalized_span(lo: i32, hi: i32, bounds_lo: i32, bounds_hi: i32) -> Option<i64> {
    let span = hi as i64 - lo as i64;
    if span >= 0 {
        return Some(span);
    }

    let in_bounds = |v: i32| v >= bounds_lo && v <= bounds_hi;
    if in_bounds(lo) && in_bounds(hi) {
        None
    } else {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        left: 0,
        top: 0,
        right: 1920,
        bottom: 1080,
    };

    #[test]
    fn spans() {
        let rect = Rect::new(-1280, 0, 1920, 1080);
        assert_eq!(rect.width(), 3200);
        assert_eq!(rect.height(), 1080);

        let inverted = Rect::new(100, 100, 99, 100);
        assert_eq!(inverted.width(), -1);
        assert_eq!(inverted.height(), 0);
    }

    #[test]
    fn span_never_overflows() {
        let rect = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(rect.width(), u32::MAX as i64);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 1920, 1080);
        let b = Rect::new(-1280, -24, 0, 1000);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(-1280, -24, 1920, 1080));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
    }

    #[test]
    fn canonical_rect_passes_through() {
        let rect = Rect::new(0, 0, 200, 100);
        assert_eq!(rect.normalized(&BOUNDS).unwrap(), rect);
    }

    #[test]
    fn in_bounds_inversions_are_rejected() {
        for rect in [
            Rect::new(100, 100, 99, 99),
            Rect::new(100, 100, 99, 100),
            Rect::new(100, 100, 100, 99),
        ] {
            match rect.normalized(&BOUNDS) {
                Err(GrabError::InvalidRect(r)) => assert_eq!(r, rect),
                other => panic!("expected InvalidRect for {rect}, got {other:?}"),
            }
        }
    }

    #[test]
    fn off_screen_inversion_collapses_to_one_pixel() {
        // bottom = -100 lies above the virtual screen, so the inverted height
        // collapses to zero and the zero-size quirk kicks in.
        let rect = Rect::new(100, 100, 100, -100);
        assert_eq!(
            rect.normalized(&BOUNDS).unwrap(),
            Rect::new(100, 100, 101, 101)
        );
    }

    #[test]
    fn zero_size_yields_one_pixel() {
        let rect = Rect::new(50, 60, 50, 60);
        assert_eq!(rect.normalized(&BOUNDS).unwrap(), Rect::new(50, 60, 51, 61));
    }

    #[test]
    fn oversized_rect_fails_fast() {
        let rect = Rect::new(0, 0, 2_600_000, 2_600_000);
        match rect.normalized(&BOUNDS) {
            Err(GrabError::CaptureTooLarge { width, height }) => {
                assert_eq!(width, 2_600_000);
                assert_eq!(height, 2_600_000);
            }
            other => panic!("expected CaptureTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn max_dimension_is_allowed() {
        let rect = Rect::new(0, 0, MAX_CAPTURE_DIM as i32, 1);
        assert_eq!(rect.normalized(&BOUNDS).unwrap(), rect);
    }

    #[test]
    fn negative_origin_is_canonical() {
        let bounds = Rect::new(-1280, 0, 1920, 1080);
        let rect = Rect::new(-1280, 0, -640, 480);
        assert_eq!(rect.normalized(&bounds).unwrap(), rect);
    }
}

use thiserror::Error;

use crate::geometry::Rect;

#[derive(Debug, Error)]
pub enum GrabError {
    #[error("{0}")]
    Error(String),
    #[error("invalid capture rectangle {0}")]
    InvalidRect(Rect),
    #[error("requested capture {width}x{height} exceeds the maximum capture dimension")]
    CaptureTooLarge { width: i64, height: i64 },
    #[error("screen capture failed: {0}")]
    CaptureFailed(String),
    #[error("unsupported pixel layout: {0}")]
    UnsupportedPixelFormat(String),
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[cfg(target_os = "linux")]
    #[error(transparent)]
    XcbError(#[from] xcb::Error),
    #[cfg(target_os = "linux")]
    #[error(transparent)]
    XcbConnError(#[from] xcb::ConnError),
    #[cfg(target_os = "linux")]
    #[error(transparent)]
    StdStrUtf8Error(#[from] std::str::Utf8Error),

    #[cfg(target_os = "windows")]
    #[error(transparent)]
    WindowsCoreError(#[from] windows::core::Error),
    #[cfg(target_os = "windows")]
    #[error(transparent)]
    Utf16Error(#[from] widestring::error::Utf16Error),
}

impl GrabError {
    pub fn new<S: ToString>(err: S) -> Self {
        GrabError::Error(err.to_string())
    }
}

pub type GrabResult<T> = Result<T, GrabError>;

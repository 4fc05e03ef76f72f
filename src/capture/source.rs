//! Screen capture sources

use std::path::PathBuf;

use image::RgbaImage;

use crate::error::CaptureError;

/// A platform capability that produces one still frame of the screen
///
/// Implementations finish any negotiation (permission prompts, stream
/// setup) before returning. A declined request must be reported as
/// [`CaptureError::PermissionDenied`] so callers can ignore it silently.
pub trait ScreenSource {
    fn capture_frame(&mut self) -> Result<RgbaImage, CaptureError>;
}

/// Capture source backed by an image file on disk
///
/// Used by the command line front end in place of a live screen grab.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScreenSource for ImageFileSource {
    fn capture_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let bytes = std::fs::read(&self.path).map_err(|err| match err.kind() {
            std::io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied,
            _ => CaptureError::Io(err),
        })?;
        let rgba = image::load_from_memory(&bytes)?.to_rgba8();
        log::debug!(
            "Captured {}x{} frame from {}",
            rgba.width(),
            rgba.height(),
            self.path.display()
        );
        Ok(rgba)
    }
}

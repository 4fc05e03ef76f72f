//! Base image type for the annotation editor

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tiny_skia::Pixmap;

use crate::domain::{PixelRect, fit_within};
use crate::error::CaptureError;
use crate::render::image::pixmap_from_rgba;

/// The raster an editor session annotates, with both raw RGBA data and a drawing handle
#[derive(Clone, Debug)]
pub struct BaseImage {
    rgba: RgbaImage,
    pixmap: Pixmap,
}

impl BaseImage {
    /// Wrap a decoded image without resizing it
    pub fn new(rgba: RgbaImage) -> Result<Self, CaptureError> {
        let pixmap = pixmap_from_rgba(&rgba).ok_or_else(|| {
            CaptureError::Failed(format!(
                "cannot use a {}x{} image",
                rgba.width(),
                rgba.height()
            ))
        })?;
        Ok(Self { rgba, pixmap })
    }

    /// Load a captured image, scaling it down to fit `max_width`×`max_height`
    ///
    /// Aspect ratio is preserved and images are never scaled up.
    pub fn load(rgba: RgbaImage, max_width: u32, max_height: u32) -> Result<Self, CaptureError> {
        let (width, height) = fit_within(rgba.width(), rgba.height(), max_width, max_height);
        if (width, height) == rgba.dimensions() || rgba.width() == 0 || rgba.height() == 0 {
            return Self::new(rgba);
        }
        log::debug!(
            "Scaling base image from {}x{} to {}x{}",
            rgba.width(),
            rgba.height(),
            width,
            height
        );
        Self::new(imageops::resize(&rgba, width, height, FilterType::Triangle))
    }

    /// Copy a sub-region into a standalone image of the region's size
    ///
    /// Pixels are copied as-is, there is no re-encode step.
    pub fn crop(&self, region: PixelRect) -> Result<Self, CaptureError> {
        if region.x + region.width > self.width() || region.y + region.height > self.height() {
            return Err(CaptureError::Failed(format!(
                "crop region {region:?} exceeds {}x{} image",
                self.width(),
                self.height()
            )));
        }
        let cropped =
            imageops::crop_imm(&self.rgba, region.x, region.y, region.width, region.height)
                .to_image();
        Self::new(cropped)
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}

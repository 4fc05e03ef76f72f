//! Final image export
//!
//! The exported image is the committed scene only: base image plus every
//! stored annotation. Live previews never reach an export.

use std::fs;
use std::io;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::RgbaImage;

use crate::error::ExportError;
use crate::render::image::rgba_from_pixmap;
use crate::session::EditorSession;

/// A platform clipboard that accepts PNG images
pub trait ClipboardSink {
    fn set_png(&mut self, png: &[u8]) -> Result<(), ExportError>;
}

/// Flatten the session's committed scene
pub fn render_final_image(session: &EditorSession) -> Option<RgbaImage> {
    session.render_scene().map(|pixmap| rgba_from_pixmap(&pixmap))
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    write_png(&mut bytes, image)?;
    Ok(bytes)
}

/// Encode and write a PNG file
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let file = fs::File::create(path)?;
    write_png(io::BufWriter::new(file), image)?;
    log::info!(
        "Wrote {}x{} PNG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

pub fn png_data_url(png: &[u8]) -> String {
    data_url("image/png", png)
}

/// Split a base64 data URL into its MIME type and decoded bytes
pub fn parse_data_url(url: &str) -> Option<(&str, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = BASE64.decode(payload).ok()?;
    Some((mime, bytes))
}

/// Download name for an exported screenshot, `screenshot-<millis>.png`
pub fn screenshot_file_name(millis: i64) -> String {
    format!("screenshot-{millis}.png")
}

pub fn screenshot_file_name_now() -> String {
    screenshot_file_name(chrono::Utc::now().timestamp_millis())
}

// file.rs — File-polling capture source. The host (or an external camera
// helper) drops the latest still into a well-known path; each poll reads it,
// downscales, and JPEG-re-encodes so the vision model sees a bounded payload.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, GenericImageView};
use std::path::PathBuf;

use super::{ImageBlob, ImageCaptureSource};

/// Reads the latest capture from a watched file.
///
/// A missing, unreadable, or undecodable file is reported as "no capture"
/// (`None`); the reconciler treats capture failure and absence identically.
pub struct WatchedFileSource {
    path: PathBuf,
    /// Maximum width in pixels; wider images are downscaled.
    max_width: u32,
    /// JPEG compression quality (1–100).
    jpeg_quality: u8,
}

impl WatchedFileSource {
    pub fn new(path: impl Into<PathBuf>, max_width: u32, jpeg_quality: u8) -> Self {
        Self {
            path: path.into(),
            max_width,
            jpeg_quality,
        }
    }
}

impl ImageCaptureSource for WatchedFileSource {
    fn poll(&self) -> Option<ImageBlob> {
        if !self.path.exists() {
            return None;
        }
        let raw = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("capture file {} unreadable: {}", self.path.display(), e);
                return None;
            }
        };
        match prepare_blob(&raw, self.max_width, self.jpeg_quality) {
            Ok(blob) => Some(blob),
            Err(e) => {
                log::warn!("capture file {} rejected: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Decode, downscale if wider than `max_width`, and JPEG-encode.
fn prepare_blob(raw: &[u8], max_width: u32, jpeg_quality: u8) -> Result<ImageBlob, String> {
    let img = image::load_from_memory(raw).map_err(|e| format!("decode: {e}"))?;

    let img = if img.width() > max_width {
        let ratio = max_width as f64 / img.width() as f64;
        let new_h = (img.height() as f64 * ratio).round() as u32;
        img.resize_exact(max_width, new_h, imageops::FilterType::Triangle)
    } else {
        img
    };

    let (w, h) = img.dimensions();

    let mut jpeg_buf: Vec<u8> = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_buf, jpeg_quality);
        encoder
            .encode(img.to_rgb8().as_raw(), w, h, image::ExtendedColorType::Rgb8)
            .map_err(|e| format!("jpeg encode: {e}"))?;
    }

    Ok(ImageBlob::new(jpeg_buf))
}

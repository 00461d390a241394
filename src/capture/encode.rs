//! Still-Image Encoding
//!
//! JPEG encoding at the fixed capture quality, plus the data-URL helpers used
//! by the display layer. The bytes submitted to the inference service and the
//! bytes behind a frame's data URL are always identical.

use crate::capture::types::JPEG_QUALITY;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;

/// Data-URL prefix for an encoded frame
const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode a captured image as JPEG at the fixed capture quality.
pub fn encode_jpeg(image: &RgbaImage) -> crate::Result<Vec<u8>> {
    // JPEG has no alpha channel; flatten before encoding
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let quality = (JPEG_QUALITY * 100.0).round() as u8;

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| crate::Error::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Wrap JPEG bytes in a `data:image/jpeg;base64,` URL for display.
pub fn to_data_url(jpeg: &[u8]) -> String {
    format!(
        "{}{}",
        DATA_URL_PREFIX,
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}

/// Recover the raw JPEG bytes from a data URL.
///
/// The prefix is stripped before base64 decoding, so a round trip through
/// [`to_data_url`] reproduces the original bytes exactly.
pub fn from_data_url(url: &str) -> crate::Result<Vec<u8>> {
    let payload = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| crate::Error::Encoding(format!("not a JPEG data URL: {:.32}", url)))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| crate::Error::Encoding(format!("invalid base64 payload: {}", e)))
}

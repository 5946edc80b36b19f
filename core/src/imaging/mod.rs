//! Image normalization: decode, stretch-to-fit resize, JPEG re-encode.
//!
//! Pure CPU work with no shared state; safe to run on any worker. Output
//! bytes may differ across encoder library versions for identical input,
//! which is an accepted boundary of determinism.

use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;

use error::NormalizeError;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum NormalizeError {
        #[error("Not a decodable image: {0}")]
        Decode(image::ImageError),

        #[error("Resize error: {0}")]
        Resize(#[from] fast_image_resize::ResizeError),

        #[error("Encode error: {0}")]
        Encode(image::ImageError),
    }
}

/// Fixed quality for re-encoded payloads.
const JPEG_QUALITY: u8 = 80;

/// Decodes `encoded`, scales it to exactly `width` x `height` pixels and
/// re-encodes it as JPEG.
///
/// Scaling stretches to fit: aspect ratio is not preserved and nothing is
/// cropped or letterboxed. A payload that no decoder recognizes fails with
/// `NormalizeError::Decode`.
pub fn normalize(encoded: &[u8], width: u32, height: u32) -> Result<Vec<u8>, NormalizeError> {
    let src_image = image::load_from_memory(encoded).map_err(NormalizeError::Decode)?;

    let mut dst_image = image::DynamicImage::new(width, height, src_image.color());

    let mut resizer = fast_image_resize::Resizer::new();
    resizer.resize(
        &src_image,
        &mut dst_image,
        Some(&fast_image_resize::ResizeOptions::new().resize_alg(
            fast_image_resize::ResizeAlg::Convolution(fast_image_resize::FilterType::Lanczos3),
        )),
    )?;

    // JPEG carries no alpha channel
    let rgb = dst_image.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(NormalizeError::Encode)?;

    Ok(out.into_inner())
}

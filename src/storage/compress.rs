//! Evidence photo compression.
//!
//! Incoming photos are resized and re-encoded to JPEG, walking a fixed
//! ladder of (max dimension, quality) settings until the output fits under
//! the size ceiling. An image that cannot be brought under the ceiling is an
//! upload error, never a silently oversized file.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::workflow::WorkflowError;

/// Hard ceiling on a stored photo.
pub const MAX_PHOTO_BYTES: usize = 1024 * 1024;

/// Below this size the ladder stops early; further quality loss buys nothing.
pub const TARGET_PHOTO_BYTES: usize = 800 * 1024;

/// (max dimension in pixels, JPEG quality) attempts, best-first.
const LADDER: [(u32, u8); 4] = [(1600, 80), (1600, 70), (1400, 70), (1200, 60)];

/// Compresses an uploaded photo to a JPEG under [`MAX_PHOTO_BYTES`].
pub fn compress_photo(input: &[u8]) -> Result<Vec<u8>, WorkflowError> {
    let decoded = image::load_from_memory(input)
        .map_err(|err| WorkflowError::Upload(format!("unreadable image: {err}")))?;

    let mut best: Option<Vec<u8>> = None;
    for (max_dimension, quality) in LADDER {
        let encoded = encode_attempt(&decoded, max_dimension, quality)?;
        if encoded.len() <= TARGET_PHOTO_BYTES {
            return Ok(encoded);
        }
        if best.as_ref().is_none_or(|b| encoded.len() < b.len()) {
            best = Some(encoded);
        }
    }

    match best {
        Some(bytes) if bytes.len() <= MAX_PHOTO_BYTES => Ok(bytes),
        Some(bytes) => Err(WorkflowError::Upload(format!(
            "image is {} bytes after compression, over the {} byte limit",
            bytes.len(),
            MAX_PHOTO_BYTES
        ))),
        None => Err(WorkflowError::Upload("image produced no output".to_string())),
    }
}

fn encode_attempt(
    image: &DynamicImage,
    max_dimension: u32,
    quality: u8,
) -> Result<Vec<u8>, WorkflowError> {
    let resized = if image.width() > max_dimension || image.height() > max_dimension {
        image.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        image.clone()
    };

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|err| WorkflowError::Upload(format!("jpeg encode failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        // Per-pixel noise defeats both PNG and JPEG compression well enough
        // to exercise the ladder.
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = (x.wrapping_mul(7919) ^ y.wrapping_mul(104729)) as u8;
            image::Rgb([v, v.wrapping_mul(31), v.wrapping_add(97)])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn small_image_passes_on_first_attempt() {
        let input = noisy_png(400, 300);
        let out = compress_photo(&input).unwrap();
        assert!(out.len() <= TARGET_PHOTO_BYTES);
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn large_image_is_downscaled_under_the_ceiling() {
        let input = noisy_png(4000, 3000);
        let out = compress_photo(&input).unwrap();
        assert!(out.len() <= MAX_PHOTO_BYTES);
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(decoded.width() <= 1600 && decoded.height() <= 1600);
    }

    #[test]
    fn garbage_bytes_are_an_upload_error() {
        let err = compress_photo(b"not an image").unwrap_err();
        assert!(matches!(err, WorkflowError::Upload(_)));
    }
}

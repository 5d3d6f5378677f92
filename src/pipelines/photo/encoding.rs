// SPDX-License-Identifier: GPL-3.0-only

//! Photo encoding
//!
//! Camera frames arrive as RGBA. Stills are stored as JPEG, which carries no
//! alpha channel, so frames are flattened to RGB before encoding.

use crate::backends::camera::types::{CameraFrame, EncodedPhoto};
use crate::constants::PhotoQuality;
use crate::errors::PhotoError;
use image::{DynamicImage, RgbImage};
use tracing::debug;

/// Encode a camera frame as JPEG
pub fn encode_jpeg(frame: &CameraFrame, quality: PhotoQuality) -> Result<EncodedPhoto, PhotoError> {
    let rgba = frame.packed_rgba();
    let expected = frame.width as usize * frame.height as usize * 4;
    if rgba.len() != expected {
        return Err(PhotoError::EncodingFailed(format!(
            "frame holds {} bytes, expected {}",
            rgba.len(),
            expected
        )));
    }

    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let image = RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| PhotoError::EncodingFailed("invalid frame dimensions".to_string()))?;

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    debug!(
        width = frame.width,
        height = frame.height,
        quality = quality.jpeg_quality(),
        size = buffer.len(),
        "Encoded JPEG"
    );

    Ok(EncodedPhoto {
        data: buffer,
        width: frame.width,
        height: frame.height,
    })
}

/// Decode encoded photo bytes into an image
pub fn decode_photo(data: &[u8]) -> Result<DynamicImage, PhotoError> {
    Ok(image::load_from_memory(data)?)
}

/// Flip packed RGBA pixels horizontally in place
pub fn mirror_rgba(pixels: &mut [u8], width: u32) {
    let row_bytes = width as usize * 4;
    if row_bytes == 0 {
        return;
    }
    for row in pixels.chunks_exact_mut(row_bytes) {
        let (mut left, mut right) = (0, width as usize - 1);
        while left < right {
            for c in 0..4 {
                row.swap(left * 4 + c, right * 4 + c);
            }
            left += 1;
            right -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use std::sync::Arc;

    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> CameraFrame {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        CameraFrame {
            width,
            height,
            data: Arc::from(data),
            stride: width * 4,
        }
    }

    #[test]
    fn test_encode_then_decode_keeps_dimensions() {
        let frame = solid_frame(16, 8, [200, 120, 40, 255]);
        let encoded = encode_jpeg(&frame, PhotoQuality::High).unwrap();
        assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);

        let decoded = decode_photo(&encoded.data).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn test_encode_rejects_short_frame() {
        let mut frame = solid_frame(4, 4, [0, 0, 0, 255]);
        frame.data = Arc::from(vec![0u8; 10]);
        assert!(matches!(
            encode_jpeg(&frame, PhotoQuality::Low),
            Err(PhotoError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_photo(b"definitely not a jpeg").is_err());
    }

    #[test]
    fn test_mirror_flips_rows() {
        let mut pixels = vec![
            1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, //
            4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6,
        ];
        mirror_rgba(&mut pixels, 3);
        assert_eq!(
            pixels,
            vec![
                3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, //
                6, 6, 6, 6, 5, 5, 5, 5, 4, 4, 4, 4,
            ]
        );
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Post-processing of captured frames
//!
//! Frames are turned upright according to the sensor mounting, then scaled
//! to the fixed output size. Scaling does not preserve the aspect ratio.

use crate::backends::camera::types::{CameraFrame, SensorRotation};
use crate::errors::PhotoError;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Rotate a frame so that it is upright on the display
pub fn normalize_orientation(image: RgbaImage, rotation: SensorRotation) -> RgbaImage {
    match rotation {
        SensorRotation::None => image,
        SensorRotation::Rotate90 => imageops::rotate90(&image),
        SensorRotation::Rotate180 => imageops::rotate180(&image),
        SensorRotation::Rotate270 => imageops::rotate270(&image),
    }
}

/// Bilinear resize to exactly `width`x`height`
pub fn downsample(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Full post-processing of a raw frame
pub fn process_frame(
    frame: &CameraFrame,
    rotation: SensorRotation,
    width: u32,
    height: u32,
) -> Result<RgbaImage, PhotoError> {
    if width == 0 || height == 0 {
        return Err(PhotoError::ProcessingFailed(format!(
            "invalid output size {}x{}",
            width, height
        )));
    }

    let image = frame.to_rgba_image().ok_or_else(|| {
        PhotoError::ProcessingFailed(format!(
            "frame data does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    let upright = normalize_orientation(image, rotation);
    debug!(
        source = ?(frame.width, frame.height),
        upright = ?upright.dimensions(),
        output = ?(width, height),
        %rotation,
        "Processing frame"
    );

    Ok(downsample(&upright, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let image = RgbaImage::new(4, 2);
        assert_eq!(
            normalize_orientation(image.clone(), SensorRotation::Rotate90).dimensions(),
            (2, 4)
        );
        assert_eq!(
            normalize_orientation(image, SensorRotation::Rotate180).dimensions(),
            (4, 2)
        );
    }

    #[test]
    fn test_quarter_turn_moves_pixels_clockwise() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        let rotated = normalize_orientation(image, SensorRotation::Rotate90);
        // Left pixel of a row ends up on top after a clockwise turn
        assert_eq!(rotated.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_process_frame_output_size() {
        let frame = CameraFrame::from_rgba(8, 6, vec![128; 8 * 6 * 4]).unwrap();
        let out = process_frame(&frame, SensorRotation::Rotate270, 4, 3).unwrap();
        assert_eq!(out.dimensions(), (4, 3));
        assert!(matches!(
            process_frame(&frame, SensorRotation::None, 0, 3),
            Err(PhotoError::ProcessingFailed(_))
        ));
    }
}

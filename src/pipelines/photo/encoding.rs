// SPDX-License-Identifier: GPL-3.0-only

//! JPEG export of captured photos

use super::Photo;
use crate::constants::capture;
use crate::errors::PhotoError;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// `~/Pictures/shutter`, or `./shutter` without a home directory
pub fn default_export_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shutter")
}

/// File name for `photo`: capture time plus a short id suffix
pub fn file_name(photo: &Photo) -> String {
    format!(
        "IMG_{}_{}.jpg",
        photo.captured_at().format("%Y%m%d_%H%M%S"),
        photo.id().short()
    )
}

/// Encode `photo` as JPEG into `dir`, creating the directory if needed
///
/// Blocking; returns the written path.
pub fn export_jpeg(photo: &Photo, dir: &Path) -> Result<PathBuf, PhotoError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(photo));
    write_jpeg(photo, &path)?;
    info!(path = %path.display(), "Photo exported");
    Ok(path)
}

/// Encode `photo` as JPEG at exactly `path`
pub fn write_jpeg(photo: &Photo, path: &Path) -> Result<(), PhotoError> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(photo.image().as_ref().clone()).to_rgb8();

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = JpegEncoder::new_with_quality(writer, capture::EXPORT_JPEG_QUALITY);
    encoder.encode_image(&rgb)?;
    Ok(())
}

/// Export on the blocking pool
pub async fn save_photo(photo: Photo, dir: PathBuf) -> Result<PathBuf, PhotoError> {
    tokio::task::spawn_blocking(move || export_jpeg(&photo, &dir))
        .await
        .map_err(|e| PhotoError::SaveFailed(format!("Save task error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_export_writes_decodable_jpeg() {
        let dir = std::env::temp_dir().join(format!("shutter-export-{}", uuid::Uuid::new_v4()));
        let photo = Photo::new(RgbaImage::from_pixel(16, 12, image::Rgba([10, 200, 30, 255])));

        let path = export_jpeg(&photo, &dir).unwrap();
        assert!(path.starts_with(&dir));
        assert!(file_name(&photo).ends_with(".jpg"));

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_default_export_dir_is_app_folder() {
        assert!(default_export_dir().ends_with("shutter"));
    }
}

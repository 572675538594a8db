//! Bitmap resizing and encoding

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::BitmapError;

/// Quality used when none is given
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Output formats for [`to_image_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFileFormat {
    #[default]
    Jpeg,
    /// Lossless; ignores the quality setting
    Png,
}

impl ImageFileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFileFormat::Jpeg => "jpeg",
            ImageFileFormat::Png => "png",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Scale `image` to fit inside `max_width` x `max_height`, keeping its
/// aspect ratio.
///
/// One side always matches its maximum: the height when the box is
/// relatively wider than the image, otherwise the width. The image is
/// returned untouched when either maximum is not positive.
pub fn resize(image: DynamicImage, max_width: i32, max_height: i32) -> DynamicImage {
    if max_width <= 0 || max_height <= 0 || image.width() == 0 || image.height() == 0 {
        return image;
    }

    let image_ratio = image.width() as f32 / image.height() as f32;
    let max_ratio = max_width as f32 / max_height as f32;

    let (width, height) = if max_ratio > image_ratio {
        ((max_height as f32 * image_ratio) as u32, max_height as u32)
    } else {
        (max_width as u32, (max_width as f32 / image_ratio) as u32)
    };

    tracing::trace!(
        "Resizing {}x{} image to {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );
    image.resize_exact(width.max(1), height.max(1), FilterType::Triangle)
}

/// Encode `image` into a new, uniquely named file in `dir` and return
/// its path.
///
/// `quality` (1 to 100) applies to JPEG only. JPEG output drops any alpha
/// channel.
pub fn to_image_file(
    image: &DynamicImage,
    dir: &Path,
    format: ImageFileFormat,
    quality: u8,
) -> Result<PathBuf, BitmapError> {
    let file = tempfile::Builder::new()
        .prefix("temp")
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(file.as_file());
        match format {
            ImageFileFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
                DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
            }
            ImageFileFormat::Png => {
                image.write_with_encoder(PngEncoder::new(&mut writer))?;
            }
        }
        writer.flush()?;
    }

    let path = file.into_temp_path().keep().map_err(|err| err.error)?;
    tracing::debug!("Saved {:?} image to {}", format, path.display());
    Ok(path)
}

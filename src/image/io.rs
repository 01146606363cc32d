//! I/O helpers for grayscale images, manifests and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray buffer.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to disk.
//! - `read_manifest`: ordered list of image paths, one per line.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::GrayImageU8;
use crate::error::ImageIoError;
use image::{DynamicImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, ImageIoError> {
    let img = image::open(path)
        .map_err(|e| ImageIoError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Save an 8-bit grayscale buffer; the format follows the file extension.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), ImageIoError> {
    let encode_err = |message: String| ImageIoError::Encode {
        path: path.to_path_buf(),
        message,
    };
    ensure_parent_dir(path).map_err(|e| encode_err(e.to_string()))?;
    let data = buffer.as_bytes().to_vec();
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(buffer.width() as u32, buffer.height() as u32, data)
            .ok_or_else(|| encode_err("failed to create image buffer".to_string()))?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| encode_err(e.to_string()))
}

/// Read the ordered image list. Blank lines are skipped and surrounding
/// whitespace trimmed; relative entries are kept as written.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>, ImageIoError> {
    let text = fs::read_to_string(path).map_err(|source| ImageIoError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_manifest(&text))
}

pub fn parse_manifest(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Output location for `input` under `dir`, keeping the input's file name.
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(input),
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ImageIoError> {
    let json_err = |message: String| ImageIoError::Json {
        path: path.to_path_buf(),
        message,
    };
    ensure_parent_dir(path).map_err(|e| json_err(e.to_string()))?;
    let json = serde_json::to_string_pretty(value).map_err(|e| json_err(e.to_string()))?;
    fs::write(path, json).map_err(|e| json_err(e.to_string()))
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

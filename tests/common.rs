#![allow(dead_code)]

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Deterministic gradient so resampled output is not trivially uniform.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn write_png(path: &Path, width: u32, height: u32) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    DynamicImage::ImageRgb8(gradient(width, height))
        .save(path)
        .unwrap();
    path.to_path_buf()
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    DynamicImage::ImageRgb8(gradient(width, height))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
    path.to_path_buf()
}

/// A file with an accepted suffix whose header is garbage.
pub fn write_corrupt(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"\xFF\xD8 this is not really a jpeg").unwrap();
    path.to_path_buf()
}

pub fn dimensions(path: &Path) -> (u32, u32) {
    image::open(path).unwrap().dimensions()
}

/// The reference tree: `a.png` (100x50), `b.txt`, `sub/c.jpg` (corrupt).
pub fn create_reference_tree(root: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let a = write_png(&root.join("a.png"), 100, 50);
    let b = root.join("b.txt");
    fs::write(&b, "not an image").unwrap();
    let c = write_corrupt(&root.join("sub").join("c.jpg"));
    (a, b, c)
}

//! PNG output.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::Result;

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Write an image to `path` as PNG.
///
/// The file is written next to the destination under a temporary name and
/// renamed into place, so a failure never leaves a truncated image behind.
pub fn write_png(img: &DynamicImage, path: &Path) -> Result<()> {
    let bytes = encode_png(img)?;
    let tmp = temp_path(path);

    if let Err(e) = std::fs::write(&tmp, &bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "qr.png".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RasterError;
    use image::{GrayImage, Luma};

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("image-engine-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
        dir
    }

    #[test]
    fn test_encode_png_signature() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_write_png_round_trip() {
        let dir = scratch_dir();
        let path = dir.join("out.png");
        let mut gray = GrayImage::from_pixel(6, 6, Luma([255]));
        gray.put_pixel(2, 3, Luma([0]));

        write_png(&DynamicImage::ImageLuma8(gray.clone()), &path).unwrap();

        let loaded = image::open(&path).expect("written PNG should load").to_luma8();
        assert_eq!(loaded, gray);
        assert!(!temp_path(&path).exists(), "temporary file should be gone");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_png_unwritable_path() {
        let dir = scratch_dir();
        let path = dir.join("missing-subdir").join("out.png");
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));

        let err = write_png(&img, &path).unwrap_err();
        assert!(matches!(err, RasterError::Io(_)));
        assert!(!path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("labels/device.png"));
        assert_eq!(tmp, Path::new("labels/device.png.tmp"));
    }
}

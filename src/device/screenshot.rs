// Screenshot files pulled from the device and their preview
use crate::adb::AdbResult;
use image::ImageFormat;
use image::imageops::FilterType;
use log::{debug, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Scale `(width, height)` to fit a `max_w` x `max_h` box, never enlarging.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let ratio = (max_w as f64 / width as f64)
        .min(max_h as f64 / height as f64)
        .min(1.0);
    let w = ((width as f64 * ratio) as u32).max(1);
    let h = ((height as f64 * ratio) as u32).max(1);
    (w, h)
}

/// A screenshot PNG in the local temp directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    path: PathBuf,
}

impl ScreenshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot.png".to_string())
    }

    pub fn dimensions(&self) -> AdbResult<(u32, u32)> {
        Ok(image::image_dimensions(&self.path)?)
    }

    /// PNG bytes of the screenshot scaled to fit the box (Lanczos3).
    pub fn preview_png(&self, max_w: u32, max_h: u32) -> AdbResult<Vec<u8>> {
        let img = image::open(&self.path)?;
        let (w, h) = fit_within(img.width(), img.height(), max_w, max_h);
        let preview = if (w, h) == (img.width(), img.height()) {
            img
        } else {
            img.resize_exact(w, h, FilterType::Lanczos3)
        };
        let mut buf = Cursor::new(Vec::new());
        preview.write_to(&mut buf, ImageFormat::Png)?;
        debug!("Preview {}x{} from {}", w, h, self.path.display());
        Ok(buf.into_inner())
    }

    /// Copy the screenshot to a user-chosen file.
    pub async fn save_to(&self, dest: &Path) -> AdbResult<()> {
        tokio::fs::copy(&self.path, dest).await?;
        Ok(())
    }

    /// Delete the temp file.
    pub fn discard(self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Could not delete {}: {e}", self.path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_within(100, 50, 800, 600), (100, 50));
        assert_eq!(fit_within(1080, 2400, 400, 600), (270, 600));
        assert_eq!(fit_within(2400, 1080, 400, 600), (400, 180));
        assert_eq!(fit_within(0, 10, 100, 100), (0, 10));
    }

    #[test]
    fn preview_save_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot_test.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(120, 240, |x, y| Rgb([x as u8, y as u8, 0]));
        img.save(&path).unwrap();

        let shot = ScreenshotFile::new(&path);
        assert_eq!(shot.file_name(), "screenshot_test.png");
        assert_eq!(shot.dimensions().unwrap(), (120, 240));

        let png = shot.preview_png(60, 60).unwrap();
        let preview = image::load_from_memory(&png).unwrap();
        assert_eq!((preview.width(), preview.height()), (30, 60));

        let copy = dir.path().join("kept.png");
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(shot.save_to(&copy)).unwrap();
        assert!(copy.exists());

        shot.discard();
        assert!(!path.exists());
        assert!(copy.exists());
    }
}

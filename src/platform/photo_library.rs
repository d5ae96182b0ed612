//! Photo library collaborator.
//!
//! Saving is fire-and-forget: the library writes on a background worker and
//! reports through the handlers of an [`ImageSaver`]. Save failures never
//! reach the filter session.

use crate::core::error::SaveError;
use crate::core::types::{ImageFormat, ImageValue};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A photo that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPhoto {
    /// Where the photo ended up.
    pub path: PathBuf,
    /// Encoding used.
    pub format: ImageFormat,
}

/// Called once when a save succeeds.
pub type SuccessHandler = Box<dyn FnOnce(SavedPhoto) + Send>;

/// Called once when a save fails.
pub type ErrorHandler = Box<dyn FnOnce(SaveError) + Send>;

/// Success and error handlers for one save request.
///
/// A missing handler falls back to logging the outcome.
#[derive(Default)]
pub struct ImageSaver {
    success_handler: Option<SuccessHandler>,
    error_handler: Option<ErrorHandler>,
}

impl ImageSaver {
    /// Saver that only logs the outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success handler.
    pub fn on_success<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(SavedPhoto) + Send + 'static,
    {
        self.success_handler = Some(Box::new(handler));
        self
    }

    /// Set the error handler.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(SaveError) + Send + 'static,
    {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Deliver the outcome of a save to the matching handler.
    pub fn report(self, result: Result<SavedPhoto, SaveError>) {
        match result {
            Ok(photo) => match self.success_handler {
                Some(handler) => handler(photo),
                None => log::info!("Saved photo to {}", photo.path.display()),
            },
            Err(error) => match self.error_handler {
                Some(handler) => handler(error),
                None => log::error!("Failed to save photo: {}", error),
            },
        }
    }
}

/// Destination for finished photos.
pub trait PhotoLibrary {
    /// Start writing `image`; the outcome arrives through `saver`.
    fn write_to_photo_album(&self, image: ImageValue, saver: ImageSaver);
}

/// Photo library backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryPhotoLibrary {
    dir: PathBuf,
    format: ImageFormat,
}

impl DirectoryPhotoLibrary {
    /// Library writing `format`-encoded files into `dir`.
    pub fn new(dir: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write synchronously on the calling thread.
    pub fn write_blocking(&self, image: &ImageValue) -> Result<SavedPhoto, SaveError> {
        write_photo(&self.dir, self.format, image)
    }
}

fn write_photo(dir: &Path, format: ImageFormat, image: &ImageValue) -> Result<SavedPhoto, SaveError> {
    if dir.exists() && !dir.is_dir() {
        return Err(SaveError::NotADirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(|source| SaveError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("instafilter-{}.{}", Uuid::new_v4(), format.extension()));
    image.encode_to(&path, format)?;
    log::debug!("Wrote {}x{} {} to {}", image.width(), image.height(), format, path.display());

    Ok(SavedPhoto { path, format })
}

impl PhotoLibrary for DirectoryPhotoLibrary {
    fn write_to_photo_album(&self, image: ImageValue, saver: ImageSaver) {
        let dir = self.dir.clone();
        let format = self.format;
        rayon::spawn(move || {
            let result = write_photo(&dir, format, &image);
            saver.report(result);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::time::Duration;

    fn photo() -> ImageValue {
        ImageValue::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]))))
    }

    #[test]
    fn test_async_save_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let library = DirectoryPhotoLibrary::new(dir.path().join("album"), ImageFormat::Png);
        let (tx, rx) = channel::bounded(1);

        let err_tx = tx.clone();
        library.write_to_photo_album(
            photo(),
            ImageSaver::new()
                .on_success(move |saved| tx.send(Ok(saved)).unwrap())
                .on_error(move |e| err_tx.send(Err(e.to_string())).unwrap()),
        );

        let saved = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
        assert!(saved.path.starts_with(dir.path().join("album")));
        assert_eq!(saved.path.extension().unwrap(), "png");

        let reloaded = ImageValue::open(&saved.path).unwrap();
        assert_eq!(reloaded.image().to_rgba8().get_pixel(0, 0), &Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_jpeg_extension() {
        let dir = tempfile::tempdir().unwrap();
        let library = DirectoryPhotoLibrary::new(dir.path(), ImageFormat::Jpeg);

        let saved = library.write_blocking(&photo()).unwrap();
        assert_eq!(saved.path.extension().unwrap(), "jpg");
        assert!(saved.path.exists());
    }

    #[test]
    fn test_file_in_place_of_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();

        let library = DirectoryPhotoLibrary::new(&blocker, ImageFormat::Png);
        let (tx, rx) = channel::bounded(1);
        library.write_to_photo_album(photo(), ImageSaver::new().on_error(move |e| tx.send(e).unwrap()));

        let error = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(error, SaveError::NotADirectory(_)));
    }

    #[test]
    fn test_report_without_handlers_only_logs() {
        ImageSaver::new().report(Err(SaveError::NotADirectory(PathBuf::from("/nowhere"))));
    }
}

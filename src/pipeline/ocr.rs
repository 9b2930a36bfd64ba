//! Image OCR: raw image bytes → recognised text.
//!
//! [`ImageOcr`] owns the decode step and delegates recognition to an
//! [`OcrEngine`]. Decoding failures and engine failures are reported as
//! different [`ExtractError`] variants so callers can tell a bad upload from a
//! broken engine.
//!
//! The only engine shipped is [`TesseractEngine`], which drives the
//! `tesseract` command-line tool with its default settings.

use crate::error::{ExtractError, OcrError};
use crate::pipeline::Extractor;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::debug;

/// A text recognition engine.
///
/// Implementations run on the blocking thread pool and may block for as long
/// as recognition takes.
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Recognise text in an RGB image. Empty output is not an error.
    fn run_ocr(&self, image: &RgbImage) -> Result<String, OcrError>;
}

/// Decode-then-recognise adapter used for image uploads and for rendered
/// PDF pages.
#[derive(Clone)]
pub struct ImageOcr {
    engine: Arc<dyn OcrEngine>,
}

impl ImageOcr {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// Decode `bytes` into 3-channel RGB and run the engine on it.
    pub fn recognize(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ExtractError::Decode(e.to_string()))?
            .to_rgb8();

        debug!(
            engine = self.engine.name(),
            "Running OCR on {}x{} image",
            image.width(),
            image.height()
        );

        Ok(self.engine.run_ocr(&image)?)
    }
}

impl Extractor for ImageOcr {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        self.recognize(bytes)
    }
}

/// Tesseract via its command-line interface.
///
/// The image is written as PNG into a scratch directory and passed as
/// `tesseract <image> stdout`. No `-l` or `--psm` flags are given.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether the binary can be executed at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!(
                    "tesseract exited with {}: {}",
                    output.status,
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::EngineNotAvailable(format!(
                    "'{}' not found (install tesseract-ocr)",
                    self.binary.display()
                )))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn run_ocr(&self, image: &RgbImage) -> Result<String, OcrError> {
        let scratch = TempDir::new()?;
        let path = scratch.path().join("input.png");
        image
            .save(&path)
            .map_err(|e| OcrError::Image(e.to_string()))?;
        self.run_tesseract(&path)
    }
}

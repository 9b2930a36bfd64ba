//! Intake dispatcher: classify each upload, run its adapter, collect results.
//!
//! ## Error policy
//!
//! * An adapter error (bad image, corrupt PDF, OCR failure) is recorded in
//!   that file's [`FileResult`] and the next file is processed.
//! * An **unsupported** file aborts the whole request with
//!   [`IntakeError::UnsupportedFileType`]. Files before it have already been
//!   extracted but their results are dropped, and files after it are never
//!   touched.
//!
//! Files are processed one at a time, in upload order. Each extraction runs
//! on tokio's blocking pool because pdfium and tesseract block for the whole
//! duration of the call.

use crate::config::ServiceConfig;
use crate::error::{ExtractError, IntakeError};
use crate::output::{ExtractResponse, FileResult, UploadedFile};
use crate::pipeline::classify::{classify, FileKind};
use crate::pipeline::ocr::{ImageOcr, TesseractEngine};
use crate::pipeline::pdf::PdfExtractor;
use crate::pipeline::Extractor;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Routes uploads to the PDF and image adapters.
#[derive(Clone)]
pub struct Intake {
    pdf: Arc<dyn Extractor>,
    image: Arc<dyn Extractor>,
}

impl Intake {
    /// Tesseract for OCR, pdfium for PDFs, both configured from `config`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let ocr = ImageOcr::new(Arc::new(TesseractEngine::new(config.tesseract_cmd.clone())));
        let pdf = PdfExtractor::new(ocr.clone(), config.dpi, config.pdfium_lib_path.clone());
        Self::with_extractors(Arc::new(pdf), Arc::new(ocr))
    }

    /// Use caller-supplied adapters.
    pub fn with_extractors(pdf: Arc<dyn Extractor>, image: Arc<dyn Extractor>) -> Self {
        Self { pdf, image }
    }

    /// Extract every file, in order.
    pub async fn handle(&self, files: Vec<UploadedFile>) -> Result<ExtractResponse, IntakeError> {
        if files.is_empty() {
            return Err(IntakeError::NoFiles);
        }

        let total = files.len();
        let mut results = Vec::with_capacity(total);

        for (idx, file) in files.into_iter().enumerate() {
            let extractor = match classify(&file.filename, &file.content_type) {
                FileKind::Pdf => Arc::clone(&self.pdf),
                FileKind::Image => Arc::clone(&self.image),
                FileKind::Unsupported => {
                    warn!(
                        "Rejecting request at file {}/{}: unsupported type '{}' ({})",
                        idx + 1,
                        total,
                        file.filename,
                        file.content_type
                    );
                    return Err(IntakeError::UnsupportedFileType {
                        filename: file.filename,
                        content_type: file.content_type,
                    });
                }
            };

            let start = Instant::now();
            let UploadedFile { filename, data, .. } = file;
            let size = data.len();

            let outcome = tokio::task::spawn_blocking(move || extractor.extract(&data))
                .await
                .unwrap_or_else(|e| {
                    Err(ExtractError::Internal(format!("extraction task panicked: {}", e)))
                });

            let result = match outcome {
                Ok(text) => {
                    info!(
                        "Extracted '{}' ({} bytes → {} chars) in {:?}",
                        filename,
                        size,
                        text.len(),
                        start.elapsed()
                    );
                    FileResult::success(filename, text)
                }
                Err(e) => {
                    warn!("Extraction failed for '{}': {}", filename, e);
                    FileResult::failure(filename, e.to_string())
                }
            };
            results.push(result);
        }

        Ok(ExtractResponse { files: results })
    }
}

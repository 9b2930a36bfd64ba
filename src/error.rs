//! Error types for the content-analyzer library.
//!
//! Errors are layered by how far they are allowed to travel:
//!
//! * [`IntakeError`] — **Request-fatal**: the whole `/extract` request is
//!   rejected with a client error (unsupported file type, empty or malformed
//!   upload). No partial results are returned.
//!
//! * [`ExtractError`] — **Per-file**: one upload could not be read (bad image
//!   bytes, corrupt PDF, OCR engine failure). Stored in the file's
//!   [`crate::output::FileResult::error`]; the remaining files still run.
//!
//! * [`PageError`] — **Per-page**: the OCR fallback for a single PDF page
//!   failed. Rendered inline as placeholder text; the file still succeeds.
//!
//! * [`AnalysisError`] — the hosted model call failed. Surfaced as a server
//!   error; there is no degraded mode.

use thiserror::Error;

/// Request-level failures of the intake dispatcher.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A file matched neither the PDF nor the image classification.
    #[error("unsupported file type: {filename} ({content_type})")]
    UnsupportedFileType {
        filename: String,
        content_type: String,
    },

    /// The multipart form carried no file fields.
    #[error("no files uploaded")]
    NoFiles,

    /// The multipart body could not be read.
    #[error("malformed upload: {0}")]
    Multipart(String),

    /// The request body exceeded the configured upload limit.
    #[error("upload too large: {0}")]
    PayloadTooLarge(String),
}

/// Failure to extract text from one uploaded file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The bytes are not a decodable raster image.
    #[error("cannot open image: {0}")]
    Decode(String),

    /// The bytes are not a readable PDF document.
    #[error("cannot open pdf: {0}")]
    Open(String),

    /// The OCR engine ran but failed.
    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// PDFium could not be loaded.
    #[error(
        "PDF engine unavailable: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or install libpdfium system-wide."
    )]
    EngineUnavailable(String),

    /// Unexpected internal error (e.g. a panicked worker task).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure of the render-and-recognise fallback for a single PDF page.
///
/// The `Display` text is what ends up inside the
/// `[could not parse page: …]` placeholder, so it carries the cause only;
/// the page number is already part of the chunk header.
#[derive(Debug, Error)]
pub enum PageError {
    /// PDFium could not rasterise the page.
    #[error("rendering failed: {0}")]
    Render(String),

    /// The rendered bitmap could not be PNG-encoded.
    #[error("image encoding failed: {0}")]
    Encode(String),

    /// The Image OCR Adapter rejected the rendered page.
    #[error(transparent)]
    Recognize(#[from] ExtractError),
}

/// Errors reported by an [`crate::pipeline::ocr::OcrEngine`].
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine binary or library is missing.
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    /// The engine ran and reported a failure.
    #[error("OCR failed: {0}")]
    Failed(String),

    /// The image could not be handed to the engine.
    #[error("OCR input error: {0}")]
    Image(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the analysis passthrough.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No provider could be built (missing API key, unknown provider name).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The provider call itself failed.
    #[error("LLM API error: {message}")]
    Api { message: String },
}

/// Builder validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

//! Extraction and analysis stages.
//!
//! ## Data Flow
//!
//! ```text
//!            ┌─ pdf ──▶ render ──(no text layer)──▶ encode ──▶ ocr
//! classify ──┤
//!            └─ image ─────────────────────────────────────────▶ ocr
//!
//! text ──▶ llm (prompts::analysis_prompt) ──▶ hosted model
//! ```
//!
//! 1. [`classify`] — route an upload by extension / content-type
//! 2. [`pdf`]      — per-page native text with OCR fallback and placeholders
//! 3. [`render`]   — pdfium binding, text layer, rasterisation (blocking)
//! 4. [`encode`]   — rendered page → PNG bytes
//! 5. [`ocr`]      — decode to RGB and hand to the OCR engine
//! 6. [`llm`]      — the analysis passthrough; the only stage with network I/O

pub mod classify;
pub mod encode;
pub mod llm;
pub mod ocr;
pub mod pdf;
pub mod render;

use crate::error::ExtractError;

/// Turns the raw bytes of one upload into text.
///
/// Implemented by [`ocr::ImageOcr`] and [`pdf::PdfExtractor`]. Calls block;
/// the dispatcher runs them on tokio's blocking pool.
pub trait Extractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

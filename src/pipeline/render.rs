//! PDFium access: library binding, document opening, per-page text and
//! rasterisation.
//!
//! Everything in this module is blocking. Callers run it inside
//! `tokio::task::spawn_blocking` (see [`crate::intake`]), since pdfium keeps
//! thread-local state and rendering a page at 300 DPI takes long enough to
//! stall an async worker.
//!
//! ## Library lookup
//!
//! 1. An explicit path (`--pdfium-lib` / `PDFIUM_LIB_PATH`)
//! 2. `libpdfium` next to the working directory
//! 3. The system library search path

use crate::error::{ExtractError, PageError};
use crate::output::PageResult;
use crate::pipeline::ocr::ImageOcr;
use crate::pipeline::pdf::{extract_pages, RenderablePage};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// PDF user space is measured in points, 72 per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Bind to a pdfium shared library.
pub fn bind_pdfium(lib_path: Option<&Path>) -> Result<Pdfium, ExtractError> {
    let bindings = match lib_path {
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractError::EngineUnavailable(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Open `bytes` as a PDF and extract every page in order.
///
/// Fails only if the document cannot be opened; page-level problems are
/// folded into the returned [`PageResult`]s.
pub fn extract_document(
    pdfium: &Pdfium,
    bytes: &[u8],
    ocr: &ImageOcr,
    dpi: u32,
) -> Result<Vec<PageResult>, ExtractError> {
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| ExtractError::Open(format!("{:?}", e)))?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    Ok(extract_pages(pages.iter(), ocr, dpi))
}

impl RenderablePage for PdfPage<'_> {
    fn native_text(&self) -> Option<String> {
        match self.text() {
            Ok(text) => Some(text.all()),
            Err(e) => {
                debug!("Text layer unreadable, treating page as image-only: {:?}", e);
                None
            }
        }
    }

    fn render(&self, dpi: u32) -> Result<DynamicImage, PageError> {
        let render_config =
            PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);

        let bitmap = self
            .render_with_config(&render_config)
            .map_err(|e| PageError::Render(format!("{:?}", e)))?;

        let image = bitmap.as_image();
        debug!("Rendered page → {}x{} px", image.width(), image.height());
        Ok(image)
    }
}

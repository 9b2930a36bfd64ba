//! PDF extraction: native text layer first, OCR fallback per page.
//!
//! ## Per-page policy
//!
//! 1. Native text that is non-empty after trimming is taken verbatim.
//! 2. Otherwise the page is rendered, PNG-encoded and passed through
//!    [`ImageOcr::recognize`], exactly like an uploaded image.
//! 3. If step 2 fails for any reason, the page gets a placeholder and
//!    extraction moves on. One unreadable page never costs the others.
//!
//! The policy is written against [`RenderablePage`] rather than pdfium's
//! page type, so it can be exercised without a pdfium library.

use crate::error::{ExtractError, PageError};
use crate::output::{PageResult, PageSource};
use crate::pipeline::ocr::ImageOcr;
use crate::pipeline::{encode, render, Extractor};
use image::DynamicImage;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Separator between page chunks in the assembled text.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// The two things extraction needs from a page.
pub trait RenderablePage {
    /// Text from the page's text layer, if it could be read.
    fn native_text(&self) -> Option<String>;

    /// Rasterise the page at `dpi`.
    fn render(&self, dpi: u32) -> Result<DynamicImage, PageError>;
}

/// Extract every page, in order. Page numbers start at 1.
pub fn extract_pages<P: RenderablePage>(
    pages: impl IntoIterator<Item = P>,
    ocr: &ImageOcr,
    dpi: u32,
) -> Vec<PageResult> {
    pages
        .into_iter()
        .enumerate()
        .map(|(idx, page)| extract_page(idx + 1, &page, ocr, dpi))
        .collect()
}

fn extract_page<P: RenderablePage>(
    page_num: usize,
    page: &P,
    ocr: &ImageOcr,
    dpi: u32,
) -> PageResult {
    if let Some(text) = page.native_text().filter(|t| !t.trim().is_empty()) {
        debug!("Page {}: {} chars of native text", page_num, text.len());
        return PageResult {
            page_num,
            source: PageSource::NativeText,
            text,
        };
    }

    match ocr_page(page, ocr, dpi) {
        Ok(text) => {
            debug!("Page {}: OCR produced {} chars", page_num, text.len());
            PageResult {
                page_num,
                source: PageSource::OcrFallback,
                text,
            }
        }
        Err(e) => {
            warn!("Page {}: OCR fallback failed: {}", page_num, e);
            PageResult {
                page_num,
                source: PageSource::ExtractionError,
                text: format!("[could not parse page: {}]", e),
            }
        }
    }
}

fn ocr_page<P: RenderablePage>(page: &P, ocr: &ImageOcr, dpi: u32) -> Result<String, PageError> {
    let image = page.render(dpi)?;
    let png = encode::encode_png(&image).map_err(|e| PageError::Encode(e.to_string()))?;
    Ok(ocr.recognize(&png)?)
}

/// Join page chunks with a blank line. No pages → empty string.
pub fn assemble(pages: &[PageResult]) -> String {
    pages
        .iter()
        .map(PageResult::to_chunk)
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// PDF adapter used by the intake dispatcher.
#[derive(Clone)]
pub struct PdfExtractor {
    ocr: ImageOcr,
    dpi: u32,
    pdfium_lib_path: Option<PathBuf>,
}

impl PdfExtractor {
    pub fn new(ocr: ImageOcr, dpi: u32, pdfium_lib_path: Option<PathBuf>) -> Self {
        Self {
            ocr,
            dpi,
            pdfium_lib_path,
        }
    }
}

impl Extractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let pdfium = render::bind_pdfium(self.pdfium_lib_path.as_deref())?;
        let pages = render::extract_document(&pdfium, bytes, &self.ocr, self.dpi)?;
        Ok(assemble(&pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::pipeline::ocr::OcrEngine;
    use image::{Rgb, RgbImage};
    use std::cell::Cell;
    use std::sync::Arc;

    struct FakePage {
        native: Option<&'static str>,
        renders: bool,
        rendered_at: Cell<Option<u32>>,
    }

    impl FakePage {
        fn text(s: &'static str) -> Self {
            Self {
                native: Some(s),
                renders: true,
                rendered_at: Cell::new(None),
            }
        }

        fn scanned() -> Self {
            Self {
                native: None,
                renders: true,
                rendered_at: Cell::new(None),
            }
        }

        fn broken() -> Self {
            Self {
                native: None,
                renders: false,
                rendered_at: Cell::new(None),
            }
        }
    }

    impl RenderablePage for &FakePage {
        fn native_text(&self) -> Option<String> {
            self.native.map(str::to_string)
        }

        fn render(&self, dpi: u32) -> Result<DynamicImage, PageError> {
            self.rendered_at.set(Some(dpi));
            if self.renders {
                Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 6, Rgb([255, 255, 255]))))
            } else {
                Err(PageError::Render("bitmap allocation failed".into()))
            }
        }
    }

    struct FixedOcr(Result<&'static str, &'static str>);

    impl OcrEngine for FixedOcr {
        fn name(&self) -> &str {
            "fixed"
        }

        fn run_ocr(&self, _image: &RgbImage) -> Result<String, OcrError> {
            self.0
                .map(str::to_string)
                .map_err(|e| OcrError::Failed(e.to_string()))
        }
    }

    fn ocr(reply: Result<&'static str, &'static str>) -> ImageOcr {
        ImageOcr::new(Arc::new(FixedOcr(reply)))
    }

    #[test]
    fn native_text_page_uses_bare_header() {
        let page = FakePage::text("Hello World");
        let pages = extract_pages([&page], &ocr(Ok("unused")), 300);
        assert_eq!(assemble(&pages), "--- page 1 ---\nHello World");
        assert_eq!(page.rendered_at.get(), None, "native page must not be rendered");
    }

    #[test]
    fn native_text_is_kept_verbatim() {
        let page = FakePage::text("  indented\nline two  ");
        let pages = extract_pages([&page], &ocr(Ok("unused")), 300);
        assert_eq!(pages[0].text, "  indented\nline two  ");
    }

    #[test]
    fn whitespace_only_text_falls_back_to_ocr() {
        let page = FakePage::text(" \n\t ");
        let pages = extract_pages([&page], &ocr(Ok("scanned words")), 300);
        assert_eq!(pages[0].source, PageSource::OcrFallback);
        assert_eq!(assemble(&pages), "--- page 1 (ocr) ---\nscanned words");
        assert_eq!(page.rendered_at.get(), Some(300));
    }

    #[test]
    fn render_failure_becomes_placeholder() {
        let page = FakePage::broken();
        let pages = extract_pages([&page], &ocr(Ok("unused")), 300);
        assert_eq!(
            assemble(&pages),
            "--- page 1 (error) ---\n[could not parse page: rendering failed: bitmap allocation failed]"
        );
    }

    #[test]
    fn ocr_failure_becomes_placeholder() {
        let page = FakePage::scanned();
        let pages = extract_pages([&page], &ocr(Err("exit status 1")), 300);
        assert_eq!(pages[0].source, PageSource::ExtractionError);
        assert_eq!(pages[0].text, "[could not parse page: OCR failed: exit status 1]");
    }

    #[test]
    fn failing_page_does_not_stop_later_pages() {
        let a = FakePage::text("first");
        let b = FakePage::broken();
        let c = FakePage::scanned();
        let pages = extract_pages([&a, &b, &c], &ocr(Ok("third")), 150);
        let text = assemble(&pages);
        assert_eq!(
            text,
            "--- page 1 ---\nfirst\n\n\
             --- page 2 (error) ---\n[could not parse page: rendering failed: bitmap allocation failed]\n\n\
             --- page 3 (ocr) ---\nthird"
        );
        assert_eq!(c.rendered_at.get(), Some(150));
    }

    #[test]
    fn textless_document_never_uses_bare_header() {
        let a = FakePage::scanned();
        let b = FakePage::broken();
        let pages = extract_pages([&a, &b], &ocr(Ok("")), 300);
        for p in &pages {
            assert!(p.header().ends_with("(ocr) ---") || p.header().ends_with("(error) ---"));
        }
    }

    #[test]
    fn empty_ocr_output_is_still_an_ocr_page() {
        let page = FakePage::scanned();
        let pages = extract_pages([&page], &ocr(Ok("")), 300);
        assert_eq!(assemble(&pages), "--- page 1 (ocr) ---\n");
    }

    #[test]
    fn empty_document_is_empty_string() {
        let pages = extract_pages(Vec::<&FakePage>::new(), &ocr(Ok("unused")), 300);
        assert!(pages.is_empty());
        assert_eq!(assemble(&pages), "");
    }
}

//! End-to-end tests against the real engines.
//!
//! These need `libpdfium` (via `PDFIUM_LIB_PATH`, `./` or the system path) and
//! a `tesseract` binary on `PATH`. They are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=./libpdfium.so cargo test --test e2e -- --nocapture

use content_analyzer::{
    ExtractError, Extractor, ImageOcr, Intake, PdfExtractor, ServiceConfig, TesseractEngine,
    UploadedFile,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

macro_rules! e2e_skip_unless_enabled {
    () => {
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    };
}

fn pdfium_lib_path() -> Option<PathBuf> {
    std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from)
}

fn pdf_extractor() -> PdfExtractor {
    let ocr = ImageOcr::new(Arc::new(TesseractEngine::new("tesseract")));
    PdfExtractor::new(ocr, 300, pdfium_lib_path())
}

/// Build a single-page PDF, optionally with a Helvetica text run.
///
/// Object offsets are computed so the xref table is valid.
fn build_pdf(text: Option<&str>) -> Vec<u8> {
    let content = match text {
        Some(t) => format!("BT /F1 24 Tf 72 720 Td ({t}) Tj ET"),
        None => String::new(),
    };
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_at = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for off in offsets {
        pdf.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    pdf
}

fn white_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

// ── PDF ──────────────────────────────────────────────────────────────────────

#[test]
fn e2e_pdf_native_text_layer() {
    e2e_skip_unless_enabled!();

    let text = pdf_extractor()
        .extract(&build_pdf(Some("Hello World")))
        .expect("native-text PDF should extract");

    println!("{text}");
    assert!(text.starts_with("--- page 1 ---\n"), "got: {text:?}");
    assert!(text.contains("Hello World"));
}

#[test]
fn e2e_pdf_blank_page_goes_through_ocr() {
    e2e_skip_unless_enabled!();

    let text = pdf_extractor()
        .extract(&build_pdf(None))
        .expect("blank PDF should still produce a page entry");

    println!("{text}");
    assert!(
        text.starts_with("--- page 1 (ocr) ---\n") || text.starts_with("--- page 1 (error) ---\n"),
        "got: {text:?}"
    );
}

#[test]
fn e2e_corrupt_pdf_fails_to_open() {
    e2e_skip_unless_enabled!();

    let err = pdf_extractor()
        .extract(b"%PDF-1.4\nthis is not a real document")
        .unwrap_err();
    assert!(matches!(err, ExtractError::Open(_)), "got: {err:?}");
}

// ── Images ───────────────────────────────────────────────────────────────────

#[test]
fn e2e_blank_image_ocr_yields_no_text() {
    e2e_skip_unless_enabled!();

    let ocr = ImageOcr::new(Arc::new(TesseractEngine::new("tesseract")));
    let text = ocr.recognize(&white_png(200, 100)).expect("tesseract should run");
    assert!(text.trim().is_empty(), "got: {text:?}");
}

// ── Full intake ──────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn e2e_intake_mixed_upload() {
    e2e_skip_unless_enabled!();

    let mut builder = ServiceConfig::builder();
    if let Some(path) = pdfium_lib_path() {
        builder = builder.pdfium_lib_path(path);
    }
    let intake = Intake::from_config(&builder.build().unwrap());

    let response = intake
        .handle(vec![
            UploadedFile::new("hello.pdf", "application/pdf", build_pdf(Some("Hello World"))),
            UploadedFile::new("broken.jpg", "image/jpeg", b"not a jpeg".to_vec()),
        ])
        .await
        .unwrap();

    assert_eq!(response.files.len(), 2);
    assert!(response.files[0].text.contains("Hello World"));
    assert!(!response.files[0].is_error());
    assert!(response.files[1].is_error());
    assert!(response.files[1]
        .error
        .as_deref()
        .unwrap()
        .starts_with("cannot open image:"));
}

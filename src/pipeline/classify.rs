//! Upload classification by filename extension and content-type.
//!
//! The client-supplied content-type is advisory: a match on either the
//! extension or the content-type is enough. PDF is checked first, so a file
//! named `scan.png` sent as `application/pdf` goes down the PDF path.

/// Which adapter an upload is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Unsupported,
}

/// Extensions routed to the image OCR adapter.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".tiff", ".bmp"];

/// Classify an upload.
pub fn classify(filename: &str, content_type: &str) -> FileKind {
    let name = filename.to_lowercase();

    if name.ends_with(".pdf") || content_type.contains("pdf") {
        FileKind::Pdf
    } else if IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
        || content_type.contains("image")
    {
        FileKind::Image
    } else {
        FileKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_by_extension_any_case() {
        assert_eq!(classify("report.pdf", ""), FileKind::Pdf);
        assert_eq!(classify("REPORT.PDF", ""), FileKind::Pdf);
    }

    #[test]
    fn pdf_by_content_type() {
        assert_eq!(classify("upload", "application/pdf"), FileKind::Pdf);
    }

    #[test]
    fn pdf_wins_over_image() {
        assert_eq!(classify("scan.png", "application/pdf"), FileKind::Pdf);
        assert_eq!(classify("doc.pdf", "image/png"), FileKind::Pdf);
    }

    #[test]
    fn images_by_extension() {
        for name in ["a.png", "b.JPG", "c.jpeg", "d.Tiff", "e.bmp"] {
            assert_eq!(classify(name, ""), FileKind::Image, "{name}");
        }
    }

    #[test]
    fn image_by_content_type() {
        assert_eq!(classify("photo", "image/webp"), FileKind::Image);
    }

    #[test]
    fn tif_and_gif_are_not_listed_extensions() {
        assert_eq!(classify("scan.tif", ""), FileKind::Unsupported);
        assert_eq!(classify("anim.gif", ""), FileKind::Unsupported);
    }

    #[test]
    fn unsupported() {
        assert_eq!(classify("notes.txt", "text/plain"), FileKind::Unsupported);
        assert_eq!(classify("", ""), FileKind::Unsupported);
    }
}

//! Image encoding: rendered `DynamicImage` → in-memory PNG bytes.
//!
//! A rendered PDF page goes through the same decode-then-recognise path as an
//! uploaded image, so it is serialised first. PNG keeps glyph edges intact;
//! JPEG artefacts around text measurably hurt tesseract accuracy.

use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a rendered page as PNG.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;

    debug!(
        "Encoded {}x{} page → {} bytes PNG",
        img.width(),
        img.height(),
        buf.len()
    );

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn encode_small_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let png = encode_png(&img).expect("encode should succeed");
        assert_eq!(&png[..4], b"\x89PNG");
        let decoded = image::load_from_memory(&png).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (10, 10));
    }
}

//! Document-encoding service: wraps a raster in a one-page PDF.
//!
//! The raster is embedded unfiltered as an 8-bit DeviceRGB image and drawn
//! full-bleed over the page, so the document shows exactly the pixels the
//! image exports show.

use image::RgbImage;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use tracing::debug;

use crate::error::{CardError, CardResult};

/// Build a single-page PDF of `page_width`×`page_height` points showing `raster`.
pub fn single_page_pdf(raster: &RgbImage, page_width: f32, page_height: f32) -> CardResult<Vec<u8>> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(CardError::RenderUnavailable("Empty raster".to_string()));
    }
    let width = i32::try_from(raster.width())
        .map_err(|_| CardError::Encoding("Raster too wide for PDF".to_string()))?;
    let height = i32::try_from(raster.height())
        .map_err(|_| CardError::Encoding("Raster too tall for PDF".to_string()))?;

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let page_id = alloc.bump();
    let image_id = alloc.bump();
    let content_id = alloc.bump();
    let image_name = Name(b"Card");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, raster.as_raw());
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    // scale the unit image square up to the full page
    let mut content = Content::new();
    content.save_state();
    content.transform([page_width, 0.0, 0.0, page_height, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    let bytes = pdf.finish();
    debug!(width, height, len = bytes.len(), "Encoded single-page document");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|window| window == needle)
    }

    #[test]
    fn test_pdf_structure() {
        let raster = RgbImage::from_pixel(4, 5, image::Rgb([200, 10, 90]));
        let pdf = single_page_pdf(&raster, 400.0, 500.0).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(find(&pdf, b"/MediaBox [0 0 400 500]").is_some());
        assert!(find(&pdf, b"/Count 1").is_some());
        assert!(find(&pdf, b"/DeviceRGB").is_some());
    }

    #[test]
    fn test_pdf_embeds_raw_pixels() {
        let mut raster = RgbImage::new(3, 2);
        for (i, pixel) in raster.pixels_mut().enumerate() {
            *pixel = image::Rgb([i as u8, 100, 255 - i as u8]);
        }
        let pdf = single_page_pdf(&raster, 400.0, 500.0).unwrap();
        assert!(find(&pdf, raster.as_raw()).is_some());
    }

    #[test]
    fn test_empty_raster_is_unavailable() {
        let err = single_page_pdf(&RgbImage::new(0, 0), 400.0, 500.0).unwrap_err();
        assert!(matches!(err, CardError::RenderUnavailable(_)));
    }
}

//! SVG rasterization for clipboard delivery.
//!
//! Clipboards that cannot carry vector payloads get a PNG instead: the
//! markup is parsed with usvg, scaled to fit a safe area, centered on a
//! transparent square canvas, and encoded. The fixed clipboard geometry,
//! a 128x128 canvas with a 96x96 safe area, matches what paste targets
//! expect from an icon-sized image.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::ExportError;

/// Edge length of the clipboard canvas, in pixels.
pub const CLIPBOARD_CANVAS_SIZE: u32 = 128;

/// Edge length of the centered safe area the icon is scaled to fit.
pub const CLIPBOARD_SAFE_AREA: u32 = 96;

/// Rasterizes markup at the fixed clipboard geometry.
pub fn rasterize_for_clipboard(svg: &str) -> Result<RgbaImage, ExportError> {
    rasterize(svg, CLIPBOARD_CANVAS_SIZE, CLIPBOARD_SAFE_AREA)
}

/// Renders markup onto a transparent `canvas`x`canvas` image, scaled to fit
/// within `safe_area`x`safe_area` (aspect ratio preserved) and centered.
pub fn rasterize(svg: &str, canvas: u32, safe_area: u32) -> Result<RgbaImage, ExportError> {
    let opts = Options::default();
    let tree = Tree::from_str(svg, &opts)?;

    let svg_size = tree.size();
    let scale = safe_area as f32 / svg_size.width().max(svg_size.height());
    let tx = (canvas as f32 - svg_size.width() * scale) / 2.0;
    let ty = (canvas as f32 - svg_size.height() * scale) / 2.0;

    let mut pixmap = Pixmap::new(canvas, canvas)
        .ok_or(ExportError::Canvas { width: canvas, height: canvas })?;
    let transform = Transform::from_scale(scale, scale).post_translate(tx, ty);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Encodes an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let pixel = pixmap.pixel(x, y).unwrap();
            // tiny_skia stores premultiplied alpha.
            let (r, g, b, a) =
                unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
            img.put_pixel(x, y, Rgba([r, g, b, a]));
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#ff0000"/></svg>"##;

    #[test]
    fn rasterize_uses_the_clipboard_geometry() {
        let img = rasterize_for_clipboard(SQUARE_SVG).unwrap();
        assert_eq!(img.width(), CLIPBOARD_CANVAS_SIZE);
        assert_eq!(img.height(), CLIPBOARD_CANVAS_SIZE);
    }

    #[test]
    fn icon_is_centered_with_transparent_margins() {
        let img = rasterize_for_clipboard(SQUARE_SVG).unwrap();
        // Corners sit outside the 96x96 safe area.
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(127, 127).0[3], 0);
        // The center carries the red square.
        let center = img.get_pixel(64, 64);
        assert_eq!(center.0[3], 255);
        assert!(center.0[0] > 200);
    }

    #[test]
    fn non_square_markup_keeps_aspect_ratio() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#00ff00"/></svg>"##;
        let img = rasterize_for_clipboard(svg).unwrap();
        // Wide icon: content fills horizontally inside the safe area but
        // leaves transparent bands above and below.
        assert_eq!(img.get_pixel(64, 20).0[3], 0);
        assert_eq!(img.get_pixel(64, 64).0[3], 255);
    }

    #[test]
    fn malformed_markup_is_a_parse_error() {
        assert!(matches!(rasterize_for_clipboard("not svg"), Err(ExportError::Parse(_))));
    }

    #[test]
    fn encode_png_produces_a_png_signature() {
        let img = rasterize_for_clipboard(SQUARE_SVG).unwrap();
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}

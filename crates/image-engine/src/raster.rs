//! Module grid rasterization.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{Canvas, draw_filled_rect_mut};
use imageproc::rect::Rect;
use qr_codec::ModuleGrid;
use tracing::debug;

use crate::{RasterError, Result};

/// Largest image side we are willing to allocate.
const MAX_SIDE: u64 = 32_768;

/// How modules map to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterStyle {
    /// Pixels per module side.
    pub box_size: u32,

    /// Quiet zone width in modules, on every side.
    pub border: u32,

    /// Colour of dark modules.
    pub foreground: Rgb<u8>,

    /// Colour of light modules and the quiet zone.
    pub background: Rgb<u8>,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 5,
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

impl RasterStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box_size(mut self, val: u32) -> Self {
        self.box_size = val;
        self
    }

    pub fn with_border(mut self, val: u32) -> Self {
        self.border = val;
        self
    }

    pub fn with_foreground(mut self, val: Rgb<u8>) -> Self {
        self.foreground = val;
        self
    }

    pub fn with_background(mut self, val: Rgb<u8>) -> Self {
        self.background = val;
        self
    }

    fn is_greyscale(&self) -> bool {
        let grey = |c: Rgb<u8>| c.0[0] == c.0[1] && c.0[1] == c.0[2];
        grey(self.foreground) && grey(self.background)
    }
}

/// Output side length in pixels: `(modules + 2 * border) * box_size`.
pub fn image_side(modules: usize, style: &RasterStyle) -> Result<u32> {
    if style.box_size == 0 {
        return Err(RasterError::InvalidBoxSize);
    }
    let side = (modules as u64 + 2 * u64::from(style.border)) * u64::from(style.box_size);
    if side > MAX_SIDE {
        return Err(RasterError::TooLarge(side));
    }
    Ok(side as u32)
}

/// Render `grid` as a square image.
///
/// Produces an 8-bit greyscale image when both colours are grey, RGB otherwise.
pub fn render(grid: &ModuleGrid, style: &RasterStyle) -> Result<DynamicImage> {
    let side = image_side(grid.size(), style)?;
    debug!(
        modules = grid.size(),
        box_size = style.box_size,
        border = style.border,
        side,
        "Rendering QR grid"
    );

    let img = if style.is_greyscale() {
        let mut canvas = GrayImage::from_pixel(side, side, Luma([style.background.0[0]]));
        paint_dark_modules(&mut canvas, grid, style, Luma([style.foreground.0[0]]));
        DynamicImage::ImageLuma8(canvas)
    } else {
        let mut canvas = RgbImage::from_pixel(side, side, style.background);
        paint_dark_modules(&mut canvas, grid, style, style.foreground);
        DynamicImage::ImageRgb8(canvas)
    };
    Ok(img)
}

fn paint_dark_modules<C: Canvas>(canvas: &mut C, grid: &ModuleGrid, style: &RasterStyle, dark: C::Pixel) {
    let offset = style.border * style.box_size;
    for (y, row) in grid.rows().enumerate() {
        for (x, _) in row.iter().enumerate().filter(|(_, m)| **m) {
            let px = offset + x as u32 * style.box_size;
            let py = offset + y as u32 * style.box_size;
            let rect = Rect::at(px as i32, py as i32).of_size(style.box_size, style.box_size);
            draw_filled_rect_mut(canvas, rect, dark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: usize) -> ModuleGrid {
        let mut grid = ModuleGrid::new(size);
        for y in 0..size {
            for x in 0..size {
                grid.set(x, y, (x + y) % 2 == 0);
            }
        }
        grid
    }

    #[test]
    fn test_image_side_formula() {
        for (n, s, b) in [(21, 10, 5), (21, 1, 0), (177, 3, 4), (25, 7, 2)] {
            let style = RasterStyle::new().with_box_size(s).with_border(b);
            let img = render(&checker(n), &style).unwrap();
            let expected = (n as u32 + 2 * b) * s;
            assert_eq!((img.width(), img.height()), (expected, expected));
        }
    }

    #[test]
    fn test_zero_box_size_rejected() {
        let style = RasterStyle::new().with_box_size(0);
        assert!(matches!(
            render(&checker(21), &style),
            Err(RasterError::InvalidBoxSize)
        ));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let style = RasterStyle::new().with_box_size(1000);
        assert!(matches!(
            image_side(177, &style),
            Err(RasterError::TooLarge(_))
        ));
    }

    #[test]
    fn test_modules_painted_as_blocks() {
        let style = RasterStyle::new().with_box_size(3).with_border(2);
        let img = render(&checker(5), &style).unwrap().to_luma8();

        // quiet zone
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
        assert_eq!(img.get_pixel(5, 5).0[0], 255);
        // module (0, 0) is dark and fills a 3x3 block starting at (6, 6)
        for dy in 0..3 {
            for dx in 0..3 {
                assert_eq!(img.get_pixel(6 + dx, 6 + dy).0[0], 0);
            }
        }
        // module (1, 0) is light
        assert_eq!(img.get_pixel(9, 6).0[0], 255);
        // module (1, 1) is dark
        assert_eq!(img.get_pixel(10, 10).0[0], 0);
    }

    #[test]
    fn test_greyscale_and_colour_output() {
        let grey = render(&checker(3), &RasterStyle::default()).unwrap();
        assert!(matches!(grey, DynamicImage::ImageLuma8(_)));

        let style = RasterStyle::new()
            .with_box_size(1)
            .with_border(1)
            .with_foreground(Rgb([0, 64, 128]))
            .with_background(Rgb([250, 240, 230]));
        let colour = render(&checker(3), &style).unwrap();
        let rgb = colour.as_rgb8().expect("colour styles render as RGB");
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([250, 240, 230]));
        assert_eq!(*rgb.get_pixel(1, 1), Rgb([0, 64, 128]));
        assert_eq!(*rgb.get_pixel(2, 1), Rgb([250, 240, 230]));
    }

    #[test]
    fn test_zero_border_starts_at_origin() {
        let style = RasterStyle::new().with_box_size(2).with_border(0);
        let img = render(&checker(3), &style).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(2, 0).0[0], 255);
    }
}

//! Monochrome frame buffer
//!
//! One bit per pixel, organised as 8-pixel-tall pages of column bytes
//! (bit 0 is the top row of the page). This is the native memory layout
//! of SSD1306/SH1106 controllers, so a driver can stream pages directly.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::Canvas;

/// Frame buffer `W` pixels wide and `PAGES * 8` pixels tall
#[derive(Clone)]
pub struct FrameBuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
}

impl<const W: usize, const PAGES: usize> Default for FrameBuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> FrameBuffer<W, PAGES> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = PAGES * 8;

    /// Create a blank frame
    pub const fn new() -> Self {
        Self {
            pages: [[0; W]; PAGES],
        }
    }

    /// Page `index` as column bytes
    pub fn page(&self, index: usize) -> Option<&[u8; W]> {
        self.pages.get(index)
    }

    /// All pages, top to bottom
    pub fn pages(&self) -> &[[u8; W]; PAGES] {
        &self.pages
    }

    /// Set or clear a pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= W || y >= Self::HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Read a pixel; out-of-range coordinates read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= W || y >= Self::HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Number of lit pixels in row `y`
    pub fn lit_in_row(&self, y: i32) -> usize {
        (0..W as i32).filter(|&x| self.pixel(x, y)).count()
    }
}

impl<const W: usize, const PAGES: usize> OriginDimensions for FrameBuffer<W, PAGES> {
    fn size(&self) -> Size {
        Size::new(W as u32, (PAGES * 8) as u32)
    }
}

impl<const W: usize, const PAGES: usize> DrawTarget for FrameBuffer<W, PAGES> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}

impl<const W: usize, const PAGES: usize> Canvas for FrameBuffer<W, PAGES> {
    fn clear(&mut self) {
        let _ = DrawTarget::clear(self, BinaryColor::Off);
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) {
        let font = if scale <= 1 { &FONT_6X10 } else { &FONT_10X20 };
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self);
    }

    fn size(&self) -> (u32, u32) {
        (W as u32, (PAGES * 8) as u32)
    }
}

//! Display surface traits
//!
//! Defines the capability the display stage consumes.

/// Display surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Drawing primitives on an off-screen frame
///
/// Coordinates are pixels with the origin at the top-left. Anything
/// outside the surface is clipped.
pub trait Canvas {
    /// Blank the whole frame
    fn clear(&mut self);

    /// Draw text with its top-left corner at (`x`, `y`)
    ///
    /// - `scale`: 1 for the small font, 2 or more for the large font
    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str);

    /// Draw a one-pixel line between two points, both inclusive
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Get pixel dimensions as (width, height)
    fn size(&self) -> (u32, u32);
}

/// A physical display
///
/// Async because pushing a frame goes over a bus.
#[allow(async_fn_in_trait)]
pub trait Surface: Canvas {
    /// Bring up the display controller
    async fn init(&mut self) -> Result<(), SurfaceError>;

    /// Send the frame to the display
    async fn present(&mut self) -> Result<(), SurfaceError>;
}

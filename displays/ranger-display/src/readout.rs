//! Distance readout screen
//!
//! Layout on a 128x32 panel:
//!
//! ```text
//! Distance: 20 cm            (row 0, small font)
//!
//!
//! ██████████                 (bottom row, proportional bar)
//! ```

use core::fmt::Write;

use heapless::String;
use ranger_core::config::BarScale;
use ranger_core::Distance;

use crate::backend::Canvas;

/// Label shown when the cycle produced no echo
pub const FAILURE_LABEL: &str = "Falha";

/// Splash shown until the first reading arrives
pub const SPLASH_LABEL: &str = "Ranger";

/// Longest label: "Distance: 4294967295 cm"
pub const LABEL_LEN: usize = 24;

/// What the display shows for one distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readout {
    /// Numeric readout with a bar `bar` pixels long
    Reading { label: String<LABEL_LEN>, bar: u32 },
    /// Failure label only, no bar
    Failure,
}

impl Readout {
    /// Build the readout for `distance`, clamping the bar to `max_width`
    pub fn new(distance: Distance, scale: &BarScale, max_width: u32) -> Self {
        match distance {
            Distance::Cm(cm) => {
                let mut label = String::new();
                // Cannot overflow: LABEL_LEN fits the widest u32
                let _ = write!(label, "Distance: {} cm", cm);
                Readout::Reading {
                    label,
                    bar: scale.bar_length(cm).min(max_width),
                }
            }
            Distance::NoEcho => Readout::Failure,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Readout::Reading { label, .. } => label.as_str(),
            Readout::Failure => FAILURE_LABEL,
        }
    }

    /// Bar length in pixels (zero for the failure screen)
    pub fn bar(&self) -> u32 {
        match self {
            Readout::Reading { bar, .. } => *bar,
            Readout::Failure => 0,
        }
    }
}

/// Redraw the whole frame for `distance`
///
/// Clears, draws the label at the top-left and, for a reading, a bar along
/// the bottom row. Does not present; the caller pushes the frame.
pub fn render_reading<C: Canvas>(canvas: &mut C, distance: Distance, scale: &BarScale) -> Readout {
    let (width, height) = canvas.size();
    let readout = Readout::new(distance, scale, width);

    canvas.clear();
    canvas.draw_text(0, 0, 1, readout.label());

    let bar = readout.bar();
    if bar > 0 && height > 0 {
        let y = height as i32 - 1;
        canvas.draw_line(0, y, bar as i32 - 1, y);
    }

    readout
}

/// Draw the boot splash
pub fn render_splash<C: Canvas>(canvas: &mut C) {
    canvas.clear();
    canvas.draw_text(0, 0, 2, SPLASH_LABEL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Clear,
        Text(i32, i32, u8, String<LABEL_LEN>),
        Line(i32, i32, i32, i32),
    }

    struct Recorder {
        ops: heapless::Vec<Op, 8>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                ops: heapless::Vec::new(),
            }
        }
    }

    impl Canvas for Recorder {
        fn clear(&mut self) {
            self.ops.push(Op::Clear).unwrap();
        }

        fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) {
            let text = String::try_from(text).unwrap();
            self.ops.push(Op::Text(x, y, scale, text)).unwrap();
        }

        fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
            self.ops.push(Op::Line(x0, y0, x1, y1)).unwrap();
        }

        fn size(&self) -> (u32, u32) {
            (128, 32)
        }
    }

    fn text(s: &str) -> String<LABEL_LEN> {
        String::try_from(s).unwrap()
    }

    #[test]
    fn test_twenty_centimetres() {
        let mut canvas = Recorder::new();
        let readout = render_reading(&mut canvas, Distance::Cm(20), &BarScale::DEFAULT);

        assert_eq!(readout.label(), "Distance: 20 cm");
        assert_eq!(readout.bar(), 26);
        assert_eq!(
            canvas.ops.as_slice(),
            &[
                Op::Clear,
                Op::Text(0, 0, 1, text("Distance: 20 cm")),
                Op::Line(0, 31, 25, 31),
            ]
        );
    }

    #[test]
    fn test_failure_draws_label_only() {
        let mut canvas = Recorder::new();
        let readout = render_reading(&mut canvas, Distance::NoEcho, &BarScale::DEFAULT);

        assert_eq!(readout, Readout::Failure);
        assert_eq!(
            canvas.ops.as_slice(),
            &[Op::Clear, Op::Text(0, 0, 1, text(FAILURE_LABEL))]
        );
    }

    #[test]
    fn test_zero_distance_draws_no_bar() {
        let mut canvas = Recorder::new();
        render_reading(&mut canvas, Distance::Cm(0), &BarScale::DEFAULT);
        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Line(..))));
    }

    #[test]
    fn test_far_reading_clamped_to_width() {
        let mut fb = FrameBuffer::<128, 4>::new();
        let readout = render_reading(&mut fb, Distance::Cm(10_000), &BarScale::DEFAULT);

        assert_eq!(readout.bar(), 128);
        assert_eq!(fb.lit_in_row(31), 128);
    }

    #[test]
    fn test_bar_clamped_to_narrow_surface() {
        let mut fb = FrameBuffer::<64, 4>::new();
        let readout = render_reading(&mut fb, Distance::Cm(90), &BarScale::DEFAULT);

        // Scale says 115 px but the surface is 64 wide
        assert_eq!(readout.bar(), 64);
        assert_eq!(fb.lit_in_row(31), 64);
    }

    #[test]
    fn test_redraw_replaces_previous_frame() {
        let mut fb = FrameBuffer::<128, 4>::new();
        render_reading(&mut fb, Distance::Cm(100), &BarScale::DEFAULT);
        render_reading(&mut fb, Distance::NoEcho, &BarScale::DEFAULT);
        assert_eq!(fb.lit_in_row(31), 0);
    }

    #[test]
    fn test_widest_label_fits() {
        let readout = Readout::new(Distance::Cm(u32::MAX), &BarScale::DEFAULT, 128);
        assert_eq!(readout.label(), "Distance: 4294967295 cm");
    }

    #[test]
    fn test_splash() {
        let mut canvas = Recorder::new();
        render_splash(&mut canvas);
        assert_eq!(
            canvas.ops.as_slice(),
            &[Op::Clear, Op::Text(0, 0, 2, text(SPLASH_LABEL))]
        );
    }
}

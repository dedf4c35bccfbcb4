//! Time-of-flight to distance conversion
//!
//! The echo width is the round trip. Sound travels about 0.0343 cm/µs, so
//! one centimetre of range costs about 58.3 µs of echo. Two equivalent
//! formulas are supported:
//!
//! - [`Conversion::Divisor`]: integer `width / 58`, round half up. Resolution
//!   is 1 cm with a systematic error of about 0.5% against 58.3.
//! - [`Conversion::Multiplier`]: `width × 0.01715` in `f32` (the one-way time
//!   times the speed of sound), round half up. `f32` keeps 24 bits of
//!   mantissa, far beyond the sensor's 4 m range.

use crate::capture::EchoCapture;

/// Result of one measurement cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Distance {
    /// Range in whole centimetres
    Cm(u32),
    /// No echo within the window (sentinel)
    NoEcho,
}

impl Distance {
    /// Centimetres, or `None` for the failure sentinel
    pub fn cm(self) -> Option<u32> {
        match self {
            Distance::Cm(cm) => Some(cm),
            Distance::NoEcho => None,
        }
    }

    pub fn is_no_echo(self) -> bool {
        matches!(self, Distance::NoEcho)
    }
}

/// Echo width to centimetre formula
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Conversion {
    /// Divide the round-trip width in µs by this many µs per cm
    Divisor(u32),
    /// Multiply the round-trip width in µs by this many cm per µs
    Multiplier(f32),
}

impl Conversion {
    /// 58 µs of echo per centimetre
    pub const SOUND_DIVISOR: Conversion = Conversion::Divisor(58);

    /// Half of 343 m/s, in cm/µs
    pub const SOUND_MULTIPLIER: Conversion = Conversion::Multiplier(0.01715);

    /// Convert a round-trip width to centimetres, rounding half up
    ///
    /// Non-decreasing in `width_us`. Saturates at `u32::MAX`.
    pub fn centimeters(&self, width_us: u64) -> u32 {
        match *self {
            Conversion::Divisor(divisor) => {
                let divisor = divisor.max(1) as u64;
                let cm = width_us.saturating_add(divisor / 2) / divisor;
                u32::try_from(cm).unwrap_or(u32::MAX)
            }
            // Float to int casts saturate and map NaN to zero
            Conversion::Multiplier(factor) => (width_us as f32 * factor + 0.5) as u32,
        }
    }

    /// Distance for a completed capture
    ///
    /// A falling edge stamped before its rising edge is folded to its
    /// absolute width. This keeps the pipeline running but the value is
    /// likely wrong; callers count these via [`EchoCapture::is_ordered`].
    pub fn distance(&self, capture: &EchoCapture) -> Distance {
        Distance::Cm(self.centimeters(capture.elapsed_us().unsigned_abs()))
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Self::SOUND_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ranger_hal::Timestamp;

    fn capture(start: u64, end: u64) -> EchoCapture {
        EchoCapture::new(Timestamp::from_micros(start), Timestamp::from_micros(end))
    }

    #[test]
    fn test_twenty_centimetres_with_divisor() {
        let echo = capture(1000, 2162);
        assert_eq!(Conversion::SOUND_DIVISOR.distance(&echo), Distance::Cm(20));
    }

    #[test]
    fn test_twenty_centimetres_with_multiplier() {
        let echo = capture(1000, 2162);
        assert_eq!(Conversion::SOUND_MULTIPLIER.distance(&echo), Distance::Cm(20));
    }

    #[test]
    fn test_divisor_rounds_half_up() {
        let conv = Conversion::SOUND_DIVISOR;
        assert_eq!(conv.centimeters(28), 0);
        assert_eq!(conv.centimeters(29), 1);
        assert_eq!(conv.centimeters(58), 1);
        assert_eq!(conv.centimeters(87), 2);
    }

    #[test]
    fn test_misordered_edges_fold_to_absolute_width() {
        let echo = capture(2162, 1000);
        assert!(!echo.is_ordered());
        assert_eq!(Conversion::SOUND_DIVISOR.distance(&echo), Distance::Cm(20));
    }

    #[test]
    fn test_zero_divisor_does_not_panic() {
        assert_eq!(Conversion::Divisor(0).centimeters(42), 42);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(Conversion::Divisor(1).centimeters(u64::MAX), u32::MAX);
        assert_eq!(Conversion::Multiplier(1.0).centimeters(u64::MAX), u32::MAX);
    }

    #[test]
    fn test_sentinel_is_distinct() {
        assert_eq!(Distance::NoEcho.cm(), None);
        assert!(Distance::NoEcho.is_no_echo());
        assert_eq!(Distance::Cm(0).cm(), Some(0));
        assert_ne!(Distance::Cm(0), Distance::NoEcho);
    }

    proptest! {
        #[test]
        fn prop_divisor_is_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let conv = Conversion::SOUND_DIVISOR;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(conv.centimeters(lo) <= conv.centimeters(hi));
        }

        #[test]
        fn prop_multiplier_is_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let conv = Conversion::SOUND_MULTIPLIER;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(conv.centimeters(lo) <= conv.centimeters(hi));
        }

        #[test]
        fn prop_ordered_capture_gives_reading(start in 0u64..1_000_000, width in 1u64..100_000) {
            let echo = capture(start, start + width);
            prop_assert!(echo.is_ordered());
            prop_assert!(Conversion::SOUND_DIVISOR.distance(&echo).cm().is_some());
        }

        #[test]
        fn prop_formulas_agree_over_sensor_range(width in 0u64..24_000) {
            // Up to 4 m the two constants drift apart by just over 2 cm
            let a = Conversion::SOUND_DIVISOR.centimeters(width) as i64;
            let b = Conversion::SOUND_MULTIPLIER.centimeters(width) as i64;
            prop_assert!((a - b).abs() <= 3);
        }
    }
}

//! Configuration
//!
//! The rangefinder has no runtime configuration surface. Everything is a
//! compile-time constant grouped here and validated once at boot.

pub mod types;

pub use types::*;

use crate::distance::Conversion;

/// Timing used by the firmware
pub const TIMING: TimingConfig = TimingConfig::DEFAULT;

/// Bar geometry used by the display stage
pub const BAR_SCALE: BarScale = BarScale::DEFAULT;

/// Which stage paces the trigger
pub const PACING: Pacing = Pacing::SelfGated;

/// Time-of-flight conversion
pub const CONVERSION: Conversion = Conversion::SOUND_DIVISOR;

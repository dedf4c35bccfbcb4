//! Monotonic clock backed by the embassy time driver
//!
//! The embassy-rp time driver runs the RP2040 timer at 1 MHz, so one
//! tick is one microsecond.

use embassy_time::Instant;

use ranger_hal::{Monotonic, Timestamp};

/// Clock reading `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(Instant::now().as_micros())
    }
}

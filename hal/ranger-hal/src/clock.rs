//! Monotonic time source
//!
//! Timestamps are microseconds since boot. The RP2040 timer is a 64-bit
//! 1 MHz counter, so wrap-around is not a practical concern.

use core::ops::Sub;

/// A monotonic instant with microsecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Boot instant
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from microseconds since boot
    pub const fn from_micros(us: u64) -> Self {
        Self(us)
    }

    /// Microseconds since boot
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Signed microseconds from `earlier` to `self`
    ///
    /// Negative when `self` precedes `earlier`. Saturates at the `i64` range.
    pub fn micros_since(self, earlier: Timestamp) -> i64 {
        if self.0 >= earlier.0 {
            i64::try_from(self.0 - earlier.0).unwrap_or(i64::MAX)
        } else {
            i64::try_from(earlier.0 - self.0)
                .map(|d| -d)
                .unwrap_or(i64::MIN)
        }
    }
}

impl Sub for Timestamp {
    type Output = i64;

    fn sub(self, rhs: Timestamp) -> i64 {
        self.micros_since(rhs)
    }
}

/// Monotonic clock
pub trait Monotonic {
    /// Current instant
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_difference() {
        let start = Timestamp::from_micros(1000);
        let end = Timestamp::from_micros(2162);
        assert_eq!(end - start, 1162);
        assert_eq!(start - end, -1162);
        assert_eq!(start - start, 0);
    }

    #[test]
    fn test_difference_saturates() {
        let max = Timestamp::from_micros(u64::MAX);
        assert_eq!(max - Timestamp::ZERO, i64::MAX);
        assert_eq!(Timestamp::ZERO - max, i64::MIN);
    }
}

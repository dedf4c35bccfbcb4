//! Configuration type definitions

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Trigger period is zero
    ZeroPeriod,
    /// Trigger pulse width is zero
    ZeroPulseWidth,
    /// Trigger pulse does not fit inside the period
    PulseTooLong,
    /// Echo window is not shorter than the trigger period
    EchoTimeoutTooLong,
    /// Display settling delay is not shorter than the trigger period
    SettleTooLong,
    /// Bar full-scale distance is zero
    ZeroFullScale,
    /// Bar width is zero
    ZeroWidth,
}

/// Which stage consumes the ready handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// Trigger acquires the handshake before each pulse, measurement
    /// releases it after publishing. At most one cycle is in flight.
    SelfGated,
    /// Trigger fires every period and releases the handshake afterwards;
    /// the display acquires it and refreshes in step with the trigger.
    DisplayPaced,
}

/// Fixed timing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Trigger cadence in milliseconds
    pub trigger_period_ms: u32,
    /// Width of the trigger pulse in microseconds
    pub trigger_pulse_us: u32,
    /// Echo window after the trigger in milliseconds
    pub echo_timeout_ms: u32,
    /// How long the display waits for the handshake (display-paced only)
    pub ready_timeout_ms: u32,
    /// Delay between acquiring the handshake and reading a distance
    pub settle_ms: u32,
    /// How long the display waits for a distance after settling
    pub distance_timeout_ms: u32,
}

impl TimingConfig {
    pub const DEFAULT: TimingConfig = TimingConfig {
        trigger_period_ms: 1000,
        trigger_pulse_us: 10,
        echo_timeout_ms: 100,
        ready_timeout_ms: 100,
        settle_ms: 150,
        distance_timeout_ms: 1000,
    };

    /// How long the measurement stage waits for the next trigger
    ///
    /// Two periods, so a single skipped pulse does not look like a stall.
    pub const fn trigger_wait_ms(&self) -> u32 {
        self.trigger_period_ms.saturating_mul(2)
    }

    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.trigger_pulse_us == 0 {
            return Err(ConfigError::ZeroPulseWidth);
        }
        if self.trigger_pulse_us / 1000 >= self.trigger_period_ms {
            return Err(ConfigError::PulseTooLong);
        }
        // The echo window must close before the next trigger may fire,
        // otherwise the ready handshake is still held at the next period.
        if self.echo_timeout_ms >= self.trigger_period_ms {
            return Err(ConfigError::EchoTimeoutTooLong);
        }
        if self.settle_ms >= self.trigger_period_ms {
            return Err(ConfigError::SettleTooLong);
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Proportional bar geometry
///
/// `full_scale_cm` maps to a bar spanning `width` pixels. These are display
/// choices, not derived from the sensor range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarScale {
    /// Distance drawn as a full-width bar
    pub full_scale_cm: u32,
    /// Bar length clamp in pixels (the surface width)
    pub width: u32,
}

impl BarScale {
    pub const DEFAULT: BarScale = BarScale {
        full_scale_cm: 100,
        width: 128,
    };

    /// Bar length in pixels for `cm`, rounded to nearest and clamped to `width`
    pub fn bar_length(&self, cm: u32) -> u32 {
        if self.full_scale_cm == 0 {
            return self.width;
        }
        let scaled = (cm as u64 * self.width as u64 + self.full_scale_cm as u64 / 2)
            / self.full_scale_cm as u64;
        scaled.min(self.width as u64) as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.full_scale_cm == 0 {
            return Err(ConfigError::ZeroFullScale);
        }
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }
}

impl Default for BarScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(TimingConfig::DEFAULT.validate(), Ok(()));
        assert_eq!(BarScale::DEFAULT.validate(), Ok(()));
    }

    #[test]
    fn test_echo_timeout_must_be_shorter_than_period() {
        let timing = TimingConfig {
            echo_timeout_ms: 1000,
            ..TimingConfig::DEFAULT
        };
        assert_eq!(timing.validate(), Err(ConfigError::EchoTimeoutTooLong));
    }

    #[test]
    fn test_rejects_zero_values() {
        let zero_period = TimingConfig {
            trigger_period_ms: 0,
            ..TimingConfig::DEFAULT
        };
        assert_eq!(zero_period.validate(), Err(ConfigError::ZeroPeriod));

        let zero_pulse = TimingConfig {
            trigger_pulse_us: 0,
            ..TimingConfig::DEFAULT
        };
        assert_eq!(zero_pulse.validate(), Err(ConfigError::ZeroPulseWidth));

        let scale = BarScale {
            full_scale_cm: 0,
            width: 128,
        };
        assert_eq!(scale.validate(), Err(ConfigError::ZeroFullScale));
    }

    #[test]
    fn test_settle_must_fit_in_period() {
        let timing = TimingConfig {
            settle_ms: 1000,
            ..TimingConfig::DEFAULT
        };
        assert_eq!(timing.validate(), Err(ConfigError::SettleTooLong));
    }

    #[test]
    fn test_bar_length_rounds() {
        let scale = BarScale::DEFAULT;
        // 20 cm of 100 cm across 128 px = 25.6 px
        assert_eq!(scale.bar_length(20), 26);
        assert_eq!(scale.bar_length(0), 0);
        assert_eq!(scale.bar_length(100), 128);
    }

    #[test]
    fn test_bar_length_clamps_far_readings() {
        let scale = BarScale::DEFAULT;
        assert_eq!(scale.bar_length(400), 128);
        assert_eq!(scale.bar_length(u32::MAX), 128);
    }

    proptest! {
        #[test]
        fn prop_bar_never_exceeds_width(cm in any::<u32>(), width in 1u32..512, full in 1u32..1000) {
            let scale = BarScale { full_scale_cm: full, width };
            prop_assert!(scale.bar_length(cm) <= width);
        }

        #[test]
        fn prop_bar_is_monotonic(a in 0u32..10_000, b in 0u32..10_000) {
            let scale = BarScale::DEFAULT;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.bar_length(lo) <= scale.bar_length(hi));
        }
    }
}

//! GPIO wrappers
//!
//! `embassy-rp` pin types cannot implement the `ranger-hal` traits directly
//! (both are foreign to this crate), so they are wrapped.

use embassy_rp::gpio::{Input, Level as RpLevel, Output, Pin, Pull};
use embassy_rp::Peri;

use ranger_hal::{Edge, InputPin, Level, OutputPin};

/// Trigger output line, idle low
pub struct TriggerOutput<'d> {
    pin: Output<'d>,
}

impl<'d> TriggerOutput<'d> {
    /// Configure `pin` as a push-pull output driven low
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, RpLevel::Low),
        }
    }
}

impl OutputPin for TriggerOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Echo input line
///
/// Pulled down so a disconnected sensor reads as "no echo" instead of
/// floating into spurious edges.
pub struct EchoInput<'d> {
    pin: Input<'d>,
}

impl<'d> EchoInput<'d> {
    /// Configure `pin` as a pulled-down input
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Down),
        }
    }

    /// Wait for the next rising or falling edge
    ///
    /// Arms the GPIO bank interrupt for both edges; the level is sampled
    /// immediately after wake-up to classify the transition.
    pub async fn next_edge(&mut self) -> Edge {
        self.pin.wait_for_any_edge().await;
        Edge::from_level(self.level())
    }
}

impl InputPin for EchoInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }

    fn level(&self) -> Level {
        Level::from(self.pin.is_high())
    }
}

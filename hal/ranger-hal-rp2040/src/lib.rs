//! RP2040-specific HAL for the Ranger rangefinder
//!
//! This crate wraps `embassy-rp` pins and the `embassy-time` clock in
//! newtypes implementing the shared `ranger-hal` traits:
//!
//! - [`gpio::TriggerOutput`] - push-pull trigger line
//! - [`gpio::EchoInput`] - edge-interrupt capable echo line
//! - [`clock::EmbassyClock`] - 1 MHz monotonic timer

#![no_std]

pub mod clock;
pub mod gpio;

pub use clock::EmbassyClock;
pub use gpio::{EchoInput, TriggerOutput};

// Re-export shared traits from ranger-hal for convenience
pub use ranger_hal::{Edge, InputPin, Level, Monotonic, OutputPin, Timestamp};

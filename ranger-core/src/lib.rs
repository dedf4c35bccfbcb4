//! Board-agnostic core logic for the rangefinder firmware
//!
//! This crate contains the measurement pipeline without any dependency on
//! a specific chip:
//!
//! - Edge capture bookkeeping for the echo interrupt
//! - Time-of-flight to distance conversion
//! - Per-cycle state machine
//! - Trigger and measurement stage logic
//! - Pipeline channels and the ready handshake
//! - Fixed timing configuration

#![no_std]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod cycle;
pub mod distance;
pub mod stages;
pub mod sync;

pub use capture::{EchoCapture, EdgeCapture};
pub use distance::{Conversion, Distance};

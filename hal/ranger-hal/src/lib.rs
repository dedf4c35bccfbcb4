//! Ranger Hardware Abstraction Layer
//!
//! This crate defines the capabilities the measurement pipeline consumes
//! from the board: digital I/O on the trigger and echo lines, and a
//! monotonic microsecond clock. Chip-specific crates implement these
//! traits so the pipeline logic in `ranger-core` stays host testable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ranger-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ranger-core  ──uses──▶  ranger-hal     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ ranger-hal-     │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`clock::Monotonic`] - Microsecond timestamps

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

pub use clock::{Monotonic, Timestamp};
pub use gpio::{Edge, InputPin, Level, OutputPin};

//! Display abstraction and readout rendering for Ranger
//!
//! This crate provides:
//! - `Canvas` / `Surface` traits: drawing primitives plus hardware init/present
//! - `FrameBuffer`: a monochrome page-organised buffer usable by any
//!   SSD1306-style controller, drawable through `embedded-graphics`
//! - `Readout`: the distance screen (label and proportional bar, or the
//!   failure label)
//!
//! # Architecture
//!
//! The display stage renders into a `Canvas` synchronously, then awaits
//! `Surface::present` to push the frame. Only the display stage owns the
//! surface.

#![no_std]

pub mod backend;
pub mod framebuffer;
pub mod readout;

// Re-export key types
pub use backend::{Canvas, Surface, SurfaceError};
pub use framebuffer::FrameBuffer;
pub use readout::{render_reading, render_splash, Readout, FAILURE_LABEL};

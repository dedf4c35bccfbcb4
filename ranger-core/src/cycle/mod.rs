//! Measurement cycle state machine
//!
//! One cycle associates a trigger pulse with at most one echo capture:
//!
//! ```text
//! Idle → Triggered → AwaitingEcho → { Captured | TimedOut } → Published → Idle
//! ```

pub mod events;
pub mod machine;

pub use events::CycleEvent;
pub use machine::{CycleError, CycleState};

//! Embassy async tasks
//!
//! One task per pipeline stage. They share nothing but the static
//! [`Links`](crate::channels::Links).

pub mod display;
pub mod edge_capture;
pub mod measurement;
pub mod trigger;

pub use display::display_task;
pub use edge_capture::edge_capture_task;
pub use measurement::measurement_task;
pub use trigger::trigger_task;

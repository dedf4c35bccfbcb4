//! Pipeline stage logic
//!
//! The firmware tasks own the hardware and the clocks. Everything a stage
//! does in one period, including how long it is willing to wait, is
//! expressed here against the pipeline so it runs on the host too. Time
//! limits come in as futures (`embassy_time::Timer` on the target).

pub mod measurement;
pub mod trigger;

pub use measurement::{CycleReport, MeasurementStage, MeasurementStats};
pub use trigger::{Period, TriggerStage};

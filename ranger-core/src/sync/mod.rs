//! Synchronization between pipeline stages
//!
//! Built on `embassy-sync` primitives, generic over the raw mutex so the
//! firmware can use `CriticalSectionRawMutex` (the echo interrupt preempts
//! the tasks) while host tests use `NoopRawMutex`.

pub mod handoff;
pub mod pipeline;
pub mod ready;

pub use handoff::{publish_latest, Publish};
pub use pipeline::{Pipeline, CAPTURE_QUEUE_DEPTH, DISTANCE_QUEUE_DEPTH};
pub use ready::{CyclePermit, ReadySignal};

//! Inter-task communication
//!
//! The whole pipeline lives in one static, built once at boot and
//! handed to every task by reference. The echo interrupt runs at a
//! higher priority than the other tasks, so everything is guarded by
//! `CriticalSectionRawMutex`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use portable_atomic::{AtomicU32, Ordering};
use static_cell::StaticCell;

use ranger_core::config::{Pacing, PACING};
use ranger_core::sync::Pipeline;

/// Links between the stages
pub type Links = Pipeline<CriticalSectionRawMutex>;

static PIPELINE: StaticCell<Links> = StaticCell::new();

/// Capture notifications dropped because the queue was full
pub static DROPPED_CAPTURES: AtomicU32 = AtomicU32::new(0);

/// Echo edges that did not belong to a rising/falling pair
pub static STRAY_EDGES: AtomicU32 = AtomicU32::new(0);

/// Build the pipeline
///
/// In the self-gated variant the handshake starts present so the first
/// trigger can fire without waiting for a cycle that never ran.
pub fn init() -> &'static Links {
    let links = PIPELINE.init(Pipeline::new());
    if PACING == Pacing::SelfGated {
        links.ready().release();
    }
    links
}

/// Count a capture notification dropped from interrupt context
pub fn note_dropped_capture() {
    DROPPED_CAPTURES.fetch_add(1, Ordering::Relaxed);
}

pub fn dropped_captures() -> u32 {
    DROPPED_CAPTURES.load(Ordering::Relaxed)
}

pub fn stray_edges() -> u32 {
    STRAY_EDGES.load(Ordering::Relaxed)
}

//! Echo edge capture
//!
//! Runs on the interrupt executor so edge timestamps are taken with
//! minimal latency. Rising edge records the start; falling edge completes
//! the pair and queues it for the measurement stage without blocking.

use defmt::*;
use portable_atomic::Ordering;

use ranger_core::EdgeCapture;
use ranger_hal_rp2040::{EchoInput, EmbassyClock, Monotonic};

use crate::channels::{self, Links, STRAY_EDGES};

#[embassy_executor::task]
pub async fn edge_capture_task(mut echo: EchoInput<'static>, links: &'static Links) {
    info!("Edge capture task started");

    let clock = EmbassyClock;
    let mut capture = EdgeCapture::new();

    loop {
        let edge = echo.next_edge().await;
        let at = clock.now();

        if let Some(pair) = capture.on_edge(edge, at) {
            if !links.notify_capture(pair) {
                channels::note_dropped_capture();
            }
        }

        STRAY_EDGES.store(capture.stray_edges(), Ordering::Relaxed);
    }
}

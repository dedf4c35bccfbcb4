//! Channels and signals linking the pipeline stages
//!
//! ```text
//! Trigger ──triggered──▶ Measurement ──distances──▶ Display
//!    │                        ▲
//!    └─(pulse)─▶ EdgeCapture ─┘ capture_ready
//! ```
//!
//! Constructed once at init and shared by reference with every stage.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use ranger_hal::Timestamp;

use super::handoff::{publish_latest, Publish};
use super::ready::ReadySignal;
use crate::capture::EchoCapture;
use crate::distance::Distance;

/// Capture-ready queue capacity
pub const CAPTURE_QUEUE_DEPTH: usize = 1;

/// Distance queue capacity
pub const DISTANCE_QUEUE_DEPTH: usize = 1;

/// All inter-stage links
pub struct Pipeline<M: RawMutex> {
    /// Edge capture → measurement
    capture_ready: Channel<M, EchoCapture, CAPTURE_QUEUE_DEPTH>,
    /// Measurement → display
    distances: Channel<M, Distance, DISTANCE_QUEUE_DEPTH>,
    /// Cycle handshake
    ready: ReadySignal<M>,
    /// Trigger → measurement, carrying the pulse instant
    triggered: Signal<M, Timestamp>,
}

impl<M: RawMutex> Pipeline<M> {
    pub const fn new() -> Self {
        Self {
            capture_ready: Channel::new(),
            distances: Channel::new(),
            ready: ReadySignal::new(),
            triggered: Signal::new(),
        }
    }

    /// Queue a completed capture from interrupt context
    ///
    /// Never blocks. Returns `false` when the queue is full and the
    /// notification was dropped; that cycle then times out.
    pub fn notify_capture(&self, capture: EchoCapture) -> bool {
        self.capture_ready.try_send(capture).is_ok()
    }

    /// Wait for the next capture notification
    pub async fn next_capture(&self) -> EchoCapture {
        self.capture_ready.receive().await
    }

    /// Discard pending capture notifications, returning how many were dropped
    pub fn drain_captures(&self) -> usize {
        let mut drained = 0;
        while self.capture_ready.try_receive().is_ok() {
            drained += 1;
        }
        drained
    }

    pub fn pending_captures(&self) -> usize {
        self.capture_ready.len()
    }

    /// Publish a distance without blocking, replacing any unread one
    pub fn publish(&self, distance: Distance) -> Publish {
        publish_latest(&self.distances, distance)
    }

    /// Wait for the next published distance
    pub async fn next_distance(&self) -> Distance {
        self.distances.receive().await
    }

    pub fn pending_distances(&self) -> usize {
        self.distances.len()
    }

    /// The cycle handshake
    pub fn ready(&self) -> &ReadySignal<M> {
        &self.ready
    }

    /// Tell the measurement stage a pulse was fired at `at`
    pub fn announce_trigger(&self, at: Timestamp) {
        self.triggered.signal(at);
    }

    /// Wait for the next trigger announcement
    pub async fn next_trigger(&self) -> Timestamp {
        self.triggered.wait().await
    }
}

impl<M: RawMutex> Default for Pipeline<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    fn capture(start: u64, end: u64) -> EchoCapture {
        EchoCapture::new(Timestamp::from_micros(start), Timestamp::from_micros(end))
    }

    #[test]
    fn test_capture_queue_drops_when_full() {
        let pipeline: Pipeline<NoopRawMutex> = Pipeline::new();
        assert!(pipeline.notify_capture(capture(0, 100)));
        assert!(!pipeline.notify_capture(capture(200, 300)));
        assert_eq!(pipeline.pending_captures(), CAPTURE_QUEUE_DEPTH);

        // The first notification survives; the overflow was dropped
        assert_eq!(block_on(pipeline.next_capture()), capture(0, 100));
        assert_eq!(pipeline.pending_captures(), 0);
    }

    #[test]
    fn test_drain_discards_stale_captures() {
        let pipeline: Pipeline<NoopRawMutex> = Pipeline::new();
        pipeline.notify_capture(capture(0, 100));
        assert_eq!(pipeline.drain_captures(), 1);
        assert_eq!(pipeline.drain_captures(), 0);
    }

    #[test]
    fn test_distance_queue_keeps_newest() {
        let pipeline: Pipeline<NoopRawMutex> = Pipeline::new();
        assert_eq!(pipeline.publish(Distance::Cm(10)), Publish::Delivered);
        assert_eq!(pipeline.publish(Distance::NoEcho), Publish::ReplacedStale);
        assert_eq!(pipeline.pending_distances(), DISTANCE_QUEUE_DEPTH);
        assert_eq!(block_on(pipeline.next_distance()), Distance::NoEcho);
    }

    #[test]
    fn test_trigger_announcement() {
        let pipeline: Pipeline<NoopRawMutex> = Pipeline::new();
        pipeline.announce_trigger(Timestamp::from_micros(5));
        assert_eq!(block_on(pipeline.next_trigger()), Timestamp::from_micros(5));
    }

    #[test]
    fn test_works_with_critical_section_mutex() {
        static PIPELINE: Pipeline<CriticalSectionRawMutex> = Pipeline::new();
        assert!(PIPELINE.notify_capture(capture(0, 58)));
        assert_eq!(PIPELINE.drain_captures(), 1);
    }
}

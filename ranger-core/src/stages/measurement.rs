//! Measurement stage
//!
//! The only place a cycle is declared a success or a failure. The firmware
//! task waits for the trigger announcement, opens the echo window, and
//! hands whatever arrived (or nothing) to [`MeasurementStage::resolve`].

use core::future::Future;
use core::pin::pin;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;

use ranger_hal::Timestamp;

use crate::capture::EchoCapture;
use crate::config::Pacing;
use crate::cycle::{CycleError, CycleEvent, CycleState};
use crate::distance::{Conversion, Distance};
use crate::sync::{Pipeline, Publish};

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementStats {
    /// Cycles published and closed
    pub cycles: u32,
    /// Cycles resolved with a capture
    pub echoes: u32,
    /// Cycles resolved with the failure sentinel
    pub timeouts: u32,
    /// Captures whose falling edge did not follow the rising edge
    pub misordered: u32,
    /// Captures rejected as belonging to an earlier pulse
    pub stale: u32,
}

/// What one cycle produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Value handed to the display (the sentinel on timeout or fault)
    pub distance: Distance,
    /// How the distance queue took it
    pub publish: Publish,
    /// First rejected transition, if the cycle had to be recovered
    pub fault: Option<CycleError>,
    /// Whether the cycle closed normally and was counted
    pub closed: bool,
}

/// Measurement stage state
#[derive(Debug, Clone)]
pub struct MeasurementStage {
    conversion: Conversion,
    state: CycleState,
    /// Instant of the pulse this cycle is listening for
    triggered_at: Option<Timestamp>,
    stats: MeasurementStats,
}

impl MeasurementStage {
    pub fn new(conversion: Conversion) -> Self {
        Self {
            conversion,
            state: CycleState::Idle,
            triggered_at: None,
            stats: MeasurementStats::default(),
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn stats(&self) -> MeasurementStats {
        self.stats
    }

    /// Open the echo window for a pulse fired at `at`
    pub fn begin(&mut self, at: Timestamp) -> Result<(), CycleError> {
        self.state = self
            .state
            .advance(CycleEvent::PulseFired)?
            .advance(CycleEvent::ListenStarted)?;
        self.triggered_at = Some(at);
        Ok(())
    }

    /// Check that `capture` was started by the current pulse
    ///
    /// A rising edge stamped before the trigger belongs to an earlier cycle
    /// and is counted as stale.
    pub fn accepts(&mut self, capture: &EchoCapture) -> bool {
        match self.triggered_at {
            Some(at) if capture.pulse_start >= at => true,
            _ => {
                self.stats.stale = self.stats.stale.wrapping_add(1);
                false
            }
        }
    }

    /// Decide the cycle outcome and produce the distance to publish
    ///
    /// `None` means the echo window expired. Each cycle resolves exactly
    /// once; a second call fails until the cycle is finished.
    pub fn resolve(&mut self, outcome: Option<EchoCapture>) -> Result<Distance, CycleError> {
        match outcome {
            Some(capture) => {
                self.state = self.state.advance(CycleEvent::EchoCaptured)?;
                self.stats.echoes = self.stats.echoes.wrapping_add(1);
                if !capture.is_ordered() {
                    self.stats.misordered = self.stats.misordered.wrapping_add(1);
                }
                Ok(self.conversion.distance(&capture))
            }
            None => {
                self.state = self.state.advance(CycleEvent::EchoTimeout)?;
                self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
                Ok(Distance::NoEcho)
            }
        }
    }

    /// Mark the resolved distance as published and close the cycle
    pub fn finish(&mut self) -> Result<(), CycleError> {
        self.state = self
            .state
            .advance(CycleEvent::DistancePublished)?
            .advance(CycleEvent::CycleClosed)?;
        self.triggered_at = None;
        self.stats.cycles = self.stats.cycles.wrapping_add(1);
        Ok(())
    }

    /// Abandon any cycle in progress
    pub fn reset(&mut self) {
        self.state = CycleState::Idle;
        self.triggered_at = None;
    }

    /// Run one cycle for a pulse fired at `at`
    ///
    /// Listens until `window` completes, then publishes exactly one
    /// distance. In the self-gated variant the handshake is released on
    /// every path, including recovered faults, so the trigger never stalls.
    pub async fn run_cycle<M, W>(
        &mut self,
        pacing: Pacing,
        links: &Pipeline<M>,
        at: Timestamp,
        window: W,
    ) -> CycleReport
    where
        M: RawMutex,
        W: Future<Output = ()>,
    {
        let report = self.measure(links, at, window).await;
        if pacing == Pacing::SelfGated {
            links.ready().release();
        }
        report
    }

    async fn measure<M, W>(&mut self, links: &Pipeline<M>, at: Timestamp, window: W) -> CycleReport
    where
        M: RawMutex,
        W: Future<Output = ()>,
    {
        let mut fault = None;

        if let Err(e) = self.begin(at) {
            // A previous cycle was left open; drop it and start over
            fault = Some(e);
            self.reset();
            if let Err(e) = self.begin(at) {
                fault.get_or_insert(e);
            }
        }

        let outcome = self.listen(links, window).await;
        let distance = match self.resolve(outcome) {
            Ok(distance) => distance,
            Err(e) => {
                fault.get_or_insert(e);
                Distance::NoEcho
            }
        };

        let publish = links.publish(distance);

        let closed = match self.finish() {
            Ok(()) => true,
            Err(e) => {
                fault.get_or_insert(e);
                self.reset();
                false
            }
        };

        CycleReport {
            distance,
            publish,
            fault,
            closed,
        }
    }

    /// Wait for a capture started by the current pulse
    ///
    /// Captures from earlier pulses are discarded. `None` once `window`
    /// completes first.
    async fn listen<M, W>(&mut self, links: &Pipeline<M>, window: W) -> Option<EchoCapture>
    where
        M: RawMutex,
        W: Future<Output = ()>,
    {
        let mut window = pin!(window);
        loop {
            match select(links.next_capture(), window.as_mut()).await {
                Either::First(capture) => {
                    if self.accepts(&capture) {
                        return Some(capture);
                    }
                }
                Either::Second(()) => return None,
            }
        }
    }
}

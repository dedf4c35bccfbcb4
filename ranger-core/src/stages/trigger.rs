//! Trigger pulse generation
//!
//! Drives the trigger line high for a fixed width and back low. A pulse
//! can only be fired with a [`CyclePermit`], so the self-gating variant
//! cannot emit a pulse while the previous cycle still holds the handshake.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;

use ranger_hal::{Monotonic, OutputPin, Timestamp};

use crate::config::{Pacing, TimingConfig};
use crate::sync::{CyclePermit, Pipeline, ReadySignal};

/// What happened in one trigger period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Period {
    /// A pulse went out at `at`; `stale` leftover captures were discarded first
    Fired { at: Timestamp, stale: usize },
    /// No permit within the window; nothing was emitted
    Skipped,
}

/// Trigger stage state
#[derive(Debug, Clone)]
pub struct TriggerStage {
    /// Pulse width in microseconds
    pulse_width_us: u32,
    /// Pulses fired since boot
    fired: u32,
    /// Periods skipped because the handshake never arrived
    skipped: u32,
}

impl TriggerStage {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            pulse_width_us: timing.trigger_pulse_us,
            fired: 0,
            skipped: 0,
        }
    }

    /// Emit one trigger pulse
    ///
    /// The delay blocks for the pulse width (≈10 µs). Returns the instant
    /// the line went low, which precedes any echo edge of this cycle.
    pub fn fire<P, D, C>(
        &mut self,
        _permit: CyclePermit,
        pin: &mut P,
        delay: &mut D,
        clock: &C,
    ) -> Timestamp
    where
        P: OutputPin,
        D: DelayNs,
        C: Monotonic,
    {
        pin.set_high();
        delay.delay_us(self.pulse_width_us);
        pin.set_low();
        self.fired = self.fired.wrapping_add(1);
        clock.now()
    }

    /// Obtain the permit for this period
    ///
    /// Self-gated: wait for the handshake until `window` completes, counting
    /// a skip on expiry. Display-paced: the trigger runs free.
    pub async fn permit<M, W>(
        &mut self,
        pacing: Pacing,
        ready: &ReadySignal<M>,
        window: W,
    ) -> Option<CyclePermit>
    where
        M: RawMutex,
        W: Future<Output = ()>,
    {
        match pacing {
            Pacing::SelfGated => match select(ready.acquire(), window).await {
                Either::First(permit) => Some(permit),
                Either::Second(()) => {
                    self.skip();
                    None
                }
            },
            Pacing::DisplayPaced => CyclePermit::ungated(pacing),
        }
    }

    /// Run one trigger period against the pipeline
    ///
    /// Gets a permit, clears captures left over from earlier pulses, fires,
    /// and announces the pulse instant to the measurement stage. In the
    /// display-paced variant the handshake is released for the display.
    pub async fn run_period<M, P, D, C, W>(
        &mut self,
        pacing: Pacing,
        links: &Pipeline<M>,
        pin: &mut P,
        delay: &mut D,
        clock: &C,
        window: W,
    ) -> Period
    where
        M: RawMutex,
        P: OutputPin,
        D: DelayNs,
        C: Monotonic,
        W: Future<Output = ()>,
    {
        let Some(permit) = self.permit(pacing, links.ready(), window).await else {
            return Period::Skipped;
        };

        let stale = links.drain_captures();
        let at = self.fire(permit, pin, delay, clock);
        links.announce_trigger(at);

        if pacing == Pacing::DisplayPaced {
            links.ready().release();
        }

        Period::Fired { at, stale }
    }

    /// Record a period in which no permit was obtained
    pub fn skip(&mut self) {
        self.skipped = self.skipped.wrapping_add(1);
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }
}

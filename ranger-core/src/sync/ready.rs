//! Ready handshake
//!
//! A binary semaphore: `release` makes the signal present, `acquire`
//! consumes it. Releasing twice before an acquire still yields one permit.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::config::Pacing;

/// Proof that the holder may start a measurement cycle
///
/// Obtained by acquiring a [`ReadySignal`], or, in the display-paced
/// variant only, handed out by the trigger stage without gating.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use = "a permit is consumed by firing the trigger"]
pub struct CyclePermit {
    _private: (),
}

impl CyclePermit {
    /// Permit without the handshake; only the display-paced trigger runs free
    pub(crate) fn ungated(pacing: Pacing) -> Option<Self> {
        match pacing {
            Pacing::DisplayPaced => Some(Self { _private: () }),
            Pacing::SelfGated => None,
        }
    }
}

/// One-slot handshake with no payload
pub struct ReadySignal<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> ReadySignal<M> {
    /// Create the handshake in the absent state
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Make the handshake present
    pub fn release(&self) {
        self.signal.signal(());
    }

    /// Wait until present, then consume it
    pub async fn acquire(&self) -> CyclePermit {
        self.signal.wait().await;
        CyclePermit { _private: () }
    }

    /// Consume the handshake if present
    pub fn try_acquire(&self) -> Option<CyclePermit> {
        self.signal.try_take().map(|()| CyclePermit { _private: () })
    }
}

impl<M: RawMutex> Default for ReadySignal<M> {
    fn default() -> Self {
        Self::new()
    }
}

//! Events that advance a measurement cycle

/// Events that can trigger cycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Trigger pulse emitted
    PulseFired,
    /// Measurement stage started its echo window
    ListenStarted,
    /// Capture-ready notification received within the window
    EchoCaptured,
    /// Echo window expired
    EchoTimeout,
    /// Distance (or sentinel) handed to the display queue
    DistancePublished,
    /// Cycle data discarded
    CycleClosed,
}

//! Cycle state definition
//!
//! The next state is a function of the current state and an event.

use super::events::CycleEvent;

/// Per-cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleState {
    /// No cycle in flight
    #[default]
    Idle,
    /// Trigger pulse emitted
    Triggered,
    /// Waiting for the capture-ready notification
    AwaitingEcho,
    /// Both edges captured
    Captured,
    /// No echo within the window
    TimedOut,
    /// Result handed to the display; data discarded next
    Published,
}

/// Event not accepted in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleError {
    pub state: CycleState,
    pub event: CycleEvent,
}

impl CycleState {
    /// Process an event, rejecting transitions the cycle does not allow
    pub fn advance(self, event: CycleEvent) -> Result<Self, CycleError> {
        use CycleEvent::*;
        use CycleState::*;

        match (self, event) {
            (Idle, PulseFired) => Ok(Triggered),
            (Triggered, ListenStarted) => Ok(AwaitingEcho),
            (AwaitingEcho, EchoCaptured) => Ok(Captured),
            (AwaitingEcho, EchoTimeout) => Ok(TimedOut),
            (Captured | TimedOut, DistancePublished) => Ok(Published),
            (Published, CycleClosed) => Ok(Idle),
            (state, event) => Err(CycleError { state, event }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_cycle() -> Result<(), CycleError> {
        let state = CycleState::Idle
            .advance(CycleEvent::PulseFired)?
            .advance(CycleEvent::ListenStarted)?;
        assert_eq!(state, CycleState::AwaitingEcho);

        let captured = state.advance(CycleEvent::EchoCaptured)?;
        assert_eq!(captured, CycleState::Captured);

        let published = captured.advance(CycleEvent::DistancePublished)?;
        assert_eq!(published, CycleState::Published);
        assert_eq!(published.advance(CycleEvent::CycleClosed), Ok(CycleState::Idle));
        Ok(())
    }

    #[test]
    fn test_timed_out_cycle() {
        let state = CycleState::AwaitingEcho.advance(CycleEvent::EchoTimeout);
        assert_eq!(state, Ok(CycleState::TimedOut));
        assert_eq!(
            CycleState::TimedOut.advance(CycleEvent::DistancePublished),
            Ok(CycleState::Published)
        );
    }

    #[test]
    fn test_cannot_fire_while_in_flight() {
        let states = [
            CycleState::Triggered,
            CycleState::AwaitingEcho,
            CycleState::Captured,
            CycleState::TimedOut,
            CycleState::Published,
        ];

        for state in states {
            assert_eq!(
                state.advance(CycleEvent::PulseFired),
                Err(CycleError {
                    state,
                    event: CycleEvent::PulseFired
                })
            );
        }
    }

    #[test]
    fn test_outcome_decided_once() {
        let captured = CycleState::Captured;
        assert!(captured.advance(CycleEvent::EchoTimeout).is_err());
        assert!(captured.advance(CycleEvent::EchoCaptured).is_err());
    }

    #[test]
    fn test_cannot_publish_undecided() {
        assert!(CycleState::AwaitingEcho
            .advance(CycleEvent::DistancePublished)
            .is_err());
        assert!(CycleState::Idle.advance(CycleEvent::DistancePublished).is_err());
    }
}

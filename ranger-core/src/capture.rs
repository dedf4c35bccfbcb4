//! Echo edge capture
//!
//! The echo interrupt is the only writer of capture state. Instead of
//! leaving two timestamps in shared memory for the measurement stage to
//! read later, the falling edge packs both into an [`EchoCapture`] which
//! travels through the capture-ready queue by value.

use ranger_hal::{Edge, Timestamp};

/// Both edges of one echo pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoCapture {
    /// Rising edge of the echo line
    pub pulse_start: Timestamp,
    /// Falling edge of the echo line
    pub pulse_end: Timestamp,
}

impl EchoCapture {
    pub const fn new(pulse_start: Timestamp, pulse_end: Timestamp) -> Self {
        Self {
            pulse_start,
            pulse_end,
        }
    }

    /// Signed echo width in microseconds (`pulse_end - pulse_start`)
    pub fn elapsed_us(&self) -> i64 {
        self.pulse_end - self.pulse_start
    }

    /// Whether the falling edge came strictly after the rising edge
    pub fn is_ordered(&self) -> bool {
        self.pulse_end > self.pulse_start
    }
}

/// Edge recorder owned by the echo interrupt
///
/// Must stay bounded and non-blocking: every call is O(1) and never waits.
#[derive(Debug, Default)]
pub struct EdgeCapture {
    /// Rising edge of the pulse currently being measured
    pulse_start: Option<Timestamp>,
    /// Falling edges seen without a preceding rising edge
    stray_edges: u32,
}

impl EdgeCapture {
    pub const fn new() -> Self {
        Self {
            pulse_start: None,
            stray_edges: 0,
        }
    }

    /// Record an edge observed at `at`
    ///
    /// Returns a completed capture on a falling edge that follows a rising
    /// edge. A repeated rising edge restarts the pulse. A falling edge with
    /// no armed start is counted as stray and produces nothing, so the
    /// measurement stage sees a timeout instead of a width computed from a
    /// previous cycle's start.
    pub fn on_edge(&mut self, edge: Edge, at: Timestamp) -> Option<EchoCapture> {
        match edge {
            Edge::Rising => {
                self.pulse_start = Some(at);
                None
            }
            Edge::Falling => match self.pulse_start.take() {
                Some(start) => Some(EchoCapture::new(start, at)),
                None => {
                    self.stray_edges = self.stray_edges.wrapping_add(1);
                    None
                }
            },
        }
    }

    /// Number of falling edges seen without a rising edge
    pub fn stray_edges(&self) -> u32 {
        self.stray_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(us: u64) -> Timestamp {
        Timestamp::from_micros(us)
    }

    #[test]
    fn test_rising_then_falling_completes() {
        let mut capture = EdgeCapture::new();
        assert_eq!(capture.on_edge(Edge::Rising, ts(1000)), None);

        let echo = capture.on_edge(Edge::Falling, ts(2162)).unwrap();
        assert_eq!(echo.pulse_start, ts(1000));
        assert_eq!(echo.pulse_end, ts(2162));
        assert_eq!(echo.elapsed_us(), 1162);
        assert!(echo.is_ordered());
    }

    #[test]
    fn test_falling_without_rising_is_stray() {
        let mut capture = EdgeCapture::new();
        assert_eq!(capture.on_edge(Edge::Falling, ts(500)), None);
        assert_eq!(capture.stray_edges(), 1);
    }

    #[test]
    fn test_start_is_not_reused_across_cycles() {
        let mut capture = EdgeCapture::new();
        capture.on_edge(Edge::Rising, ts(100));
        assert!(capture.on_edge(Edge::Falling, ts(200)).is_some());

        // Second falling edge must not pair with the first cycle's start
        assert_eq!(capture.on_edge(Edge::Falling, ts(300)), None);
        assert_eq!(capture.stray_edges(), 1);
    }

    #[test]
    fn test_repeated_rising_restarts_pulse() {
        let mut capture = EdgeCapture::new();
        capture.on_edge(Edge::Rising, ts(100));
        capture.on_edge(Edge::Rising, ts(150));
        let echo = capture.on_edge(Edge::Falling, ts(400)).unwrap();
        assert_eq!(echo.elapsed_us(), 250);
    }

    #[test]
    fn test_misordered_capture_has_negative_width() {
        let echo = EchoCapture::new(ts(2162), ts(1000));
        assert_eq!(echo.elapsed_us(), -1162);
        assert!(!echo.is_ordered());
    }
}

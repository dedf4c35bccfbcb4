//! Newest-wins publishing onto a bounded channel

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

/// Outcome of a non-blocking publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Publish {
    /// Queued without displacing anything
    Delivered,
    /// The oldest pending value was dropped to make room
    ReplacedStale,
    /// Channel stayed full (another producer refilled it); value dropped
    Dropped,
}

/// Send `value` without blocking, dropping the oldest pending value if full
///
/// The channel never grows beyond `N` and the consumer always sees the
/// newest value next. Assumes a single producer; with several, a
/// concurrent refill yields [`Publish::Dropped`].
pub fn publish_latest<M: RawMutex, T, const N: usize>(
    channel: &Channel<M, T, N>,
    value: T,
) -> Publish {
    match channel.try_send(value) {
        Ok(()) => Publish::Delivered,
        Err(TrySendError::Full(value)) => {
            let _ = channel.try_receive();
            match channel.try_send(value) {
                Ok(()) => Publish::ReplacedStale,
                Err(TrySendError::Full(_)) => Publish::Dropped,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_delivers_into_empty_channel() {
        let channel: Channel<NoopRawMutex, u32, 1> = Channel::new();
        assert_eq!(publish_latest(&channel, 7), Publish::Delivered);
        assert_eq!(channel.try_receive().ok(), Some(7));
    }

    #[test]
    fn test_replaces_stale_value() {
        let channel: Channel<NoopRawMutex, u32, 1> = Channel::new();
        publish_latest(&channel, 1);
        assert_eq!(publish_latest(&channel, 2), Publish::ReplacedStale);
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.try_receive().ok(), Some(2));
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let channel: Channel<NoopRawMutex, u32, 3> = Channel::new();
        for value in 0..10 {
            publish_latest(&channel, value);
            assert!(channel.len() <= 3);
        }
        // Oldest dropped first, so the last three remain in order
        assert_eq!(channel.try_receive().ok(), Some(7));
        assert_eq!(channel.try_receive().ok(), Some(8));
        assert_eq!(channel.try_receive().ok(), Some(9));
    }
}

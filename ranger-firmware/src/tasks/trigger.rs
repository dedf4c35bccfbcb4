//! Trigger task
//!
//! Fires one pulse per period. In the self-gated variant a pulse needs
//! the ready handshake from the previous cycle; a period without it is
//! skipped. In the display-paced variant the trigger runs free and
//! releases the handshake itself after each pulse.

use defmt::*;
use embassy_time::{Delay, Duration, Ticker, Timer};

use ranger_core::config::{TimingConfig, PACING};
use ranger_core::stages::{Period, TriggerStage};
use ranger_hal_rp2040::{EmbassyClock, TriggerOutput};

use crate::channels::Links;

#[embassy_executor::task]
pub async fn trigger_task(
    mut pin: TriggerOutput<'static>,
    links: &'static Links,
    timing: TimingConfig,
) {
    info!("Trigger task started");

    let period = Duration::from_millis(timing.trigger_period_ms as u64);
    let mut ticker = Ticker::every(period);
    let mut stage = TriggerStage::new(&timing);
    let mut delay = Delay;

    loop {
        ticker.next().await;

        let window = Timer::after(period);
        match stage
            .run_period(PACING, links, &mut pin, &mut delay, &EmbassyClock, window)
            .await
        {
            Period::Fired { at, stale } => {
                if stale > 0 {
                    debug!("Trigger: discarded {} stale captures", stale);
                }
                trace!("Trigger: pulse {} at {} us", stage.fired(), at.as_micros());
            }
            Period::Skipped => {
                warn!("Trigger: no ready handshake, skipped ({} total)", stage.skipped());
            }
        }
    }
}

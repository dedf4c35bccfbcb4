//! Measurement task
//!
//! Waits for the trigger announcement, then runs one cycle with the echo
//! window anchored to the pulse instant. Exactly one distance is
//! published per triggered cycle: the converted capture, or the no-echo
//! sentinel on timeout.

use defmt::*;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use ranger_core::config::{TimingConfig, CONVERSION, PACING};
use ranger_core::stages::MeasurementStage;
use ranger_core::sync::Publish;
use ranger_core::Distance;

use crate::channels::{self, Links};

/// Cycles between statistics reports
const STATS_INTERVAL: u32 = 16;

#[embassy_executor::task]
pub async fn measurement_task(links: &'static Links, timing: TimingConfig) {
    info!("Measurement task started");

    let trigger_wait = Duration::from_millis(timing.trigger_wait_ms() as u64);
    let echo_window = Duration::from_millis(timing.echo_timeout_ms as u64);
    let mut stage = MeasurementStage::new(CONVERSION);
    let mut dropped_seen = 0u32;

    loop {
        let Ok(at) = with_timeout(trigger_wait, links.next_trigger()).await else {
            debug!("Measurement: no trigger within {} ms", timing.trigger_wait_ms());
            continue;
        };

        // The window is anchored to the pulse, not to when we got here
        let window = Timer::at(Instant::from_micros(at.as_micros()) + echo_window);
        let report = stage.run_cycle(PACING, links, at, window).await;

        if let Some(e) = report.fault {
            warn!("Measurement: recovered from {:?}", e);
        }

        match report.distance {
            Distance::Cm(cm) => info!("Measurement: {} cm", cm),
            Distance::NoEcho => warn!("Measurement: no echo"),
        }

        match report.publish {
            Publish::Delivered => {}
            Publish::ReplacedStale => debug!("Measurement: display missed a reading"),
            Publish::Dropped => warn!("Measurement: distance dropped"),
        }

        let dropped = channels::dropped_captures();
        if dropped != dropped_seen {
            warn!(
                "Measurement: {} capture notifications dropped",
                dropped.wrapping_sub(dropped_seen)
            );
            dropped_seen = dropped;
        }

        let stats = stage.stats();
        if report.closed && stats.cycles % STATS_INTERVAL == 0 {
            info!(
                "Measurement: {} cycles, {} echoes, {} timeouts, {} misordered, {} stale, {} stray edges",
                stats.cycles,
                stats.echoes,
                stats.timeouts,
                stats.misordered,
                stats.stale,
                channels::stray_edges()
            );
        }
    }
}

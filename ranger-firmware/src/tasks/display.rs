//! Display task
//!
//! Owns the OLED. Every distance received is drawn as a label and a
//! proportional bar; the no-echo sentinel shows the failure label.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{with_timeout, Duration, Timer};

use ranger_core::config::{BarScale, Pacing, TimingConfig, PACING};
use ranger_core::Distance;
use ranger_display::{render_reading, render_splash, Readout, Surface};

use crate::channels::Links;
use crate::ssd1306::Ssd1306;

/// The display on I2C1
pub type Oled = Ssd1306<I2c<'static, I2C1, Async>>;

#[embassy_executor::task]
pub async fn display_task(
    mut oled: Oled,
    links: &'static Links,
    timing: TimingConfig,
    scale: BarScale,
) {
    info!("Display task started");

    match oled.init().await {
        Ok(()) => {
            render_splash(&mut oled);
            if let Err(e) = oled.present().await {
                warn!("Display: splash failed: {:?}", e);
            }
        }
        Err(e) => error!("Display: init failed: {:?}", e),
    }

    loop {
        let Some(distance) = next_reading(links, &timing).await else {
            continue;
        };

        let readout = render_reading(&mut oled, distance, &scale);
        match &readout {
            Readout::Reading { bar, .. } => trace!("Display: {} ({} px)", readout.label(), bar),
            Readout::Failure => trace!("Display: failure"),
        }

        if let Err(e) = oled.present().await {
            warn!("Display: present failed: {:?}", e);
        }
    }
}

/// Wait for the next distance according to the pacing variant
async fn next_reading(links: &Links, timing: &TimingConfig) -> Option<Distance> {
    match PACING {
        Pacing::SelfGated => {
            let wait = Duration::from_millis(timing.trigger_wait_ms() as u64);
            with_timeout(wait, links.next_distance()).await.ok()
        }
        Pacing::DisplayPaced => {
            let ready = Duration::from_millis(timing.ready_timeout_ms as u64);
            if with_timeout(ready, links.ready().acquire()).await.is_err() {
                return None;
            }
            Timer::after_millis(timing.settle_ms as u64).await;

            let wait = Duration::from_millis(timing.distance_timeout_ms as u64);
            match with_timeout(wait, links.next_distance()).await {
                Ok(distance) => Some(distance),
                Err(_) => {
                    warn!("Display: no distance within {} ms", timing.distance_timeout_ms);
                    None
                }
            }
        }
    }
}

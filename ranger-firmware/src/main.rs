//! Ranger - Ultrasonic Rangefinder Firmware
//!
//! Main firmware binary for RP2040 boards with an HC-SR04 style sensor
//! and a 128x32 SSD1306 OLED.
//!
//! The echo line is timestamped on a high-priority interrupt executor;
//! trigger, measurement, and display run as ordinary tasks linked by the
//! static pipeline in [`channels`].

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::I2C1;
use {defmt_rtt as _, panic_probe as _};

use ranger_core::config::{BarScale, TimingConfig, BAR_SCALE, PACING, TIMING};
use ranger_hal_rp2040::{EchoInput, TriggerOutput};

use crate::ssd1306::Ssd1306;

mod channels;
mod ssd1306;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Executor for the echo edge task, preempting all other tasks
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ranger firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let timing = checked_timing();
    let scale = checked_scale();
    info!(
        "Timing: period={}ms pulse={}us echo={}ms, pacing={:?}",
        timing.trigger_period_ms, timing.trigger_pulse_us, timing.echo_timeout_ms, PACING
    );

    let links = channels::init();

    // Echo input (GPIO16). The sensor drives the line; pull-down keeps
    // it low when disconnected.
    let echo = EchoInput::new(p.PIN_16);
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high_spawner
        .spawn(tasks::edge_capture_task(echo, links))
        .unwrap();
    info!("Echo capture running on SWI_IRQ_1");

    // SSD1306 on I2C1 (SDA=GPIO2, SCL=GPIO3)
    let i2c = I2c::new_async(p.I2C1, p.PIN_3, p.PIN_2, Irqs, i2c::Config::default());
    let oled = Ssd1306::new(i2c);
    info!("I2C initialized for display");

    // Trigger output (GPIO15)
    let trigger = TriggerOutput::new(p.PIN_15);

    // Consumers first so the first pulse has someone listening
    spawner
        .spawn(tasks::measurement_task(links, timing))
        .unwrap();
    spawner
        .spawn(tasks::display_task(oled, links, timing, scale))
        .unwrap();
    spawner
        .spawn(tasks::trigger_task(trigger, links, timing))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Compile-time timing, or the defaults if it is inconsistent
fn checked_timing() -> TimingConfig {
    match TIMING.validate() {
        Ok(()) => TIMING,
        Err(e) => {
            error!("Invalid timing config: {:?}", e);
            error!("Using default timing");
            TimingConfig::DEFAULT
        }
    }
}

/// Compile-time bar geometry, or the defaults if it is inconsistent
fn checked_scale() -> BarScale {
    match BAR_SCALE.validate() {
        Ok(()) => BAR_SCALE,
        Err(e) => {
            error!("Invalid bar scale: {:?}", e);
            error!("Using default bar scale");
            BarScale::DEFAULT
        }
    }
}

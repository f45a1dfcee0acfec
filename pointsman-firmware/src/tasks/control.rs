//! Control task
//!
//! Owns the controller. Once per poll interval it samples the channel
//! inputs and the button panel and runs one controller tick.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;

use pointsman_core::config::MAX_CHANNELS;
use pointsman_core::input::{ButtonPanel, ChannelLevels};
use pointsman_core::Controller;
use pointsman_hal_rp2040::flash::FlashStore;
use pointsman_hal_rp2040::gpio::RpInput;

use crate::actuator::{DefmtSink, QueueActuator};
use crate::config::{CONTROLLER, FORCE_REINIT};

/// Control task - runs the controller at the configured poll interval
#[embassy_executor::task]
pub async fn control_task(
    store: FlashStore<'static>,
    inputs: Vec<RpInput<'static>, MAX_CHANNELS>,
    panel: ButtonPanel<RpInput<'static>>,
) {
    info!(
        "Control task started: {} channels, {}..{} deg",
        CONTROLLER.channel_count, CONTROLLER.min_pos, CONTROLLER.max_pos
    );
    if FORCE_REINIT {
        warn!("force-reinit build: stored table will be replaced");
    }

    let mut controller =
        match Controller::start(CONTROLLER, store, QueueActuator, DefmtSink, FORCE_REINIT) {
            Ok(controller) => controller,
            Err(e) => defmt::panic!("Controller start failed: {}", e),
        };

    let mut ticker = Ticker::every(Duration::from_millis(CONTROLLER.poll_interval_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Elapsed time since start in milliseconds (wraps after ~49 days)
        let now_ms = start.elapsed().as_millis() as u32;

        controller.tick(now_ms, panel.sample(), ChannelLevels::sample(&inputs));
    }
}

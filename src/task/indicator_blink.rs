//! Direction Indicator Task
//!
//! Holds the indicator on for period 0 and toggles it every period otherwise.
//! A different period takes effect immediately, also in the middle of a blink.
//! The same period again leaves the running blink undisturbed.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Instant, Timer};

use crate::system::indicator;
use crate::task::resources::IndicatorResources;

/// Drives the indicator output from [`indicator::wait`] period changes
#[embassy_executor::task]
pub async fn indicator_blink(r: IndicatorResources) {
    let mut led = Output::new(r.pin, Level::Low);
    let mut period_us = indicator::wait().await;

    loop {
        if period_us == 0 {
            led.set_high();
            period_us = indicator::wait().await;
            continue;
        }

        led.toggle();
        let deadline = Instant::now() + Duration::from_micros(u64::from(period_us));
        loop {
            match select(Timer::at(deadline), indicator::wait()).await {
                Either::First(()) => break,
                Either::Second(next) if next == period_us => continue,
                Either::Second(next) => {
                    debug!("indicator period {=u32}us", next);
                    period_us = next;
                    break;
                }
            }
        }
    }
}

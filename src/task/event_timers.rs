//! Loop Event Timers
//!
//! Two periodic tasks raising the dispatcher's events. A new event overwrites
//! one the dispatcher has not taken yet.

use embassy_time::{Duration, Ticker};

use crate::system::config::{INPUT_POLL_PERIOD_US, RANGE_POLL_PERIOD_US};
use crate::system::event::EventKind;
use crate::system::state::SHARED;

/// Requests a joystick read every 200 ms
#[embassy_executor::task]
pub async fn input_poll_timer() {
    raise_every(Duration::from_micros(INPUT_POLL_PERIOD_US), EventKind::InputReady).await
}

/// Requests a range evaluation every 150 ms
#[embassy_executor::task]
pub async fn range_poll_timer() {
    raise_every(Duration::from_micros(RANGE_POLL_PERIOD_US), EventKind::RangeReady).await
}

async fn raise_every(period: Duration, kind: EventKind) -> ! {
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        SHARED.raise(kind);
    }
}

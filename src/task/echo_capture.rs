//! Echo Capture Task
//!
//! Timestamps every edge of the ranging echo line and feeds it to the shared
//! [`EchoCapture`](crate::system::echo::EchoCapture). Runs on the high
//! priority executor so the timestamp is taken as close to the edge as the
//! dispatcher allows.

use embassy_rp::gpio::{Input, Pull};

use crate::system::state::SHARED;
use crate::task::board::now_us;
use crate::task::resources::EchoResources;

/// Captures echo edges forever, on the high priority executor
#[embassy_executor::task]
pub async fn echo_capture(r: EchoResources) {
    let mut echo = Input::new(r.echo_pin, Pull::Down);
    info!("Echo capture started");

    loop {
        echo.wait_for_any_edge().await;
        SHARED.echo.on_edge(now_us());
    }
}

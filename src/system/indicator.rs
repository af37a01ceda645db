//! Direction Indicator Module
//!
//! Carries the indicator period from the board binding to the blink task.
//! The latest period wins; a period of 0 holds the indicator on.
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Signal for indicator period changes (µs)
pub static INDICATOR_PERIOD: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Requests a new indicator period
pub fn update(period_us: u32) {
    INDICATOR_PERIOD.signal(period_us);
}

/// Waits for the next period change
pub async fn wait() -> u32 {
    INDICATOR_PERIOD.wait().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn latest_period_wins() {
        update(250_000);
        update(0);
        assert_eq!(block_on(wait()), 0);
        assert!(!INDICATOR_PERIOD.signaled());
    }
}

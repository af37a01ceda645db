//! Shared State
//!
//! The only data crossing from interrupt context into the dispatch loop:
//! - the pending loop event, raised by the poll timers
//! - the echo capture, written on every edge of the ranging echo line
//!
//! Drive mode, heading and the autonomous stop flag are owned by the dispatch
//! loop alone and live in the navigator and actuator instead.
//!
//! # Access Pattern
//! ```rust,ignore
//! // interrupt context
//! SHARED.raise(EventKind::RangeReady);
//! SHARED.echo.on_edge(now_us);
//!
//! // dispatch loop
//! let kind = SHARED.next_event().await;
//! ```

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

use crate::system::echo::EchoCapture;
use crate::system::event::{EventKind, PendingEvent};

/// The rover's shared state
pub static SHARED: SharedState = SharedState::new();

/// Data written from interrupt context and read by the dispatch loop
///
/// All access is through single atomic operations or the wake signal, so both
/// sides may use it through a shared reference.
pub struct SharedState {
    /// Ranging echo capture
    pub echo: EchoCapture,
    pending: PendingEvent,
    /// Wakes the dispatch loop. Carries no data, the event itself is in
    /// `pending`.
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl SharedState {
    /// No event pending, echo capture idle
    pub const fn new() -> Self {
        Self {
            echo: EchoCapture::new(),
            pending: PendingEvent::new(),
            wake: Signal::new(),
        }
    }

    /// Raises a loop event and wakes the dispatcher
    pub fn raise(&self, kind: EventKind) {
        self.pending.raise(kind);
        self.wake.signal(());
    }

    /// Takes and clears the pending event without waiting
    #[cfg(test)]
    pub(crate) fn take_event(&self) -> Option<EventKind> {
        self.pending.take()
    }

    /// Suspends until an event is pending, then takes it
    pub async fn next_event(&self) -> EventKind {
        loop {
            if let Some(kind) = self.pending.take() {
                return kind;
            }
            self.wake.wait().await;
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn raised_event_is_delivered_once() {
        let shared = SharedState::new();
        shared.raise(EventKind::RangeReady);
        assert_eq!(block_on(shared.next_event()), EventKind::RangeReady);
        assert_eq!(shared.take_event(), None);
    }

    #[test]
    fn stale_wake_does_not_fabricate_an_event() {
        let shared = SharedState::new();
        shared.raise(EventKind::InputReady);
        // Consumed without waiting, the wake signal is still set
        assert_eq!(shared.take_event(), Some(EventKind::InputReady));

        shared.raise(EventKind::RangeReady);
        assert_eq!(block_on(shared.next_event()), EventKind::RangeReady);
    }
}

//! Loop events
//!
//! Periodic timers raise one of two events. They are not queued: the dispatcher
//! consumes whichever was raised last, an earlier event that was not observed
//! in time is dropped and recovered on the next tick of its timer.

use core::sync::atomic::{AtomicU8, Ordering};

/// Work for the dispatch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Joystick and button are due to be read
    InputReady,
    /// The range is due to be evaluated
    RangeReady,
}

const NONE: u8 = 0;
const INPUT_READY: u8 = 1;
const RANGE_READY: u8 = 2;

impl EventKind {
    const fn encode(self) -> u8 {
        match self {
            EventKind::InputReady => INPUT_READY,
            EventKind::RangeReady => RANGE_READY,
        }
    }

    const fn decode(raw: u8) -> Option<Self> {
        match raw {
            INPUT_READY => Some(EventKind::InputReady),
            RANGE_READY => Some(EventKind::RangeReady),
            _ => None,
        }
    }
}

/// Single-slot, overwriting event mailbox
///
/// Written from interrupt context, drained by the dispatcher with one atomic
/// swap, so taking an event and clearing the slot cannot be split by an
/// interrupt.
pub struct PendingEvent {
    slot: AtomicU8,
}

impl PendingEvent {
    /// Empty mailbox
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(NONE),
        }
    }

    /// Stores `kind`, replacing an event that has not been taken yet
    pub fn raise(&self, kind: EventKind) {
        self.slot.store(kind.encode(), Ordering::Release);
    }

    /// Takes the pending event and clears the slot
    pub fn take(&self) -> Option<EventKind> {
        EventKind::decode(self.slot.swap(NONE, Ordering::AcqRel))
    }
}

impl Default for PendingEvent {
    fn default() -> Self {
        Self::new()
    }
}

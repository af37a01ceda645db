//! Ultrasonic echo capture
//!
//! The ranging sensor answers every trigger pulse with an echo pulse whose
//! width is proportional to the distance of the nearest obstacle. The capture
//! handler is called on every edge of the echo line with the free-running
//! microsecond count and alternates between two phases:
//!
//! ```text
//!            rising edge: store timestamp
//!   AwaitingRising ─────────────────────────▶ AwaitingFalling
//!         ▲                                         │
//!         └─────────────────────────────────────────┘
//!            falling edge: pulse width = now - rising
//! ```
//!
//! A pulse width is only fresh right after the falling edge. Any number of
//! pulses may complete between two reads, the latest one wins.
//!
//! # Concurrency
//! `on_edge` runs in interrupt context and is the only writer of the phase and
//! the timestamps. The dispatcher reads the pulse width and may clear it from
//! the watchdog. Every field is a single word accessed with one atomic load or
//! store, so no lock is held while an edge is being captured.
//!
//! A watchdog reset also marks the pulse in flight as cut. Its falling edge
//! completes the phase cycle but stores no width, the zeroed rising edge would
//! otherwise turn it into a pulse as long as the uptime.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::system::config::{ECHO_WATCHDOG_US, RANGE_SCALE_US};

/// Phase of the edge capture protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoPhase {
    /// Next edge starts a pulse
    AwaitingRising,
    /// Next edge completes a pulse
    AwaitingFalling,
}

/// Edge capture state shared between interrupt context and the dispatcher
///
/// Holds the phase, the last rising edge and the latest completed pulse. The
/// pulse width stays valid until the next falling edge or watchdog reset.
pub struct EchoCapture {
    awaiting_falling: AtomicBool,
    pulse_cut: AtomicBool,
    rising_edge: AtomicU32,
    pulse_width: AtomicU32,
    last_pulse_at: AtomicU32,
}

impl EchoCapture {
    /// Idle capture: awaiting a rising edge, no pulse measured yet
    pub const fn new() -> Self {
        Self {
            awaiting_falling: AtomicBool::new(false),
            pulse_cut: AtomicBool::new(false),
            rising_edge: AtomicU32::new(0),
            pulse_width: AtomicU32::new(0),
            last_pulse_at: AtomicU32::new(0),
        }
    }

    /// Edge handler, called from interrupt context with the capture timestamp
    pub fn on_edge(&self, timestamp_us: u32) {
        match self.phase() {
            EchoPhase::AwaitingRising => {
                self.rising_edge.store(timestamp_us, Ordering::Release);
                self.pulse_cut.store(false, Ordering::Release);
                self.awaiting_falling.store(true, Ordering::Release);
            }
            EchoPhase::AwaitingFalling => {
                if !self.pulse_cut.swap(false, Ordering::AcqRel) {
                    let rising = self.rising_edge.load(Ordering::Acquire);
                    self.pulse_width
                        .store(timestamp_us.wrapping_sub(rising), Ordering::Release);
                    self.last_pulse_at.store(timestamp_us, Ordering::Release);
                }
                self.awaiting_falling.store(false, Ordering::Release);
            }
        }
    }

    /// Which edge the capture expects next
    pub fn phase(&self) -> EchoPhase {
        if self.awaiting_falling.load(Ordering::Acquire) {
            EchoPhase::AwaitingFalling
        } else {
            EchoPhase::AwaitingRising
        }
    }

    /// Width of the most recent completed pulse (µs), 0 after a watchdog reset
    pub fn pulse_width(&self) -> u32 {
        self.pulse_width.load(Ordering::Acquire)
    }

    /// Timestamp of the last rising edge, 0 after a watchdog reset
    pub fn rising_edge(&self) -> u32 {
        self.rising_edge.load(Ordering::Acquire)
    }

    /// Clears pulse width and rising edge if no pulse completed within the
    /// watchdog window before `now_us`, or if the stored pulse is itself wider
    /// than the window (an echo timeout). Returns true if a reset happened.
    pub fn reset_if_stale(&self, now_us: u32) -> bool {
        let width = self.pulse_width.load(Ordering::Acquire);
        let age = now_us.wrapping_sub(self.last_pulse_at.load(Ordering::Acquire));
        if width > ECHO_WATCHDOG_US || age > ECHO_WATCHDOG_US {
            self.pulse_width.store(0, Ordering::Release);
            // cut after zeroing, an edge in between is then dropped as well
            self.rising_edge.store(0, Ordering::Release);
            self.pulse_cut.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl Default for EchoCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Range metric of an echo pulse, truncating
pub const fn range(pulse_width_us: u32) -> u32 {
    pulse_width_us / RANGE_SCALE_US
}

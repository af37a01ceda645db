//! Light-seeking rover control core
//!
//! Drives a four-motor rover either from a joystick (manual mode) or on its own,
//! steering toward the darker of two light sensors and stopping in front of
//! obstacles reported by an ultrasonic ranging sensor (autonomous mode).
//!
//! The crate is split the same way the firmware runs:
//! - [`system`]: the hardware independent control core. Shared state written
//!   from interrupt context, the navigation state machine, the motor actuator
//!   and the event dispatcher. Everything in here is reachable from host tests.
//! - `task` (feature `rp2350`): embassy tasks and the RP2350 [`system::board::Board`]
//!   binding that feed the core from timers, edge capture and GPIO.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

/// Control core
pub mod system;

/// Embassy tasks for the RP2350 board
#[cfg(feature = "rp2350")]
pub mod task;

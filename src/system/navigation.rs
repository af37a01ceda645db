//! Navigation State Machine
//!
//! Two drive modes, each with an input entry point (joystick or button read)
//! and a range entry point (periodic obstacle check). The push-button switches
//! between them and always stops the rover.
//!
//! # Manual
//! The joystick maps straight onto headings. The only automatic behaviour is a
//! proximity stop while driving forward.
//!
//! # Autonomous
//! ```text
//!                 range < 13: stop
//!   ┌───────┐ ─────────────────────▶ ┌─────────┐ ──┐ range < 13:
//!   │ Clear │                        │ Blocked │   │ stop again
//!   └───────┘ ◀───────────────────── └─────────┘ ◀─┘
//!      │      range >= 13: forward,
//!      │      unless stopped by the operator
//!      └── while moving: steer toward the darker side
//! ```
//! The rover never moves into an obstacle: while Blocked, joystick up only
//! clears the operator stop, motion resumes on the next clear range reading.

use crate::system::board::{Board, LightReading};
use crate::system::config::{
    AUTONOMOUS_STOP_RANGE, DIMMER_SIDE_PERCENT, LEFT_LIGHT_GAIN, LIGHT_SAMPLE_MAX,
    MANUAL_STOP_RANGE, RIGHT_LIGHT_GAIN,
};
use crate::system::drive_command::{Direction, SteerToward, Steering};
use crate::system::echo::range;
use crate::system::input::InputCode;
use crate::system::motor::MotorActuator;

/// Who is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Joystick drive with forward proximity stop
    Manual,
    /// Light seeking with obstacle stop
    Autonomous,
}

impl DriveMode {
    /// The mode the push-button switches to
    pub fn toggled(self) -> Self {
        match self {
            DriveMode::Manual => DriveMode::Autonomous,
            DriveMode::Autonomous => DriveMode::Manual,
        }
    }
}

/// Obstacle sub-state of autonomous mode
///
/// Replaces waiting in place for the range to clear: the dispatcher keeps
/// serving input while the rover is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Obstacle {
    /// Nothing within the stop range at the last reading
    Clear,
    /// Held stopped until the range clears
    Blocked,
}

/// Mode state owned by the dispatch loop
///
/// Holds the drive mode, the operator stop of autonomous mode and the obstacle
/// sub-state. Every decision is applied through a [`MotorActuator`], the
/// navigator itself never touches the board except to sample light.
pub struct Navigator {
    mode: DriveMode,
    external_stop: bool,
    obstacle: Obstacle,
}

impl Navigator {
    /// Manual mode, path clear, no operator stop
    pub const fn new() -> Self {
        Self {
            mode: DriveMode::Manual,
            external_stop: false,
            obstacle: Obstacle::Clear,
        }
    }

    /// Active drive mode
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// True after the operator halted autonomous mode with the joystick
    pub fn external_stop(&self) -> bool {
        self.external_stop
    }

    /// Obstacle sub-state, only meaningful in autonomous mode
    pub fn obstacle(&self) -> Obstacle {
        self.obstacle
    }

    /// Handles one decoded input reading in the active mode
    pub fn on_input<B: Board>(&mut self, code: InputCode, actuator: &mut MotorActuator<B>) {
        match self.mode {
            DriveMode::Manual => self.manual_input(code, actuator),
            DriveMode::Autonomous => self.autonomous_input(code, actuator),
        }
    }

    /// Handles a range evaluation with the current echo pulse width
    pub fn on_range<B: Board>(&mut self, pulse_width_us: u32, actuator: &mut MotorActuator<B>) {
        let range = range(pulse_width_us);
        match self.mode {
            DriveMode::Manual => Self::manual_range(range, actuator),
            DriveMode::Autonomous => self.autonomous_range(range, actuator),
        }
    }

    fn manual_input<B: Board>(&mut self, code: InputCode, actuator: &mut MotorActuator<B>) {
        match code {
            InputCode::Left => actuator.drive(Direction::Left),
            InputCode::Down => actuator.drive(Direction::Backward),
            InputCode::Up => actuator.drive(Direction::Forward),
            InputCode::Center => actuator.stop(),
            InputCode::Right => actuator.drive(Direction::Right),
            InputCode::Button => self.switch_mode(actuator),
        }
    }

    fn manual_range<B: Board>(range: u32, actuator: &mut MotorActuator<B>) {
        if actuator.direction() == Direction::Forward && range < MANUAL_STOP_RANGE {
            info!("Obstacle at range {}, stopping", range);
            actuator.stop();
        }
    }

    fn autonomous_input<B: Board>(&mut self, code: InputCode, actuator: &mut MotorActuator<B>) {
        match code {
            InputCode::Up => {
                self.external_stop = false;
                if self.obstacle == Obstacle::Blocked {
                    debug!("Resume requested while blocked, waiting for clear range");
                } else {
                    actuator.drive(Direction::Forward);
                }
            }
            InputCode::Center => {
                self.external_stop = true;
                actuator.stop();
            }
            InputCode::Button => self.switch_mode(actuator),
            InputCode::Left | InputCode::Down | InputCode::Right => {}
        }
    }

    fn autonomous_range<B: Board>(&mut self, range: u32, actuator: &mut MotorActuator<B>) {
        if range < AUTONOMOUS_STOP_RANGE {
            if self.obstacle == Obstacle::Clear {
                info!("Obstacle at range {}, holding", range);
            }
            self.obstacle = Obstacle::Blocked;
            actuator.stop();
            return;
        }

        if self.obstacle == Obstacle::Blocked {
            self.obstacle = Obstacle::Clear;
            if self.external_stop {
                info!("Path clear, staying stopped on operator request");
            } else {
                info!("Path clear, resuming");
                actuator.drive(Direction::Forward);
            }
        }

        if actuator.direction() != Direction::Stopped {
            let reading = LightReading::sample(actuator.board_mut());
            actuator.steer(steer_toward_dimmer(reading));
        }
    }

    /// Button: stop, flip the mode, and leave autonomous state behind
    fn switch_mode<B: Board>(&mut self, actuator: &mut MotorActuator<B>) {
        actuator.stop();
        self.mode = self.mode.toggled();
        self.obstacle = Obstacle::Clear;
        if self.mode == DriveMode::Manual {
            actuator.restore_nominal_speed();
        }
        info!("Drive mode {}", self.mode);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Differential turn toward the darker side
///
/// The brighter side's motors run at their full light-proportional duty, the
/// darker side's at `DIMMER_SIDE_PERCENT` of theirs. Only a strictly brighter
/// left side turns right; a tie turns left.
pub fn steer_toward_dimmer(reading: LightReading) -> Steering {
    let left = u32::from(reading.left);
    let right = u32::from(reading.right);
    if left > right {
        Steering {
            toward: SteerToward::Right,
            left_on_time_us: light_duty(LEFT_LIGHT_GAIN, left, 100),
            right_on_time_us: light_duty(RIGHT_LIGHT_GAIN, right, DIMMER_SIDE_PERCENT),
        }
    } else {
        Steering {
            toward: SteerToward::Left,
            left_on_time_us: light_duty(LEFT_LIGHT_GAIN, left, DIMMER_SIDE_PERCENT),
            right_on_time_us: light_duty(RIGHT_LIGHT_GAIN, right, 100),
        }
    }
}

/// `gain * sample / LIGHT_SAMPLE_MAX * percent / 100`, truncated once at the end
fn light_duty(gain: u32, sample: u32, percent: u32) -> u32 {
    let scaled = u64::from(gain) * u64::from(sample) * u64::from(percent);
    (scaled / (u64::from(LIGHT_SAMPLE_MAX) * 100)) as u32
}

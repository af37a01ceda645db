//! Motor Actuator
//!
//! Owns the board and turns drive decisions into line and PWM writes:
//! - [`MotorActuator::drive`] sets one of the fixed heading patterns
//! - [`MotorActuator::steer`] runs the two sides at different speeds
//! - [`MotorActuator::restore_nominal_speed`] puts back the startup on-times
//!
//! It also remembers the last commanded heading, which the navigator reads to
//! decide whether the proximity checks apply, and the last indicator period.
//! The indicator is only signalled on a change, a repeated period would
//! restart the blink timer.

use crate::system::board::{Board, MotorChannel};
use crate::system::config::{MotorOnTimes, PWM_PERIOD_US};
use crate::system::drive_command::{Direction, DriveOutputs, Indicator, Steering, OUTPUT_MASK};

/// Drives the motor and lamp lines of a [`Board`]
///
/// Owns the board for the lifetime of the control loop. Headings are applied
/// as fixed line patterns, steering as a pair of PWM on-times.
pub struct MotorActuator<B: Board> {
    board: B,
    direction: Direction,
    nominal: MotorOnTimes,
    indicator_period: Option<u32>,
}

impl<B: Board> MotorActuator<B> {
    /// Takes over the board: all lines off, both motors at nominal speed
    pub fn new(mut board: B, nominal: MotorOnTimes) -> Self {
        board.write_outputs(OUTPUT_MASK, DriveOutputs::ALL_OFF.bits());
        board.set_motor_duty(MotorChannel::Left, nominal.left);
        board.set_motor_duty(MotorChannel::Right, nominal.right);
        info!(
            "Motors ready, on-times L:{}us R:{}us",
            nominal.left, nominal.right
        );
        Self {
            board,
            direction: Direction::Stopped,
            nominal,
            indicator_period: None,
        }
    }

    /// Last commanded heading
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sets the line pattern and indicator for `direction`
    pub fn drive(&mut self, direction: Direction) {
        self.board
            .write_outputs(OUTPUT_MASK, direction.outputs().bits());
        if let Some(indicator) = direction.indicator() {
            self.set_indicator(indicator);
        }
        if self.direction != direction {
            debug!("drive {}", direction);
        }
        self.direction = direction;
    }

    /// Clears all direction lines
    pub fn stop(&mut self) {
        self.drive(Direction::Stopped);
    }

    /// Applies a differential turn. The heading stays what it was.
    pub fn steer(&mut self, steering: Steering) {
        let left = saturate_on_time(steering.left_on_time_us);
        let right = saturate_on_time(steering.right_on_time_us);
        self.board.set_motor_duty(MotorChannel::Left, left);
        self.board.set_motor_duty(MotorChannel::Right, right);
        self.board
            .write_outputs(OUTPUT_MASK, steering.outputs().bits());
        self.set_indicator(Indicator::Blink);
        debug!("steer {} L:{}us R:{}us", steering.toward, left, right);
    }

    /// Puts both motor channels back to the startup on-times
    pub fn restore_nominal_speed(&mut self) {
        self.board
            .set_motor_duty(MotorChannel::Left, self.nominal.left);
        self.board
            .set_motor_duty(MotorChannel::Right, self.nominal.right);
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        let period_us = indicator.period_us();
        if self.indicator_period != Some(period_us) {
            self.board.set_indicator_period(period_us);
            self.indicator_period = Some(period_us);
        }
    }

    /// The board, for reads that do not go through a command
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable board access, used for sampling light and inputs
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}

/// On-times beyond the period keep the line high for the whole period
fn saturate_on_time(on_time_us: u32) -> u16 {
    on_time_us.min(PWM_PERIOD_US) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::board::mock::MockBoard;
    use crate::system::drive_command::SteerToward;

    fn actuator() -> MotorActuator<MockBoard> {
        MotorActuator::new(MockBoard::default(), MotorOnTimes::NOMINAL)
    }

    #[test]
    fn starts_stopped_at_nominal_speed() {
        let actuator = actuator();
        assert_eq!(actuator.direction(), Direction::Stopped);
        assert_eq!(actuator.board().outputs, 0);
        assert_eq!(actuator.board().left_duty, Some(4386));
        assert_eq!(actuator.board().right_duty, Some(3070));
        assert_eq!(actuator.board().indicator_period, None);
    }

    #[test]
    fn straight_drive_holds_indicator_solid() {
        let mut actuator = actuator();
        actuator.drive(Direction::Forward);
        assert_eq!(actuator.direction(), Direction::Forward);
        assert_eq!(actuator.board().outputs, Direction::Forward.outputs().bits());
        assert_eq!(actuator.board().indicator_period, Some(0));
    }

    #[test]
    fn turns_blink_indicator() {
        let mut actuator = actuator();
        actuator.drive(Direction::Left);
        assert_eq!(actuator.board().indicator_period, Some(250_000));
        actuator.drive(Direction::Right);
        assert_eq!(actuator.board().outputs, Direction::Right.outputs().bits());
        assert_eq!(actuator.board().indicator_period, Some(250_000));
    }

    #[test]
    fn stop_clears_lines_and_keeps_indicator() {
        let mut actuator = actuator();
        actuator.drive(Direction::Left);
        actuator.stop();
        assert_eq!(actuator.direction(), Direction::Stopped);
        assert_eq!(actuator.board().outputs, 0);
        assert_eq!(actuator.board().indicator_period, Some(250_000));
    }

    #[test]
    fn steering_saturates_and_keeps_heading() {
        let mut actuator = actuator();
        actuator.drive(Direction::Forward);
        actuator.steer(Steering {
            toward: SteerToward::Right,
            left_on_time_us: 90_000,
            right_on_time_us: 1_234,
        });
        assert_eq!(actuator.direction(), Direction::Forward);
        assert_eq!(actuator.board().left_duty, Some(5000));
        assert_eq!(actuator.board().right_duty, Some(1234));
        assert_eq!(actuator.board().outputs, 1 << 12 | 1 << 6 | 1 << 23);
        assert_eq!(actuator.board().indicator_period, Some(250_000));
    }

    #[test]
    fn repeated_steering_signals_indicator_once() {
        let mut actuator = actuator();
        actuator.drive(Direction::Forward);
        let steering = Steering {
            toward: SteerToward::Left,
            left_on_time_us: 1_000,
            right_on_time_us: 2_000,
        };
        for _ in 0..3 {
            actuator.steer(steering);
        }
        assert_eq!(actuator.board().indicator_period, Some(250_000));
        // solid for forward, then blink once
        assert_eq!(actuator.board().indicator_writes, 2);
    }

    #[test]
    fn held_turn_signals_indicator_once() {
        let mut actuator = actuator();
        for _ in 0..4 {
            actuator.drive(Direction::Right);
        }
        actuator.stop();
        actuator.drive(Direction::Right);
        assert_eq!(actuator.board().indicator_writes, 1);

        actuator.drive(Direction::Backward);
        assert_eq!(actuator.board().indicator_period, Some(0));
        assert_eq!(actuator.board().indicator_writes, 2);
    }

    #[test]
    fn restore_nominal_after_steering() {
        let mut actuator = actuator();
        actuator.steer(Steering {
            toward: SteerToward::Left,
            left_on_time_us: 10,
            right_on_time_us: 20,
        });
        actuator.restore_nominal_speed();
        assert_eq!(actuator.board().left_duty, Some(4386));
        assert_eq!(actuator.board().right_duty, Some(3070));
    }
}

//! Drive Command Module
//!
//! Named descriptions of what the motor and lamp lines should do. The
//! navigator works with these types only; they are turned into the output
//! bit-field in [`DriveOutputs::bits`] right before the actuator writes them.
//!
//! # Output Lines
//! ```text
//!   bit  3  front-left lamp        bit 20  right motors backward
//!   bit  6  rear-right lamp        bit 23  left motors forward
//!   bit  7  rear-left lamp         bit 24  left motors backward
//!   bit 12  front-right lamp       bit 30  right motors forward
//! ```

use crate::system::config::INDICATOR_BLINK_PERIOD_US;

const LAMP_FRONT_LEFT: u32 = 1 << 3;
const LAMP_REAR_RIGHT: u32 = 1 << 6;
const LAMP_REAR_LEFT: u32 = 1 << 7;
const LAMP_FRONT_RIGHT: u32 = 1 << 12;
const RIGHT_MOTORS_BACKWARD: u32 = 1 << 20;
const LEFT_MOTORS_FORWARD: u32 = 1 << 23;
const LEFT_MOTORS_BACKWARD: u32 = 1 << 24;
const RIGHT_MOTORS_FORWARD: u32 = 1 << 30;

/// Every line the actuator owns
pub const OUTPUT_MASK: u32 = LAMP_FRONT_LEFT
    | LAMP_REAR_RIGHT
    | LAMP_REAR_LEFT
    | LAMP_FRONT_RIGHT
    | RIGHT_MOTORS_BACKWARD
    | LEFT_MOTORS_FORWARD
    | LEFT_MOTORS_BACKWARD
    | RIGHT_MOTORS_FORWARD;

/// Commanded heading of the rover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Right,
    Backward,
    Left,
    Stopped,
}

/// Spin of the motors on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wheel {
    Forward,
    Backward,
    Idle,
}

/// Lamp pair to light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamps {
    Off,
    Front,
    Rear,
    LeftSide,
    RightSide,
}

/// Turn indicator timer setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    Solid,
    Blink,
}

impl Indicator {
    /// Timer period for this setting, 0 is solid
    pub const fn period_us(self) -> u32 {
        match self {
            Indicator::Solid => 0,
            Indicator::Blink => INDICATOR_BLINK_PERIOD_US,
        }
    }
}

/// Target state of all direction and lamp lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveOutputs {
    pub left: Wheel,
    pub right: Wheel,
    pub lamps: Lamps,
}

impl DriveOutputs {
    /// Motors idle, lamps off
    pub const ALL_OFF: Self = Self {
        left: Wheel::Idle,
        right: Wheel::Idle,
        lamps: Lamps::Off,
    };

    /// Output bit-field for this state
    pub const fn bits(&self) -> u32 {
        let left = match self.left {
            Wheel::Forward => LEFT_MOTORS_FORWARD,
            Wheel::Backward => LEFT_MOTORS_BACKWARD,
            Wheel::Idle => 0,
        };
        let right = match self.right {
            Wheel::Forward => RIGHT_MOTORS_FORWARD,
            Wheel::Backward => RIGHT_MOTORS_BACKWARD,
            Wheel::Idle => 0,
        };
        let lamps = match self.lamps {
            Lamps::Off => 0,
            Lamps::Front => LAMP_FRONT_LEFT | LAMP_FRONT_RIGHT,
            Lamps::Rear => LAMP_REAR_LEFT | LAMP_REAR_RIGHT,
            Lamps::LeftSide => LAMP_FRONT_LEFT | LAMP_REAR_LEFT,
            Lamps::RightSide => LAMP_FRONT_RIGHT | LAMP_REAR_RIGHT,
        };
        left | right | lamps
    }
}

impl Direction {
    /// Lines driven for this heading. Turns spin the sides against each other.
    pub const fn outputs(self) -> DriveOutputs {
        match self {
            Direction::Forward => DriveOutputs {
                left: Wheel::Forward,
                right: Wheel::Forward,
                lamps: Lamps::Front,
            },
            Direction::Backward => DriveOutputs {
                left: Wheel::Backward,
                right: Wheel::Backward,
                lamps: Lamps::Rear,
            },
            Direction::Right => DriveOutputs {
                left: Wheel::Forward,
                right: Wheel::Backward,
                lamps: Lamps::RightSide,
            },
            Direction::Left => DriveOutputs {
                left: Wheel::Backward,
                right: Wheel::Forward,
                lamps: Lamps::LeftSide,
            },
            Direction::Stopped => DriveOutputs::ALL_OFF,
        }
    }

    /// Indicator setting for this heading. `None` leaves the indicator as is.
    pub const fn indicator(self) -> Option<Indicator> {
        match self {
            Direction::Forward | Direction::Backward => Some(Indicator::Solid),
            Direction::Left | Direction::Right => Some(Indicator::Blink),
            Direction::Stopped => None,
        }
    }
}

/// Side a differential turn heads for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteerToward {
    Left,
    Right,
}

/// Gentle turn by running the two sides at different speeds
///
/// On-times may exceed the PWM period, the actuator saturates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steering {
    pub toward: SteerToward,
    pub left_on_time_us: u32,
    pub right_on_time_us: u32,
}

impl Steering {
    /// Only the outer side is driven forward, the lamps on the inner side light up
    pub const fn outputs(&self) -> DriveOutputs {
        match self.toward {
            SteerToward::Right => DriveOutputs {
                left: Wheel::Forward,
                right: Wheel::Idle,
                lamps: Lamps::RightSide,
            },
            SteerToward::Left => DriveOutputs {
                left: Wheel::Idle,
                right: Wheel::Forward,
                lamps: Lamps::LeftSide,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_line_patterns() {
        assert_eq!(
            Direction::Forward.outputs().bits(),
            1 << 3 | 1 << 12 | 1 << 23 | 1 << 30
        );
        assert_eq!(
            Direction::Backward.outputs().bits(),
            1 << 6 | 1 << 7 | 1 << 20 | 1 << 24
        );
        assert_eq!(
            Direction::Right.outputs().bits(),
            1 << 12 | 1 << 6 | 1 << 20 | 1 << 23
        );
        assert_eq!(
            Direction::Left.outputs().bits(),
            1 << 3 | 1 << 7 | 1 << 24 | 1 << 30
        );
        assert_eq!(Direction::Stopped.outputs().bits(), 0);
    }

    #[test]
    fn steering_line_patterns() {
        let toward = |toward| Steering {
            toward,
            left_on_time_us: 0,
            right_on_time_us: 0,
        };
        assert_eq!(
            toward(SteerToward::Right).outputs().bits(),
            1 << 12 | 1 << 6 | 1 << 23
        );
        assert_eq!(
            toward(SteerToward::Left).outputs().bits(),
            1 << 3 | 1 << 7 | 1 << 30
        );
    }

    #[test]
    fn every_pattern_stays_within_mask() {
        for direction in [
            Direction::Forward,
            Direction::Right,
            Direction::Backward,
            Direction::Left,
            Direction::Stopped,
        ] {
            assert_eq!(direction.outputs().bits() & !OUTPUT_MASK, 0);
        }
    }

    #[test]
    fn indicator_per_direction() {
        assert_eq!(Direction::Forward.indicator(), Some(Indicator::Solid));
        assert_eq!(Direction::Backward.indicator(), Some(Indicator::Solid));
        assert_eq!(Direction::Left.indicator(), Some(Indicator::Blink));
        assert_eq!(Direction::Right.indicator(), Some(Indicator::Blink));
        assert_eq!(Direction::Stopped.indicator(), None);
        assert_eq!(Indicator::Blink.period_us(), 250_000);
    }
}

//! Board abstraction
//!
//! Everything the control core needs from the hardware, and nothing more.
//! Register level setup (timer prescalers, ADC channels, PWM wiring, pin
//! muxing) belongs to the implementor.

use crate::system::config::LIGHT_SAMPLE_MAX;

/// PWM channel driving one side of the rover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorChannel {
    Left,
    Right,
}

/// Analog light sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightSensor {
    Left,
    Right,
}

/// Hardware access used by the actuator and the dispatcher
pub trait Board {
    /// Writes `value` to the output lines selected by `mask`
    fn write_outputs(&mut self, mask: u32, value: u32);

    /// Sets the on-time of a motor PWM channel (µs within the PWM period)
    fn set_motor_duty(&mut self, channel: MotorChannel, on_time_us: u16);

    /// Sets the indicator period (µs), 0 holds the indicator solid
    fn set_indicator_period(&mut self, period_us: u32);

    /// Samples a light sensor, 12 bit
    fn read_light(&mut self, sensor: LightSensor) -> u16;

    /// Reads the joystick and button bit-field in one go
    fn read_inputs(&mut self) -> u16;

    /// Free-running microsecond count, same clock as the echo capture
    fn now_us(&self) -> u32;
}

/// One sample of both light sensors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightReading {
    pub left: u16,
    pub right: u16,
}

impl LightReading {
    /// Samples left then right, masking each to 12 bits
    pub fn sample<B: Board>(board: &mut B) -> Self {
        Self {
            left: board.read_light(LightSensor::Left) & LIGHT_SAMPLE_MAX,
            right: board.read_light(LightSensor::Right) & LIGHT_SAMPLE_MAX,
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Board double recording every write
    #[derive(Debug, Default)]
    pub struct MockBoard {
        pub outputs: u32,
        pub output_writes: usize,
        pub left_duty: Option<u16>,
        pub right_duty: Option<u16>,
        pub indicator_period: Option<u32>,
        pub indicator_writes: usize,
        pub light: LightReading,
        pub light_reads: usize,
        pub inputs: u16,
        pub now_us: u32,
    }

    impl Board for MockBoard {
        fn write_outputs(&mut self, mask: u32, value: u32) {
            self.outputs = (self.outputs & !mask) | (value & mask);
            self.output_writes += 1;
        }

        fn set_motor_duty(&mut self, channel: MotorChannel, on_time_us: u16) {
            match channel {
                MotorChannel::Left => self.left_duty = Some(on_time_us),
                MotorChannel::Right => self.right_duty = Some(on_time_us),
            }
        }

        fn set_indicator_period(&mut self, period_us: u32) {
            self.indicator_period = Some(period_us);
            self.indicator_writes += 1;
        }

        fn read_light(&mut self, sensor: LightSensor) -> u16 {
            self.light_reads += 1;
            match sensor {
                LightSensor::Left => self.light.left,
                LightSensor::Right => self.light.right,
            }
        }

        fn read_inputs(&mut self) -> u16 {
            self.inputs
        }

        fn now_us(&self) -> u32 {
            self.now_us
        }
    }
}

//! RP2350 Board Binding
//!
//! Implements [`Board`] on top of embassy-rp drivers.
//!
//! All PWM slices run at 1 MHz (1 µs per tick) with `top = period - 1`, so a
//! compare value is an on-time in µs:
//! - motor slice: channel A left side, channel B right side
//! - ranging slice: a 10 µs trigger pulse at the start of every period
//!
//! The light sensors are read through the blocking ADC. A failed conversion is
//! logged and reads as dark.

use embassy_rp::adc::{self, Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Instant;

use crate::system::board::{Board, LightSensor, MotorChannel};
use crate::system::config::{PWM_PERIOD_US, TRIGGER_PULSE_US};
use crate::system::indicator;
use crate::system::input::{
    BUTTON, JOYSTICK_CENTER, JOYSTICK_DOWN, JOYSTICK_LEFT, JOYSTICK_RIGHT, JOYSTICK_UP,
};
use crate::task::resources::{
    DriveLineResources, JoystickResources, LightSensorResources, MotorPwmResources,
    RangingResources,
};

/// PWM tick rate shared by every slice
const PWM_TICK_HZ: u32 = 1_000_000;

/// Free-running microsecond count, wrapping at 2^32
pub fn now_us() -> u32 {
    Instant::now().as_micros() as u32
}

/// PWM config with 1 µs ticks and the rover's PWM period
fn pwm_config() -> pwm::Config {
    let divider = (embassy_rp::clocks::clk_sys_freq() / PWM_TICK_HZ) as u8; // 150 at 150MHz
    let mut config = pwm::Config::default();
    config.divider = divider.into();
    config.top = (PWM_PERIOD_US - 1) as u16;
    config
}

/// [`Board`] for the rover's RP2350 wiring
///
/// Owns every driver the control loop touches. The indicator output belongs to
/// the blink task and is reached through [`indicator::update`].
pub struct Rp2350Board {
    /// Output lines with their bit in the output bit-field
    lines: [(u32, Output<'static>); 8],
    motors: Pwm<'static>,
    motor_config: pwm::Config,
    /// Kept alive so the trigger keeps running
    _trigger: Pwm<'static>,
    adc: Adc<'static, Blocking>,
    light_left: Channel<'static>,
    light_right: Channel<'static>,
    joystick: [(u16, Input<'static>); 6],
}

impl Rp2350Board {
    /// Sets up all drivers: lines low, motors at zero duty, trigger running
    pub fn new(
        lines: DriveLineResources,
        motor_pwm: MotorPwmResources,
        ranging: RangingResources,
        light: LightSensorResources,
        joystick: JoystickResources,
    ) -> Self {
        let lines = [
            (1 << 3, Output::new(lines.lamp_front_left, Level::Low)),
            (1 << 6, Output::new(lines.lamp_rear_right, Level::Low)),
            (1 << 7, Output::new(lines.lamp_rear_left, Level::Low)),
            (1 << 12, Output::new(lines.lamp_front_right, Level::Low)),
            (1 << 20, Output::new(lines.right_backward, Level::Low)),
            (1 << 23, Output::new(lines.left_forward, Level::Low)),
            (1 << 24, Output::new(lines.left_backward, Level::Low)),
            (1 << 30, Output::new(lines.right_forward, Level::Low)),
        ];

        let motor_config = pwm_config();
        let motors = Pwm::new_output_ab(
            motor_pwm.slice,
            motor_pwm.left_pin,
            motor_pwm.right_pin,
            motor_config.clone(),
        );

        let mut trigger_config = pwm_config();
        trigger_config.compare_a = TRIGGER_PULSE_US as u16;
        let trigger = Pwm::new_output_a(ranging.trigger_slice, ranging.trigger_pin, trigger_config);

        let adc = Adc::new_blocking(light.adc, adc::Config::default());
        let light_left = Channel::new_pin(light.left_pin, Pull::None);
        let light_right = Channel::new_pin(light.right_pin, Pull::None);

        let joystick = [
            (JOYSTICK_LEFT, Input::new(joystick.left, Pull::Up)),
            (JOYSTICK_DOWN, Input::new(joystick.down, Pull::Up)),
            (JOYSTICK_UP, Input::new(joystick.up, Pull::Up)),
            (JOYSTICK_CENTER, Input::new(joystick.center, Pull::Up)),
            (JOYSTICK_RIGHT, Input::new(joystick.right, Pull::Up)),
            (BUTTON, Input::new(joystick.button, Pull::Up)),
        ];

        Self {
            lines,
            motors,
            motor_config,
            _trigger: trigger,
            adc,
            light_left,
            light_right,
            joystick,
        }
    }
}

impl Board for Rp2350Board {
    fn write_outputs(&mut self, mask: u32, value: u32) {
        for (bit, line) in self.lines.iter_mut() {
            if mask & *bit != 0 {
                line.set_level(Level::from(value & *bit != 0));
            }
        }
    }

    fn set_motor_duty(&mut self, channel: MotorChannel, on_time_us: u16) {
        match channel {
            MotorChannel::Left => self.motor_config.compare_a = on_time_us,
            MotorChannel::Right => self.motor_config.compare_b = on_time_us,
        }
        self.motors.set_config(&self.motor_config);
    }

    fn set_indicator_period(&mut self, period_us: u32) {
        indicator::update(period_us);
    }

    fn read_light(&mut self, sensor: LightSensor) -> u16 {
        let channel = match sensor {
            LightSensor::Left => &mut self.light_left,
            LightSensor::Right => &mut self.light_right,
        };
        match self.adc.blocking_read(channel) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{} light sensor read failed: {:?}", sensor, e);
                0
            }
        }
    }

    fn read_inputs(&mut self) -> u16 {
        self.joystick
            .iter()
            .filter(|(_, contact)| contact.is_low())
            .fold(0, |bits, (bit, _)| bits | bit)
    }

    fn now_us(&self) -> u32 {
        now_us()
    }
}

//! Hardware Resource Management
//!
//! Assigns the RP2350 pins and peripherals to the tasks that own them.
//!
//! # Resource Groups
//! - Drive lines: motor direction and lamp outputs, one pin per output bit
//! - Motor PWM: one slice, channel A left side, channel B right side
//! - Ranging: trigger PWM output and echo capture input
//! - Light sensors: ADC with the two photo sensor pins
//! - Joystick: five switch contacts and the mode push-button
//! - Indicator: direction indicator output
//!
//! Pin numbers follow the Pico 2 header; `drive_lines` pins map to bits
//! 3, 6, 7, 12, 20, 23, 24 and 30 of the output bit-field in that order.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// Motor direction and lamp outputs
    drive_lines: DriveLineResources {
        lamp_front_left: PIN_2,
        lamp_rear_right: PIN_3,
        lamp_rear_left: PIN_4,
        lamp_front_right: PIN_5,
        right_backward: PIN_6,
        left_forward: PIN_7,
        left_backward: PIN_8,
        right_forward: PIN_9,
    },
    /// Motor speed PWM, both sides on one slice
    motor_pwm: MotorPwmResources {
        slice: PWM_SLICE5,
        left_pin: PIN_10,
        right_pin: PIN_11,
    },
    /// Ultrasonic ranging sensor
    ranging: RangingResources {
        trigger_slice: PWM_SLICE7,
        trigger_pin: PIN_14,
    },
    /// Echo line, captured on every edge
    echo: EchoResources {
        echo_pin: PIN_15,
    },
    /// Photo sensors on ADC0/ADC1
    light_sensors: LightSensorResources {
        adc: ADC,
        left_pin: PIN_26,
        right_pin: PIN_27,
    },
    /// Joystick contacts and mode button, active low
    joystick: JoystickResources {
        left: PIN_16,
        down: PIN_17,
        up: PIN_18,
        center: PIN_19,
        right: PIN_20,
        button: PIN_21,
    },
    /// Direction indicator
    indicator: IndicatorResources {
        pin: PIN_22,
    },
}

//! Compile-time configuration
//!
//! All timing and scaling constants of the rover live here. Every timer on the
//! board ticks once per microsecond, so periods and on-times are plain µs counts.
//!
//! # Motor speed
//! The target speed is configured as an RPM figure. At startup it is turned into
//! two PWM on-times, one per motor channel:
//! ```text
//! on_time = round(channel_power * TARGET_RPM / RPM_FULL_SCALE)
//! ```
//! Rounding is half up, done in integer arithmetic so the result does not depend
//! on float behaviour. A `const` assertion rejects a target RPM whose on-times
//! would not fit into the PWM period.

/// Target motor speed. Documented range is 0-120, anything up to
/// `RPM_FULL_SCALE` still yields on-times within the PWM period.
pub const TARGET_RPM: u32 = 150;

/// RPM at which a channel would be driven with its full power figure
pub const RPM_FULL_SCALE: u32 = 171;

/// PWM period shared by both motor channels and the ranging trigger (µs)
pub const PWM_PERIOD_US: u32 = 5000;

/// On-time at full scale for the right-hand motors (µs)
pub const RIGHT_MOTOR_POWER_US: u32 = 3500;

/// On-time at full scale for the left-hand motors (µs)
pub const LEFT_MOTOR_POWER_US: u32 = 5000;

/// Length of the ultrasonic trigger pulse sent every PWM period (µs)
pub const TRIGGER_PULSE_US: u32 = 10;

/// Joystick and button poll period (µs)
pub const INPUT_POLL_PERIOD_US: u64 = 200_000;

/// Range evaluation period (µs)
pub const RANGE_POLL_PERIOD_US: u64 = 150_000;

/// Blink period of the turn indicator (µs)
pub const INDICATOR_BLINK_PERIOD_US: u32 = 250_000;

/// Echo pulse width per range unit (µs)
pub const RANGE_SCALE_US: u32 = 116;

/// Manual mode stops a forward drive below this range
pub const MANUAL_STOP_RANGE: u32 = 12;

/// Autonomous mode holds the rover stopped below this range
pub const AUTONOMOUS_STOP_RANGE: u32 = 13;

/// Echo watchdog window (µs). A pulse older or wider than this is stale.
pub const ECHO_WATCHDOG_US: u32 = 0x6500;

/// Largest value a 12 bit light sample can take
pub const LIGHT_SAMPLE_MAX: u16 = 0x0FFF;

/// Light-to-duty gain of the left motors, as `numerator / LIGHT_SAMPLE_MAX`
pub const LEFT_LIGHT_GAIN: u32 = 18 * PWM_PERIOD_US;

/// Light-to-duty gain of the right motors, as `numerator / LIGHT_SAMPLE_MAX`
pub const RIGHT_LIGHT_GAIN: u32 = 8 * PWM_PERIOD_US;

/// Share of its computed duty the motor on the dimmer side gets, in percent
pub const DIMMER_SIDE_PERCENT: u32 = 80;

/// PWM on-times of the two motor channels at the configured target speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOnTimes {
    /// Left-hand motors (µs)
    pub left: u16,
    /// Right-hand motors (µs)
    pub right: u16,
}

impl MotorOnTimes {
    /// On-times for `TARGET_RPM`, applied at startup and whenever manual mode
    /// is re-entered
    pub const NOMINAL: Self = Self::from_rpm(TARGET_RPM);

    /// Derives both on-times for the given RPM, rounding half up
    pub const fn from_rpm(rpm: u32) -> Self {
        Self {
            left: scale_rounded(LEFT_MOTOR_POWER_US, rpm),
            right: scale_rounded(RIGHT_MOTOR_POWER_US, rpm),
        }
    }

    /// True if both on-times fit into the PWM period
    pub const fn fits_period(&self) -> bool {
        self.left as u32 <= PWM_PERIOD_US && self.right as u32 <= PWM_PERIOD_US
    }
}

const fn scale_rounded(power_us: u32, rpm: u32) -> u16 {
    ((power_us * rpm + RPM_FULL_SCALE / 2) / RPM_FULL_SCALE) as u16
}

const _: () = assert!(
    MotorOnTimes::NOMINAL.fits_period(),
    "TARGET_RPM yields motor on-times longer than the PWM period"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_on_times_for_150_rpm() {
        // 3500 * 150 / 171 = 3070.18, 5000 * 150 / 171 = 4385.96
        let on_times = MotorOnTimes::from_rpm(150);
        assert_eq!(on_times.right, 3070);
        assert_eq!(on_times.left, 4386);
        assert!(on_times.fits_period());
        assert_eq!(MotorOnTimes::NOMINAL, on_times);
    }

    #[test]
    fn on_times_across_documented_range() {
        assert_eq!(MotorOnTimes::from_rpm(0), MotorOnTimes { left: 0, right: 0 });

        // 3500 * 120 / 171 = 2456.14, 5000 * 120 / 171 = 3508.77
        let on_times = MotorOnTimes::from_rpm(120);
        assert_eq!(on_times.right, 2456);
        assert_eq!(on_times.left, 3509);

        for rpm in 0..=RPM_FULL_SCALE {
            assert!(MotorOnTimes::from_rpm(rpm).fits_period(), "rpm {}", rpm);
        }
    }

    #[test]
    fn rpm_above_full_scale_overruns_period() {
        assert!(!MotorOnTimes::from_rpm(RPM_FULL_SCALE + 10).fits_period());
    }
}

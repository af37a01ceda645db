//! Rover firmware entry point
//!
//! Initializes the board and spawns the control tasks. Edge capture and the
//! poll timers run on a high priority interrupt executor so they preempt the
//! dispatcher, which runs in thread mode and sleeps between events.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use light_rover::split_resources;
use light_rover::task::{
    board::Rp2350Board,
    dispatch::dispatch,
    echo_capture::echo_capture,
    event_timers::{input_poll_timer, range_poll_timer},
    indicator_blink::indicator_blink,
    resources::{
        AssignedResources, DriveLineResources, EchoResources, IndicatorResources,
        JoystickResources, LightSensorResources, MotorPwmResources, RangingResources,
    },
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Executor for edge capture and poll timers
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    let r = split_resources!(p);

    // The board drives every line low before the dispatcher takes over
    let board = Rp2350Board::new(
        r.drive_lines,
        r.motor_pwm,
        r.ranging,
        r.light_sensors,
        r.joystick,
    );

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(echo_capture(r.echo)).unwrap();
    high.spawn(input_poll_timer()).unwrap();
    high.spawn(range_poll_timer()).unwrap();

    spawner.spawn(indicator_blink(r.indicator)).unwrap();
    spawner.spawn(dispatch(board)).unwrap();

    info!("Rover started");
}

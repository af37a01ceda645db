//! Dispatch Task
//!
//! Owns the board and runs the control loop in thread mode. Suspends between
//! events so the core sleeps until a timer fires.

use crate::system::config::MotorOnTimes;
use crate::system::dispatcher::Dispatcher;
use crate::system::motor::MotorActuator;
use crate::system::state::SHARED;
use crate::task::board::Rp2350Board;

/// Takes over the board at nominal speed and runs the control loop
#[embassy_executor::task]
pub async fn dispatch(board: Rp2350Board) {
    let actuator = MotorActuator::new(board, MotorOnTimes::NOMINAL);
    let mut dispatcher = Dispatcher::new(&SHARED, actuator);
    dispatcher.run().await
}

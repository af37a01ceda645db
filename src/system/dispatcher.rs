//! Dispatcher
//!
//! One step of the control loop: take the pending event, then route it to the
//! navigator of the active drive mode. The event kind picks the entry point,
//! the mode picks the state machine.
//!
//! An input event also runs the echo watchdog, so a sensor that stopped
//! answering reads as zero on the next range evaluation.

use crate::system::board::Board;
use crate::system::event::EventKind;
use crate::system::input::InputCode;
use crate::system::motor::MotorActuator;
use crate::system::navigation::{DriveMode, Navigator};
use crate::system::state::SharedState;

/// The control loop
///
/// Owns the actuator and the navigator and reads events and echo data from
/// the shared state. Only one dispatcher runs, in thread mode.
pub struct Dispatcher<'a, B: Board> {
    shared: &'a SharedState,
    actuator: MotorActuator<B>,
    navigator: Navigator,
}

impl<'a, B: Board> Dispatcher<'a, B> {
    /// Starts in manual mode with the actuator as handed over
    pub fn new(shared: &'a SharedState, actuator: MotorActuator<B>) -> Self {
        Self {
            shared,
            actuator,
            navigator: Navigator::new(),
        }
    }

    /// Runs forever, suspending between events
    pub async fn run(&mut self) -> ! {
        info!("Dispatcher started in {} mode", self.navigator.mode());
        loop {
            let kind = self.shared.next_event().await;
            self.dispatch(kind);
        }
    }

    /// Handles the pending event, if any. Returns false if there was none.
    #[cfg(test)]
    pub(crate) fn poll(&mut self) -> bool {
        match self.shared.take_event() {
            Some(kind) => {
                self.dispatch(kind);
                true
            }
            None => false,
        }
    }

    /// Routes one event to the navigator of the active mode
    pub fn dispatch(&mut self, kind: EventKind) {
        match kind {
            EventKind::InputReady => self.poll_input(),
            EventKind::RangeReady => {
                let pulse_width = self.shared.echo.pulse_width();
                self.navigator.on_range(pulse_width, &mut self.actuator);
            }
        }
    }

    fn poll_input(&mut self) {
        let bits = self.actuator.board_mut().read_inputs();
        if bits != 0 {
            match InputCode::from_bits(bits) {
                Some(code) => {
                    debug!("input {} in {} mode", code, self.navigator.mode());
                    self.navigator.on_input(code, &mut self.actuator);
                }
                None => debug!("ignoring input {=u16:#x}", bits),
            }
        }

        let now = self.actuator.board().now_us();
        if self.shared.echo.reset_if_stale(now) {
            debug!("echo stale, pulse width cleared");
        }
    }

    /// Active drive mode
    pub fn mode(&self) -> DriveMode {
        self.navigator.mode()
    }

    #[cfg(test)]
    pub(crate) fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[cfg(test)]
    pub(crate) fn actuator(&self) -> &MotorActuator<B> {
        &self.actuator
    }

    #[cfg(test)]
    pub(crate) fn actuator_mut(&mut self) -> &mut MotorActuator<B> {
        &mut self.actuator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::board::mock::MockBoard;
    use crate::system::config::{MotorOnTimes, ECHO_WATCHDOG_US};
    use crate::system::drive_command::Direction;
    use crate::system::input::{BUTTON, JOYSTICK_CENTER, JOYSTICK_UP};
    use crate::system::navigation::Obstacle;

    fn dispatcher(shared: &SharedState) -> Dispatcher<'_, MockBoard> {
        Dispatcher::new(
            shared,
            MotorActuator::new(MockBoard::default(), MotorOnTimes::NOMINAL),
        )
    }

    fn press(dispatcher: &mut Dispatcher<'_, MockBoard>, shared: &SharedState, bits: u16) {
        dispatcher.actuator_mut().board_mut().inputs = bits;
        shared.raise(EventKind::InputReady);
        assert!(dispatcher.poll());
        dispatcher.actuator_mut().board_mut().inputs = 0;
    }

    fn echo(shared: &SharedState, rising: u32, falling: u32) {
        shared.echo.on_edge(rising);
        shared.echo.on_edge(falling);
    }

    #[test]
    fn nothing_pending_is_a_no_op() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        assert!(!dispatcher.poll());
        assert_eq!(dispatcher.actuator().board().output_writes, 1);
    }

    #[test]
    fn idle_input_changes_nothing() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        press(&mut dispatcher, &shared, 0);
        assert_eq!(dispatcher.actuator().board().output_writes, 1);
        assert_eq!(dispatcher.actuator().direction(), Direction::Stopped);
    }

    #[test]
    fn chord_is_ignored() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        press(&mut dispatcher, &shared, JOYSTICK_UP | JOYSTICK_CENTER);
        assert_eq!(dispatcher.actuator().board().output_writes, 1);
    }

    #[test]
    fn range_event_uses_live_pulse_width() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        press(&mut dispatcher, &shared, JOYSTICK_UP);
        assert_eq!(dispatcher.actuator().direction(), Direction::Forward);

        echo(&shared, 0, 2_000);
        shared.raise(EventKind::RangeReady);
        assert!(dispatcher.poll());
        assert_eq!(dispatcher.actuator().direction(), Direction::Forward);

        echo(&shared, 5_000, 6_000);
        shared.raise(EventKind::RangeReady);
        assert!(dispatcher.poll());
        assert_eq!(dispatcher.actuator().direction(), Direction::Stopped);
    }

    #[test]
    fn button_routes_to_autonomous_handlers() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        press(&mut dispatcher, &shared, BUTTON);
        assert_eq!(dispatcher.mode(), DriveMode::Autonomous);

        press(&mut dispatcher, &shared, JOYSTICK_UP);
        echo(&shared, 0, 500);
        shared.raise(EventKind::RangeReady);
        dispatcher.poll();
        assert_eq!(dispatcher.navigator().obstacle(), Obstacle::Blocked);
        assert_eq!(dispatcher.actuator().direction(), Direction::Stopped);

        // input is still served while blocked
        press(&mut dispatcher, &shared, BUTTON);
        assert_eq!(dispatcher.mode(), DriveMode::Manual);
    }

    #[test]
    fn input_poll_clears_stale_echo() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        echo(&shared, 10_000, 11_800);
        shared.echo.on_edge(20_000);

        dispatcher.actuator_mut().board_mut().now_us = 11_800 + ECHO_WATCHDOG_US;
        press(&mut dispatcher, &shared, 0);
        assert_eq!(shared.echo.pulse_width(), 1_800);

        dispatcher.actuator_mut().board_mut().now_us = 11_800 + ECHO_WATCHDOG_US + 1;
        press(&mut dispatcher, &shared, 0);
        assert_eq!(shared.echo.pulse_width(), 0);
        assert_eq!(shared.echo.rising_edge(), 0);
    }

    #[test]
    fn only_the_latest_event_is_served() {
        let shared = SharedState::new();
        let mut dispatcher = dispatcher(&shared);
        dispatcher.actuator_mut().board_mut().inputs = JOYSTICK_UP;
        shared.raise(EventKind::InputReady);
        shared.raise(EventKind::RangeReady);
        assert!(dispatcher.poll());
        assert!(!dispatcher.poll());
        assert_eq!(dispatcher.actuator().direction(), Direction::Stopped);
    }
}

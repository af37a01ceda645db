pub mod board;
pub mod dispatch;
pub mod echo_capture;
pub mod event_timers;
pub mod indicator_blink;
pub mod resources;

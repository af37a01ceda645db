//! Core system components for rover operation
pub mod board;
pub mod config;
pub mod dispatcher;
pub mod drive_command;
pub mod echo;
pub mod event;
pub mod indicator;
pub mod input;
pub mod motor;
pub mod navigation;
pub mod state;

//! Watch-party client implementation.
//!
//! `watch`, `playback` and `chat` are pure state machines; `bootstrap`,
//! `session` and `runner` wire them to the HTTP gateway, the real-time
//! channel and the terminal.

pub mod auth;
pub mod bootstrap;
pub mod chat;
pub mod command;
pub mod formatter;
pub mod playback;
pub mod runner;
pub mod session;
pub mod ui;
pub mod watch;

pub use runner::{ClientOptions, run_client};

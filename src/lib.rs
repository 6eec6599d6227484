//! vision-hud - a themed assistant boot sequence for the terminal
//!
//! This library provides the login, authorization and boot animations, the
//! screen router that sequences them, and the weather lookup behind the
//! widget and detail view. The `vision` binary exposes both a TUI and CLI
//! commands.

pub mod anim;
pub mod cli;
pub mod core;
pub mod error;
pub mod router;
pub mod tui;
pub mod weather;

pub use error::{Result, VisionError};

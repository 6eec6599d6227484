//! CLI module for vision-hud
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod weather;

pub use commands::{Cli, Commands};

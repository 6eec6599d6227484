//! Core functionality for vision-hud
//!
//! This module contains the device capabilities and shared settings:
//! - Application configuration
//! - Location providers
//! - Sound cue playback

pub mod audio;
pub mod config;
pub mod location;

pub use audio::{AudioPlayer, Cue};
pub use config::Config;
pub use location::LocationProvider;

//! Sound cue playback
//!
//! Playback is fire-and-forget: callers log failures and carry on.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::core::config::Config;
use crate::error::{Result, VisionError};

/// Sound cues raised by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Played while the authorization sequence types out
    Startup,
    /// Greeting played shortly after the boot screen appears
    Welcome,
}

/// Something that can play a cue
#[cfg_attr(test, automock)]
pub trait AudioPlayer: Send + Sync {
    /// Start `cue`, stopping whatever is currently playing
    fn play(&self, cue: Cue) -> Result<()>;

    /// Stop the current cue, if any
    fn stop(&self);
}

/// Plays configured sound files through an external command
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    startup: Option<PathBuf>,
    welcome: Option<PathBuf>,
    current: Mutex<Option<Child>>,
}

impl CommandPlayer {
    pub fn new(
        program: impl Into<String>,
        startup: Option<PathBuf>,
        welcome: Option<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            startup,
            welcome,
            current: Mutex::new(None),
        }
    }

    /// Platform default player command
    pub fn default_program() -> &'static str {
        if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "aplay"
        }
    }

    /// Whether a spawned player is still running
    pub fn is_playing(&self) -> bool {
        let Ok(mut current) = self.current.lock() else {
            return false;
        };
        match current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn file_for(&self, cue: Cue) -> Option<&PathBuf> {
        match cue {
            Cue::Startup => self.startup.as_ref(),
            Cue::Welcome => self.welcome.as_ref(),
        }
    }

    fn kill(current: &mut Option<Child>) {
        if let Some(mut child) = current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&self, cue: Cue) -> Result<()> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| VisionError::Audio("player state poisoned".into()))?;
        Self::kill(&mut current);

        let Some(path) = self.file_for(cue) else {
            debug!(?cue, "no sound file configured");
            return Ok(());
        };

        let child = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| VisionError::Audio(format!("{}: {}", self.program, e)))?;

        debug!(?cue, program = %self.program, "playing cue");
        *current = Some(child);
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut current) = self.current.lock() {
            Self::kill(&mut current);
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Rings the terminal bell for the startup cue
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioPlayer for TerminalBell {
    fn play(&self, cue: Cue) -> Result<()> {
        if cue == Cue::Startup {
            let mut stdout = std::io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn stop(&self) {}
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&self, _cue: Cue) -> Result<()> {
        Ok(())
    }

    fn stop(&self) {}
}

/// Pick a player from configuration
pub fn player_from_config(config: &Config, muted: bool) -> Arc<dyn AudioPlayer> {
    if muted {
        return Arc::new(SilentPlayer);
    }

    if config.startup_sound.is_some() || config.welcome_sound.is_some() {
        let program = config
            .sound_command
            .clone()
            .unwrap_or_else(|| CommandPlayer::default_program().to_string());
        return Arc::new(CommandPlayer::new(
            program,
            config.startup_sound.clone(),
            config.welcome_sound.clone(),
        ));
    }

    Arc::new(TerminalBell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_an_error() {
        let player = CommandPlayer::new(
            "vision-no-such-player",
            Some(PathBuf::from("startup.wav")),
            None,
        );
        let err = player.play(Cue::Startup).unwrap_err();
        assert!(matches!(err, VisionError::Audio(_)));
        assert!(!player.is_playing());
    }

    #[test]
    fn test_unconfigured_cue_is_skipped() {
        let player = CommandPlayer::new("vision-no-such-player", None, None);
        assert!(player.play(Cue::Welcome).is_ok());
        assert!(!player.is_playing());
    }

    #[cfg(unix)]
    #[test]
    fn test_stop_kills_previous_cue() {
        // `sleep 30` stands in for a long sound file
        let player = CommandPlayer::new("sleep", Some(PathBuf::from("30")), Some(PathBuf::from("30")));
        player.play(Cue::Startup).unwrap();
        assert!(player.is_playing());

        player.play(Cue::Welcome).unwrap();
        assert!(player.is_playing());

        player.stop();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_player_selection() {
        let mut config = Config::default();
        assert!(player_from_config(&config, true).play(Cue::Startup).is_ok());

        config.welcome_sound = Some(PathBuf::from("hello.wav"));
        config.sound_command = Some("vision-no-such-player".into());
        let player = player_from_config(&config, false);
        // Startup has no file, so nothing is spawned
        assert!(player.play(Cue::Startup).is_ok());
        assert!(player.play(Cue::Welcome).is_err());
    }
}

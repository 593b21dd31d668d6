use async_trait::async_trait;
use std::io::Write;

use super::run_command;
use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::Result;

/// Audible alert. Falls back to the terminal bell where no player is known.
#[derive(Debug)]
pub struct SoundSink {
    player: Option<(String, Vec<String>)>,
}

impl SoundSink {
    pub fn new() -> Self {
        let player = if cfg!(target_os = "macos") {
            Some(("afplay", "/System/Library/Sounds/Glass.aiff"))
        } else if cfg!(target_os = "linux") {
            Some(("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"))
        } else {
            None
        };

        Self {
            player: player.map(|(program, sound)| (program.to_string(), vec![sound.to_string()])),
        }
    }

    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            player: Some((program.into(), args)),
        }
    }

    pub fn bell() -> Self {
        Self { player: None }
    }
}

impl Default for SoundSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSink for SoundSink {
    fn name(&self) -> &str {
        "Sound"
    }

    fn sink_type(&self) -> &str {
        "sound"
    }

    async fn notify(&self, _event: &RestockEvent) -> Result<()> {
        match &self.player {
            Some((program, args)) => run_command(self.sink_type(), program, args).await,
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(b"\x07")?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

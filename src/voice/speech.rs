//! Text-to-speech through the platform speech engine.

use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Speaks text aloud, blocking until playback ends
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);
}

/// `say` on macOS, `espeak-ng`/`espeak` on Linux, SAPI through PowerShell on Windows
#[derive(Debug, Clone)]
pub struct SystemSpeaker {
    rate: u32,
    voice: String,
}

impl SystemSpeaker {
    pub fn new(rate: u32, voice: impl Into<String>) -> Self {
        Self {
            rate,
            voice: voice.into(),
        }
    }

    fn commands(&self, text: &str) -> Vec<Command> {
        let rate = self.rate.to_string();

        #[cfg(target_os = "macos")]
        {
            let mut say = Command::new("say");
            say.args(["-r", &rate]);
            if !self.voice.is_empty() {
                say.args(["-v", &self.voice]);
            }
            // PDF text often starts with '-'
            say.arg("--").arg(text);
            vec![say]
        }

        #[cfg(target_os = "windows")]
        {
            let _ = rate;
            vec![powershell_command(text, self.rate, &self.voice)]
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            ["espeak-ng", "espeak"]
                .into_iter()
                .map(|binary| {
                    let mut cmd = Command::new(binary);
                    cmd.args(["-s", &rate]);
                    if !self.voice.is_empty() {
                        cmd.args(["-v", &self.voice]);
                    }
                    cmd.arg("--").arg(text);
                    cmd
                })
                .collect()
        }
    }
}

impl Speaker for SystemSpeaker {
    fn speak(&self, text: &str) {
        debug!("Speaking: {}", text);
        for mut cmd in self.commands(text) {
            let program = cmd.get_program().to_string_lossy().into_owned();
            match cmd
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                Ok(status) if status.success() => return,
                Ok(status) => {
                    warn!("{} exited with {}", program, status);
                    return;
                }
                // Not installed; try the next engine
                Err(e) => debug!("{} unavailable: {}", program, e),
            }
        }
        warn!("No speech engine available, could not say: {}", text);
    }
}

#[cfg(target_os = "windows")]
fn powershell_command(text: &str, rate: u32, voice: &str) -> Command {
    // SAPI rate runs -10..10 with 0 near 180 wpm
    let sapi_rate = ((rate as i32 - 180) / 20).clamp(-10, 10);
    let mut script = format!(
        "Add-Type -AssemblyName System.Speech; \
         $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
         $s.Rate = {};",
        sapi_rate
    );
    if !voice.is_empty() {
        script.push_str(&format!(" $s.SelectVoice('{}');", ps_quote(voice)));
    }
    script.push_str(&format!(" $s.Speak('{}')", ps_quote(text)));

    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-Command", &script]);
    cmd
}

#[cfg(target_os = "windows")]
fn ps_quote(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_espeak_text_is_never_an_option() {
        let commands = SystemSpeaker::new(170, "").commands("-v Chapter 1 - Introduction");
        let programs: Vec<_> = commands
            .iter()
            .map(|c| c.get_program().to_string_lossy().into_owned())
            .collect();
        assert_eq!(programs, vec!["espeak-ng", "espeak"]);
        for cmd in &commands {
            assert_eq!(argv(cmd), vec!["-s", "170", "--", "-v Chapter 1 - Introduction"]);
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_espeak_voice_comes_before_text() {
        let commands = SystemSpeaker::new(150, "en-us").commands("- bullet");
        assert_eq!(
            argv(&commands[0]),
            vec!["-s", "150", "-v", "en-us", "--", "- bullet"]
        );
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_say_text_is_never_an_option() {
        let commands = SystemSpeaker::new(170, "").commands("-v Chapter 1");
        assert_eq!(argv(&commands[0]), vec!["-r", "170", "--", "-v Chapter 1"]);
    }
}

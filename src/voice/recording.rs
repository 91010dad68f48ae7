//! Recording process control (sox `rec`).

use std::process::{Child, Command, Stdio};

use super::types::AudioError;

/// Start `rec` streaming raw 16-bit little-endian mono PCM to stdout
pub fn start_stream_process(sample_rate: u32) -> Result<Child, AudioError> {
    Command::new("rec")
        .args([
            "-q", // no progress meter on stderr
            "-r",
            &sample_rate.to_string(),
            "-c",
            "1", // Mono
            "-b",
            "16", // 16-bit
            "-e",
            "signed-integer",
            "--endian",
            "little",
            "-t",
            "raw",
            "-",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(AudioError::Spawn)
}

/// Gracefully terminate a recording process
///
/// SIGTERM first so sox can release the device, then kill and reap.
pub fn terminate_recording_process(mut process: Child) {
    #[cfg(unix)]
    {
        let _ = Command::new("kill")
            .args(["-TERM", &process.id().to_string()])
            .output();
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    let _ = process.kill();
    let _ = process.wait();
}

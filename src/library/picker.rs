//! Native file chooser for PDFs
//!
//! Uses the platform's own dialog tool so no GUI toolkit is needed on the
//! voice thread: `osascript` on macOS, `zenity` (falling back to `kdialog`)
//! on Linux and PowerShell's OpenFileDialog on Windows.

use std::path::PathBuf;
use std::process::Command;

use tracing::warn;

/// Something that can ask the user for one PDF file
pub trait FilePicker: Send + Sync {
    /// Returns `None` when the user cancels or no dialog is available
    fn pick_pdf(&self) -> Option<PathBuf>;
}

/// Picker backed by the platform's native dialog
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePdfPicker;

impl FilePicker for NativePdfPicker {
    fn pick_pdf(&self) -> Option<PathBuf> {
        match run_dialog() {
            Ok(Some(path)) => Some(path),
            Ok(None) => None,
            Err(e) => {
                warn!("File dialog unavailable: {}", e);
                None
            }
        }
    }
}

/// Turn the dialog's stdout into a path; empty output means "cancelled"
fn parse_selection(stdout: &[u8]) -> Option<PathBuf> {
    let text = String::from_utf8_lossy(stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(target_os = "macos")]
fn run_dialog() -> Result<Option<PathBuf>, String> {
    let output = Command::new("osascript")
        .args([
            "-e",
            r#"POSIX path of (choose file with prompt "Select a PDF" of type {"com.adobe.pdf"})"#,
        ])
        .output()
        .map_err(|e| format!("Failed to run osascript: {}", e))?;

    // osascript exits non-zero when the user presses Cancel
    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_selection(&output.stdout))
}

#[cfg(target_os = "linux")]
fn run_dialog() -> Result<Option<PathBuf>, String> {
    let zenity = Command::new("zenity")
        .args([
            "--file-selection",
            "--title=Select a PDF",
            "--file-filter=PDF Files | *.pdf *.PDF",
        ])
        .output();

    let output = match zenity {
        Ok(output) => output,
        Err(_) => Command::new("kdialog")
            .args(["--getopenfilename", ".", "*.pdf|PDF Files"])
            .output()
            .map_err(|e| format!("Neither zenity nor kdialog is available: {}", e))?,
    };

    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_selection(&output.stdout))
}

#[cfg(target_os = "windows")]
fn run_dialog() -> Result<Option<PathBuf>, String> {
    let script = r#"Add-Type -AssemblyName System.Windows.Forms;
$d = New-Object System.Windows.Forms.OpenFileDialog;
$d.Filter = 'PDF Files (*.pdf)|*.pdf';
if ($d.ShowDialog() -eq 'OK') { Write-Output $d.FileName }"#;

    let output = Command::new("powershell")
        .args(["-NoProfile", "-STA", "-Command", script])
        .output()
        .map_err(|e| format!("Failed to run powershell: {}", e))?;

    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_selection(&output.stdout))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn run_dialog() -> Result<Option<PathBuf>, String> {
    Err("No native file dialog on this platform".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_trims_newline() {
        assert_eq!(
            parse_selection(b"/home/me/report.pdf\n"),
            Some(PathBuf::from("/home/me/report.pdf"))
        );
    }

    #[test]
    fn test_parse_selection_empty_is_cancel() {
        assert_eq!(parse_selection(b"  \n"), None);
    }
}

//! Clipboard integration for copying the drawing.

use super::types::ExportError;
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{Error as CopyError, MimeType, Options, ServeRequests, Source};

const PNG_MIME: &str = "image/png";

enum CommandFailure {
    /// `wl-copy` is not installed.
    Missing,
    Failed(String),
}

/// Copy PNG bytes to the Wayland clipboard.
///
/// Uses the `wl-copy` command first and falls back to wl-clipboard-rs. Reports
/// [`ExportError::ClipboardUnavailable`] when neither path has a clipboard to
/// talk to.
pub fn copy_png(image_data: &[u8]) -> Result<(), ExportError> {
    log::debug!(
        "Attempting to copy drawing to clipboard ({} bytes)",
        image_data.len()
    );

    let command_result = copy_via_command(image_data);
    let command_missing = match command_result {
        Ok(()) => {
            log::info!("Copied drawing to clipboard via wl-copy");
            return Ok(());
        }
        Err(CommandFailure::Missing) => {
            log::warn!("wl-copy not found, falling back to wl-clipboard-rs");
            true
        }
        Err(CommandFailure::Failed(ref reason)) => {
            log::warn!("wl-copy failed ({}), falling back to wl-clipboard-rs", reason);
            false
        }
    };

    match copy_via_library(image_data) {
        Ok(()) => {
            log::info!("Copied drawing to clipboard via wl-clipboard-rs");
            Ok(())
        }
        Err(lib_err) if command_missing && is_unavailable(&lib_err) => {
            Err(ExportError::ClipboardUnavailable(format!(
                "wl-copy is not installed and the compositor offers no data-control clipboard ({})",
                lib_err
            )))
        }
        Err(lib_err) => {
            let command_reason = match command_result {
                Err(CommandFailure::Failed(reason)) => reason,
                _ => "not installed".to_string(),
            };
            Err(ExportError::Clipboard(format!(
                "wl-copy: {} ; wl-clipboard-rs: {}",
                command_reason, lib_err
            )))
        }
    }
}

fn is_unavailable(err: &CopyError) -> bool {
    matches!(
        err,
        CopyError::NoSeats | CopyError::WaylandConnection(_) | CopyError::MissingProtocol { .. }
    )
}

fn copy_via_library(image_data: &[u8]) -> Result<(), CopyError> {
    let mut opts = Options::new();
    // Serve a single paste, then let the library thread exit.
    opts.serve_requests(ServeRequests::Only(1));
    opts.copy(
        Source::Bytes(image_data.into()),
        MimeType::Specific(PNG_MIME.to_string()),
    )
}

fn copy_via_command(image_data: &[u8]) -> Result<(), CommandFailure> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg(PNG_MIME)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => CommandFailure::Missing,
            _ => CommandFailure::Failed(format!("failed to spawn wl-copy: {}", e)),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(image_data).map_err(|e| {
            CommandFailure::Failed(format!("failed to write to wl-copy stdin: {}", e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| CommandFailure::Failed(format!("failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommandFailure::Failed(stderr.trim().to_string()));
    }

    Ok(())
}

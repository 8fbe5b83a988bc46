//! Clipboard sink: primary provider with a single command fallback.
//!
//! The primary mechanism is the `cli-clipboard` provider. When it is
//! unavailable or fails, one fallback pass pipes the text through a
//! platform clipboard command over stdin. The spawned child is reaped
//! unconditionally, even when the write fails — nothing transient is left
//! behind. No retries beyond the single fallback; a failed copy requires a
//! new trigger.

use crate::error::{ExportError, Result};
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use log::{debug, warn};
use std::io::Write;
use std::process::{Command, Stdio};

/// Platform clipboard commands tried in order during fallback
const FALLBACK_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

/// Place `text` on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    match copy_with_provider(text) {
        Ok(()) => {
            debug!("clipboard write succeeded via provider");
            Ok(())
        }
        Err(primary_err) => {
            warn!(
                "clipboard provider failed ({}), trying command fallback",
                primary_err
            );
            copy_with_command(text).map_err(|fallback_err| {
                ExportError::sink(
                    "clipboard",
                    format!("provider: {}; fallback: {}", primary_err, fallback_err),
                )
            })
        }
    }
}

fn copy_with_provider(text: &str) -> std::result::Result<(), String> {
    let mut ctx = ClipboardContext::new().map_err(|e| e.to_string())?;
    ctx.set_contents(text.to_owned()).map_err(|e| e.to_string())
}

fn copy_with_command(text: &str) -> std::result::Result<(), String> {
    for (cmd, args) in FALLBACK_COMMANDS {
        match pipe_through(cmd, args, text) {
            Ok(true) => {
                debug!("clipboard write succeeded via {}", cmd);
                return Ok(());
            }
            Ok(false) => return Err(format!("{} exited with failure", cmd)),
            // Command not present on this platform; try the next one
            Err(_) => continue,
        }
    }
    Err("no clipboard command available".to_string())
}

/// Spawn a command, feed it `text` on stdin, and reap it
fn pipe_through(cmd: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let write_result = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    // Reap the child before inspecting the write result so a failed write
    // never leaves a zombie behind
    let status = child.wait()?;
    write_result?;

    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires a clipboard-capable environment
    fn test_copy_round_trip() {
        copy_to_clipboard("chat2md clipboard test").expect("copy failed");

        let mut ctx = ClipboardContext::new().expect("no provider");
        assert_eq!(
            ctx.get_contents().expect("read failed"),
            "chat2md clipboard test"
        );
    }

    #[test]
    fn test_missing_command_is_skipped() {
        let err = pipe_through("chat2md-no-such-command", &[], "x").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_pipe_through_reaps_child() {
        // `cat` consumes stdin and exits zero; a hung wait would time the
        // test run out
        if let Ok(success) = pipe_through("cat", &[], "hello") {
            assert!(success);
        }
    }
}

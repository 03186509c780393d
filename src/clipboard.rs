use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::config::ClipboardConfig;
use crate::error::{Error, Result};

/// Something that accepts an HTML-typed payload. A write either fully
/// succeeds or fails; callers report the outcome and do not retry.
pub trait Clipboard {
    fn write_html(&mut self, html: &str) -> Result<()>;
}

/// Pipes the fragment into an external program such as `xclip` or `wl-copy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn from_config(config: &ClipboardConfig) -> Result<Self> {
        let (program, args) = config
            .command
            .split_first()
            .ok_or(Error::EmptyClipboardCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn write_html(&mut self, html: &str) -> Result<()> {
        let unavailable = |source| Error::ClipboardUnavailable {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(unavailable)?;

        // A program that exits early closes the pipe; its exit status decides
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(html.as_bytes())
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ClipboardRejected(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(bytes = html.len(), program = %self.program, "wrote clipboard");
        Ok(())
    }
}

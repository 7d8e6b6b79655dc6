use super::{accept_lines, Picker, Selection};
use crate::config::PickerConfig;
use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Runs the configured selector once per `pick`.
///
/// Candidates go to its stdin one per line, chosen lines come back on
/// stdout. A non-zero exit (Escape in dmenu, Ctrl-C in fzf) or death by
/// signal means the user cancelled.
pub struct ProcessPicker {
    command: String,
    prompt_flag: String,
}

impl ProcessPicker {
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            command: config.command.clone(),
            prompt_flag: config.prompt_flag.clone(),
        }
    }

    /// Shell snippet run by `sh -c`; the prompt arrives as `$1` so it never
    /// needs quoting.
    fn script(&self) -> String {
        if self.prompt_flag.is_empty() {
            self.command.clone()
        } else {
            format!("{} {} \"$1\"", self.command, self.prompt_flag)
        }
    }
}

impl Picker for ProcessPicker {
    fn pick(&mut self, items: &[String], prompt: &str, free_text: bool) -> Result<Selection<String>> {
        debug!("picker '{}' with {} candidates", prompt, items.len());

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(self.script())
            .arg("sh")
            .arg(prompt)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // selector may quit before reading everything
            if let Err(e) = stdin.write_all(items.join("\n").as_bytes()) {
                debug!("picker closed its input early: {}", e);
            }
        }

        let output = child.wait_with_output().map_err(|source| Error::Spawn {
            program: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            debug!("picker '{}' cancelled ({})", prompt, output.status);
            return Ok(Selection::Cancelled);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        let selection = accept_lines(items, lines, free_text);
        if !free_text {
            if let Selection::Empty = selection {
                if !stdout.trim().is_empty() {
                    warn!("picker returned lines that were never offered under '{}'", prompt);
                }
            }
        }
        Ok(selection)
    }
}

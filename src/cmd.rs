//! External commands run behind a spinner.

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::debug;

/// A builder for an external command whose output is captured.
///
/// Output is captured rather than inherited so it can't interleave with the
/// spinner's line; callers print it once the spinner has stopped.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    workdir: Option<PathBuf>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            workdir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn workdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.workdir = Some(path.into());
        self
    }

    /// Human-readable command line, for messages and logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Execute the command and return its captured output.
    /// Returns an error if it can't be started or exits non-zero.
    pub fn run(&self) -> Result<Output> {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        debug!(command = %self.display(), "cmd:run");
        let output = cmd
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to execute command: {}", self.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Command failed ({}): {}\n{}",
                output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| format!("exit {}", c)),
                self.display(),
                stderr.trim()
            ));
        }
        Ok(output)
    }

    /// Execute the command and return stdout as a trimmed string.
    pub fn run_and_capture_stdout(&self) -> Result<String> {
        let output = self.run()?;
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }
}

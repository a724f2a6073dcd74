//! Run host command-line tools and capture their output.

use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context};
use tracing::debug;

/// A host executable, overridable through an environment variable.
#[derive(Debug, Clone)]
pub struct Tool {
    name: &'static str,
    bin: OsString,
}

impl Tool {
    pub fn new(name: &'static str, bin: impl Into<OsString>) -> Self {
        Self {
            name,
            bin: bin.into(),
        }
    }

    /// Use `$var` if set and non-empty, else `name` on `PATH`.
    pub fn from_env(var: &str, name: &'static str) -> Self {
        let bin = std::env::var_os(var)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| name.into());
        Self::new(name, bin)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if the tool can be spawned at all.
    pub fn probe(&self) -> bool {
        Command::new(&self.bin)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Run to completion and return stdout. Non-zero exit is an error carrying stderr.
    pub fn run<I, S>(&self, args: I) -> anyhow::Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!(tool = self.name, ?cmd, "running host tool");

        let output = cmd
            .spawn()
            .with_context(|| format!("spawn {}", self.name))?
            .wait_with_output()
            .with_context(|| format!("wait {}", self.name))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{} failed ({})", self.name, output.status))
                .with_context(|| stderr.trim().to_string());
        }

        String::from_utf8(output.stdout).with_context(|| format!("{} output is not UTF-8", self.name))
    }
}

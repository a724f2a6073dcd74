use std::path::PathBuf;

use anyhow::{anyhow, Context};

use wallbridge_core::{ImagePath, Target};

use super::DesktopShell;
use crate::env_detect::DesktopKind;
use crate::process_runner::Tool;

/// System Events exposes one `desktop` per display for the active space.
///
/// Precondition: the calling process needs Automation permission for
/// System Events; a denial surfaces as an `osascript` failure.
pub struct MacOs {
    osascript: Tool,
}

impl MacOs {
    pub fn new(osascript: Tool) -> Self {
        Self { osascript }
    }

    pub fn from_env() -> Self {
        Self::new(Tool::from_env("WALLBRIDGE_OSASCRIPT_BIN", "osascript"))
    }

    fn tell_system_events(&self, body: &str) -> anyhow::Result<String> {
        let script = format!("tell application \"System Events\" to {body}");
        self.osascript
            .run(["-e", script.as_str()])
            .context("osascript System Events")
    }
}

fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl DesktopShell for MacOs {
    fn kind(&self) -> DesktopKind {
        DesktopKind::MacOs
    }

    fn targets(&self) -> anyhow::Result<Vec<Target>> {
        let out = self.tell_system_events("count of desktops")?;
        let count: usize = out
            .trim()
            .parse()
            .map_err(|_| anyhow!("unexpected desktop count"))
            .with_context(|| out.trim().to_string())?;

        Ok((0..count)
            .map(|i| Target::new(i, format!("desktop {}", i + 1)))
            .collect())
    }

    fn apply(&self, target: &Target, image: &ImagePath) -> anyhow::Result<()> {
        let path = image
            .as_path()
            .to_str()
            .ok_or_else(|| anyhow!("path is not valid UTF-8"))?;

        // AppleScript lists are 1-based.
        self.tell_system_events(&format!(
            "set picture of desktop {} to POSIX file {}",
            target.index + 1,
            applescript_quote(path)
        ))?;
        Ok(())
    }

    fn current(&self) -> anyhow::Result<Option<PathBuf>> {
        let out = self.tell_system_events("get picture of desktop 1")?;
        let value = out.trim();
        if value.is_empty() || value == "missing value" {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(value)))
    }
}

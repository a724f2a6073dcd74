use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use wallbridge_core::{ImagePath, Target};

use super::DesktopShell;
use crate::env_detect::DesktopKind;

const SOURCE_NEEDLE: &str = "source: Path(\"";

/// cosmic-bg watches its cosmic-config directory and reloads on change.
pub struct Cosmic {
    base: PathBuf,
}

fn config_home() -> anyhow::Result<PathBuf> {
    if let Some(v) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(v));
    }
    let home = std::env::var_os("HOME").ok_or_else(|| anyhow!("HOME not set"))?;
    Ok(PathBuf::from(home).join(".config"))
}

fn atomic_write(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = path.parent().ok_or_else(|| anyhow!("invalid path"))?;
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;

    let tmp = dir.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("wallbridge")
    ));
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Byte range of the path inside `source: Path("...")`, honouring `\"` escapes.
fn source_span(text: &str) -> anyhow::Result<Range<usize>> {
    let start = text
        .find(SOURCE_NEEDLE)
        .ok_or_else(|| anyhow!("COSMIC config: missing `source: Path(\"...\")`"))?
        + SOURCE_NEEDLE.len();

    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Ok(start..start + i),
            _ => {}
        }
    }
    Err(anyhow!("COSMIC config: unterminated source path"))
}

fn ron_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn ron_unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(e) = chars.next() {
                out.push(e);
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Cosmic {
    pub fn with_config_home(config_home: &Path) -> Self {
        Self {
            base: config_home.join("cosmic/com.system76.CosmicBackground/v1"),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::with_config_home(&config_home()?))
    }

    fn all(&self) -> PathBuf {
        self.base.join("all")
    }

    fn read_all(&self) -> anyhow::Result<String> {
        let all = self.all();
        fs::read_to_string(&all).with_context(|| {
            format!(
                "read {} (open COSMIC Wallpaper settings once)",
                all.display()
            )
        })
    }
}

impl DesktopShell for Cosmic {
    fn kind(&self) -> DesktopKind {
        DesktopKind::Cosmic
    }

    fn targets(&self) -> anyhow::Result<Vec<Target>> {
        // Per-output entries are ignored once same-on-all is forced.
        self.read_all()?;
        Ok(vec![Target::new(0, "all displays")])
    }

    fn apply(&self, _target: &Target, image: &ImagePath) -> anyhow::Result<()> {
        let new_path = image
            .as_path()
            .to_str()
            .ok_or_else(|| anyhow!("path is not valid UTF-8"))?;

        let mut text = self.read_all()?;
        let span = source_span(&text)?;
        text.replace_range(span, &ron_escape(new_path));

        atomic_write(&self.base.join("same-on-all"), b"true\n").context("write same-on-all")?;
        atomic_write(&self.all(), text.as_bytes()).context("write all")?;
        Ok(())
    }

    fn current(&self) -> anyhow::Result<Option<PathBuf>> {
        let text = self.read_all()?;
        let raw = ron_unescape(&text[source_span(&text)?]);
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(raw)))
    }
}

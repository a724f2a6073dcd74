use std::path::PathBuf;

use anyhow::{anyhow, Context};
use tracing::debug;

use wallbridge_core::{ImagePath, Target};

use super::DesktopShell;
use crate::env_detect::DesktopKind;
use crate::process_runner::Tool;

const SCHEMA: &str = "org.gnome.desktop.background";

/// One setting covers every monitor and workspace; GNOME 42+ adds a dark variant.
const URI_KEYS: [&str; 2] = ["picture-uri", "picture-uri-dark"];

pub struct Gnome {
    gsettings: Tool,
}

impl Gnome {
    pub fn new(gsettings: Tool) -> Self {
        Self { gsettings }
    }

    pub fn from_env() -> Self {
        Self::new(Tool::from_env("WALLBRIDGE_GSETTINGS_BIN", "gsettings"))
    }
}

impl DesktopShell for Gnome {
    fn kind(&self) -> DesktopKind {
        DesktopKind::Gnome
    }

    fn targets(&self) -> anyhow::Result<Vec<Target>> {
        let keys = self
            .gsettings
            .run(["list-keys", SCHEMA])
            .context("gsettings list-keys")?;
        let known: Vec<&str> = keys.lines().map(str::trim).collect();

        Ok(URI_KEYS
            .iter()
            .enumerate()
            .filter(|(_, key)| known.contains(*key))
            .map(|(i, key)| Target::new(i, *key))
            .collect())
    }

    fn apply(&self, target: &Target, image: &ImagePath) -> anyhow::Result<()> {
        let key = *URI_KEYS
            .get(target.index)
            .ok_or_else(|| anyhow!("unknown GNOME target {target}"))?;
        let uri = image.to_file_uri();

        self.gsettings
            .run(["set", SCHEMA, key, uri.as_str()])
            .with_context(|| format!("gsettings set {key}"))?;

        if target.index == 0 {
            // Best-effort: match the shell's usual cover scaling.
            if let Err(err) = self.gsettings.run(["set", SCHEMA, "picture-options", "zoom"]) {
                debug!("gsettings picture-options: {err:#}");
            }
        }
        Ok(())
    }

    fn current(&self) -> anyhow::Result<Option<PathBuf>> {
        let out = self
            .gsettings
            .run(["get", SCHEMA, URI_KEYS[0]])
            .context("gsettings get picture-uri")?;
        let uri = unquote_gvariant(&out)?;
        if uri.is_empty() {
            return Ok(None);
        }
        ImagePath::from_file_uri(&uri)
            .map(|p| Some(p.into_path_buf()))
            .ok_or_else(|| anyhow!("unexpected picture-uri value"))
            .with_context(|| uri.clone())
    }
}

/// Strip GVariant text quoting from a `gsettings get` string value.
fn unquote_gvariant(raw: &str) -> anyhow::Result<String> {
    let s = raw.trim();
    let quote = match s.chars().next() {
        Some(q @ ('\'' | '"')) if s.len() >= 2 && s.ends_with(q) => q,
        _ => return Err(anyhow!("not a GVariant string")).with_context(|| s.to_string()),
    };

    let mut out = String::with_capacity(s.len());
    let mut chars = s[1..s.len() - quote.len_utf8()].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let unescaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('a') => '\x07',
            Some('b') => '\x08',
            Some('f') => '\x0c',
            Some('v') => '\x0b',
            Some(e @ ('\\' | '\'' | '"')) => e,
            Some('u') => unicode_escape(&mut chars, 4).with_context(|| s.to_string())?,
            Some('U') => unicode_escape(&mut chars, 8).with_context(|| s.to_string())?,
            Some(e) => return Err(anyhow!("unknown escape \\{e}")).with_context(|| s.to_string()),
            None => return Err(anyhow!("dangling escape")).with_context(|| s.to_string()),
        };
        out.push(unescaped);
    }
    Ok(out)
}

/// Decode the `digits` hex digits following `\u` or `\U`.
fn unicode_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> anyhow::Result<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return Err(anyhow!("short unicode escape"));
    }
    let code = u32::from_str_radix(&hex, 16).with_context(|| format!("bad unicode escape {hex}"))?;
    char::from_u32(code).ok_or_else(|| anyhow!("invalid code point U+{code:X}"))
}

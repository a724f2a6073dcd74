//! Desktop environment detection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopKind {
    MacOs,
    Gnome,
    Kde,
    Cosmic,
    Other,
}

impl DesktopKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Gnome => "gnome",
            Self::Kde => "kde",
            Self::Cosmic => "cosmic",
            Self::Other => "other",
        }
    }

    /// Match one `XDG_CURRENT_DESKTOP`-style token (case-insensitive).
    fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" | "aqua" => Some(Self::MacOs),
            "gnome" | "gnome-classic" | "unity" | "budgie" => Some(Self::Gnome),
            "kde" | "plasma" | "plasmawayland" => Some(Self::Kde),
            "cosmic" => Some(Self::Cosmic),
            _ => None,
        }
    }
}

impl fmt::Display for DesktopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn detect_desktop() -> DesktopKind {
    if let Some(v) = std::env::var_os("WALLBRIDGE_DESKTOP") {
        let v = v.to_string_lossy();
        if !v.is_empty() {
            return DesktopKind::from_token(&v).unwrap_or(DesktopKind::Other);
        }
    }

    if cfg!(target_os = "macos") {
        return DesktopKind::MacOs;
    }

    // e.g. "ubuntu:GNOME", "KDE", "COSMIC"
    if let Some(v) = std::env::var_os("XDG_CURRENT_DESKTOP") {
        if let Some(kind) = v.to_string_lossy().split(':').find_map(DesktopKind::from_token) {
            return kind;
        }
    }

    if let Some(v) = std::env::var_os("DESKTOP_SESSION") {
        if let Some(kind) = DesktopKind::from_token(&v.to_string_lossy()) {
            return kind;
        }
    }

    DesktopKind::Other
}

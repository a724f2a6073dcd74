//! Host desktop-shell backends.
//!
//! Each backend adapts one desktop's native wallpaper mechanism to the
//! [`DesktopShell`] trait. Calls are synchronous and run on the caller's
//! thread; a backend never retries.

use std::path::PathBuf;

use anyhow::Context;

use wallbridge_core::{ImagePath, Target};

use crate::env_detect::{detect_desktop, DesktopKind};

mod cosmic;
mod gnome;
mod kde;
mod macos;

pub use cosmic::Cosmic;
pub use gnome::Gnome;
pub use kde::Plasma;
pub use macos::MacOs;

pub trait DesktopShell {
    fn kind(&self) -> DesktopKind;

    /// Every (display, space) pair the shell currently knows about.
    fn targets(&self) -> anyhow::Result<Vec<Target>>;

    /// Apply `image` to a single target returned by [`DesktopShell::targets`].
    fn apply(&self, target: &Target, image: &ImagePath) -> anyhow::Result<()>;

    /// Wallpaper of the primary display, or `None` if the shell reports none.
    fn current(&self) -> anyhow::Result<Option<PathBuf>>;
}

/// Build the backend for `kind`.
///
/// Returns `Ok(None)` if no backend handles that desktop.
pub fn shell_for(kind: DesktopKind) -> anyhow::Result<Option<Box<dyn DesktopShell>>> {
    let shell: Box<dyn DesktopShell> = match kind {
        DesktopKind::MacOs => Box::new(MacOs::from_env()),
        DesktopKind::Gnome => Box::new(Gnome::from_env()),
        DesktopKind::Kde => Box::new(Plasma::from_env().context("KDE wallpaper")?),
        DesktopKind::Cosmic => Box::new(Cosmic::from_env().context("COSMIC wallpaper")?),
        DesktopKind::Other => return Ok(None),
    };
    Ok(Some(shell))
}

pub fn detect_shell() -> anyhow::Result<Option<Box<dyn DesktopShell>>> {
    shell_for(detect_desktop())
}

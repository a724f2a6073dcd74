//! The wallpaper bridge: validates input, then drives a [`DesktopShell`].
//!
//! Set requests are applied to every target the shell reports. A failing
//! target does not stop the others; the request fails if any target failed.

use std::path::PathBuf;

use tracing::{info, warn};

use wallbridge_core::{ApplyReport, BridgeError, ImagePath, Target};

use crate::env_detect::DesktopKind;
use crate::shell::{detect_shell, DesktopShell};

pub struct Bridge {
    shell: Box<dyn DesktopShell>,
}

/// Resolve and pre-flight an image path. No host call is made.
pub fn prepare(image: ImagePath) -> Result<ImagePath, BridgeError> {
    let image = image.absolutize()?;
    image.preflight()?;
    Ok(image)
}

impl Bridge {
    pub fn new(shell: Box<dyn DesktopShell>) -> Self {
        Self { shell }
    }

    pub fn detect() -> Result<Self, BridgeError> {
        match detect_shell() {
            Ok(Some(shell)) => Ok(Self::new(shell)),
            Ok(None) => Err(BridgeError::NoShell),
            Err(err) => Err(BridgeError::Shell(format!("{err:#}"))),
        }
    }

    pub fn kind(&self) -> DesktopKind {
        self.shell.kind()
    }

    pub fn targets(&self) -> Result<Vec<Target>, BridgeError> {
        self.shell
            .targets()
            .map_err(|err| BridgeError::Shell(format!("{err:#}")))
    }

    pub fn set_wallpaper(&self, image: ImagePath) -> Result<ApplyReport, BridgeError> {
        let image = prepare(image)?;
        self.apply_all(&image)
    }

    /// Apply an already prepared image to every target.
    pub fn apply_all(&self, image: &ImagePath) -> Result<ApplyReport, BridgeError> {
        let targets = self.targets()?;
        if targets.is_empty() {
            return Err(BridgeError::NoTargets);
        }

        let mut report = ApplyReport::default();
        for target in &targets {
            let outcome = self.shell.apply(target, image).map_err(|err| {
                let msg = format!("{err:#}");
                warn!(shell = %self.kind(), on = %target, "wallpaper not applied: {msg}");
                msg
            });
            report.record(target, outcome);
        }

        if report.is_success() {
            info!(
                shell = %self.kind(),
                targets = report.succeeded(),
                path = %image.as_path().display(),
                "wallpaper set"
            );
            Ok(report)
        } else {
            Err(BridgeError::SetFailed {
                attempted: report.attempted,
                failed: report.failures.len(),
            })
        }
    }

    pub fn current_wallpaper(&self) -> Result<PathBuf, BridgeError> {
        match self.shell.current() {
            Ok(Some(path)) => Ok(path),
            Ok(None) => Err(BridgeError::QueryUnavailable {
                reason: format!("{} reports no wallpaper", self.kind()),
            }),
            Err(err) => Err(BridgeError::QueryUnavailable {
                reason: format!("{err:#}"),
            }),
        }
    }
}

/// Set `raw` as the wallpaper on every display and space of the detected shell.
pub fn set_wallpaper(raw: &str) -> Result<ApplyReport, BridgeError> {
    set_image(ImagePath::parse(raw)?)
}

/// Like [`set_wallpaper`], from raw C-string bytes.
pub fn set_wallpaper_bytes(raw: &[u8]) -> Result<ApplyReport, BridgeError> {
    set_image(ImagePath::from_bytes(raw)?)
}

fn set_image(image: ImagePath) -> Result<ApplyReport, BridgeError> {
    // Validate before touching the host so a bad path never reaches the shell.
    let image = prepare(image)?;
    Bridge::detect()?.apply_all(&image)
}

/// Wallpaper of the primary display on the detected shell.
pub fn current_wallpaper() -> Result<PathBuf, BridgeError> {
    Bridge::detect()
        .map_err(|err| BridgeError::QueryUnavailable {
            reason: err.to_string(),
        })?
        .current_wallpaper()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::PNG_1X1;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Desktops {
        wallpapers: Vec<Option<PathBuf>>,
        fail_on: Option<usize>,
        applies: usize,
    }

    /// In-memory shell: one wallpaper slot per target; slot 0 is the primary display.
    struct FakeShell(Rc<RefCell<Desktops>>);

    impl DesktopShell for FakeShell {
        fn kind(&self) -> DesktopKind {
            DesktopKind::Other
        }

        fn targets(&self) -> anyhow::Result<Vec<Target>> {
            let d = self.0.borrow();
            Ok((0..d.wallpapers.len())
                .map(|i| Target::new(i, format!("display {i}")))
                .collect())
        }

        fn apply(&self, target: &Target, image: &ImagePath) -> anyhow::Result<()> {
            let mut d = self.0.borrow_mut();
            d.applies += 1;
            if d.fail_on == Some(target.index) {
                anyhow::bail!("permission denied");
            }
            d.wallpapers[target.index] = Some(image.as_path().to_path_buf());
            Ok(())
        }

        fn current(&self) -> anyhow::Result<Option<PathBuf>> {
            Ok(self.0.borrow().wallpapers.first().cloned().flatten())
        }
    }

    fn bridge(displays: usize) -> (Bridge, Rc<RefCell<Desktops>>) {
        let state = Rc::new(RefCell::new(Desktops {
            wallpapers: vec![None; displays],
            ..Default::default()
        }));
        (Bridge::new(Box::new(FakeShell(Rc::clone(&state)))), state)
    }

    fn png(dir: &std::path::Path, name: &str) -> ImagePath {
        let p = dir.join(name);
        std::fs::write(&p, PNG_1X1).unwrap();
        ImagePath::parse(p.to_str().unwrap()).unwrap()
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, state) = bridge(3);
        let img = png(dir.path(), "a.png");

        let report = bridge.set_wallpaper(img.clone()).unwrap();
        assert_eq!(report.attempted, 3);
        assert!(state.borrow().wallpapers.iter().all(|w| w.as_deref() == Some(img.as_path())));
        assert_eq!(bridge.current_wallpaper().unwrap(), img.as_path());
    }

    #[test]
    fn missing_file_never_reaches_the_shell() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, state) = bridge(2);
        let img = png(dir.path(), "a.png");
        bridge.set_wallpaper(img.clone()).unwrap();

        let err = bridge
            .set_wallpaper(ImagePath::parse("/nonexistent/file.png").unwrap())
            .unwrap_err();
        assert!(matches!(err, BridgeError::Unreadable { .. }));
        assert_eq!(state.borrow().applies, 2);
        assert_eq!(bridge.current_wallpaper().unwrap(), img.as_path());
    }

    #[test]
    fn partial_failure_attempts_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, state) = bridge(3);
        state.borrow_mut().fail_on = Some(1);

        let err = bridge.set_wallpaper(png(dir.path(), "a.png")).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::SetFailed {
                attempted: 3,
                failed: 1
            }
        ));
        let d = state.borrow();
        assert_eq!(d.applies, 3);
        assert!(d.wallpapers[2].is_some());
    }

    #[test]
    fn no_targets_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, _state) = bridge(0);
        let err = bridge.set_wallpaper(png(dir.path(), "a.png")).unwrap_err();
        assert!(matches!(err, BridgeError::NoTargets));
    }

    #[test]
    fn unset_wallpaper_is_unavailable() {
        let (bridge, _state) = bridge(1);
        assert!(matches!(
            bridge.current_wallpaper(),
            Err(BridgeError::QueryUnavailable { .. })
        ));
    }

    #[test]
    fn repeated_reads_agree() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, _state) = bridge(1);
        bridge.set_wallpaper(png(dir.path(), "b.png")).unwrap();
        assert_eq!(
            bridge.current_wallpaper().unwrap(),
            bridge.current_wallpaper().unwrap()
        );
    }

    #[test]
    fn empty_path_is_rejected_before_detection() {
        assert!(matches!(set_wallpaper(""), Err(BridgeError::EmptyPath)));
        assert!(matches!(set_wallpaper_bytes(b""), Err(BridgeError::EmptyPath)));
    }
}

use std::path::PathBuf;

use anyhow::{anyhow, Context};

use wallbridge_core::{ImagePath, Target};

use super::DesktopShell;
use crate::env_detect::DesktopKind;
use crate::process_runner::Tool;

/// Plasma keeps one desktop containment per (screen, activity).
pub struct Plasma {
    qdbus: Tool,
}

fn find_qdbus() -> Option<Tool> {
    if let Some(bin) = std::env::var_os("WALLBRIDGE_QDBUS_BIN").filter(|v| !v.is_empty()) {
        return Some(Tool::new("qdbus", bin));
    }
    // Plasma 6 often ships qdbus6, Plasma 5 ships qdbus.
    ["qdbus6", "qdbus"]
        .into_iter()
        .map(|exe| Tool::new(exe, exe))
        .find(Tool::probe)
}

impl Plasma {
    pub fn new(qdbus: Tool) -> Self {
        Self { qdbus }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        find_qdbus()
            .map(Self::new)
            .ok_or_else(|| anyhow!("qdbus not found (qdbus6/qdbus)"))
    }

    fn evaluate(&self, script: &str) -> anyhow::Result<String> {
        self.qdbus
            .run([
                "org.kde.plasmashell",
                "/PlasmaShell",
                "org.kde.PlasmaShell.evaluateScript",
                script,
            ])
            .with_context(|| format!("run {} PlasmaShell.evaluateScript", self.qdbus.name()))
    }
}

impl DesktopShell for Plasma {
    fn kind(&self) -> DesktopKind {
        DesktopKind::Kde
    }

    fn targets(&self) -> anyhow::Result<Vec<Target>> {
        let out = self.evaluate(
            "var allDesktops = desktops();\n\
             for (var i = 0; i < allDesktops.length; i++) {\n\
               print(i + ' ' + allDesktops[i].screen + '\\n');\n\
             }\n",
        )?;
        parse_desktop_list(&out)
    }

    fn apply(&self, target: &Target, image: &ImagePath) -> anyhow::Result<()> {
        // Percent-encoding keeps quotes and backslashes out of the script.
        let uri = image.to_file_uri();
        let index = target.index;

        let script = format!(
            "var allDesktops = desktops();\n\
             if ({index} >= allDesktops.length) {{ throw 'no desktop {index}'; }}\n\
             var d = allDesktops[{index}];\n\
             d.wallpaperPlugin = 'org.kde.image';\n\
             d.currentConfigGroup = ['Wallpaper', 'org.kde.image', 'General'];\n\
             d.writeConfig('Image', '{uri}');\n"
        );
        self.evaluate(&script)?;
        Ok(())
    }

    fn current(&self) -> anyhow::Result<Option<PathBuf>> {
        let out = self.evaluate(
            "var d = desktopForScreen(0);\n\
             if (d) {\n\
               d.currentConfigGroup = ['Wallpaper', 'org.kde.image', 'General'];\n\
               print(d.readConfig('Image'));\n\
             }\n",
        )?;
        let value = out.trim();
        if value.is_empty() {
            return Ok(None);
        }
        ImagePath::from_file_uri(value)
            .map(|p| Some(p.into_path_buf()))
            .ok_or_else(|| anyhow!("unexpected Plasma Image value"))
            .with_context(|| value.to_string())
    }
}

/// Parse `"<index> <screen>"` lines printed by the enumeration script.
fn parse_desktop_list(out: &str) -> anyhow::Result<Vec<Target>> {
    out.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let mut parts = line.split_whitespace();
            let index = parts
                .next()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("bad desktop line"))
                .with_context(|| line.to_string())?;
            let label = match parts.next().and_then(|s| s.parse::<i32>().ok()) {
                Some(screen) if screen >= 0 => format!("desktop {index} on screen {screen}"),
                _ => format!("desktop {index} (inactive activity)"),
            };
            Ok(Target::new(index, label))
        })
        .collect()
}

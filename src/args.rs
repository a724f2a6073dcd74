//! CLI argument definitions.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wallbridge")]
#[command(about = "Set and query the desktop wallpaper on every display and space", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set wallpaper on every display and space.
    Set {
        /// Absolute or relative path to an image file.
        image: String,
    },

    /// Print the primary display's wallpaper path.
    Get,

    /// List the displays/spaces a set would touch.
    Targets,

    /// Print the detected desktop shell.
    Detect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set() {
        let cli = Cli::try_parse_from(["wallbridge", "set", "/tmp/a.jpg"]).unwrap();
        assert!(matches!(cli.cmd, Command::Set { image } if image == "/tmp/a.jpg"));
    }

    #[test]
    fn set_requires_image() {
        assert!(Cli::try_parse_from(["wallbridge", "set"]).is_err());
    }

    #[test]
    fn parses_get() {
        let cli = Cli::try_parse_from(["wallbridge", "get"]).unwrap();
        assert!(matches!(cli.cmd, Command::Get));
    }
}

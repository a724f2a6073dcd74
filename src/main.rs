mod args;
mod output;

use wallbridge_infra::bridge::{self, Bridge};

fn main() {
    output::init_logging();

    if let Err(err) = real_main() {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = args::Cli::parse();

    match cli.cmd {
        args::Command::Set { image } => {
            let report = bridge::set_wallpaper(&image)?;
            tracing::debug!(targets = report.attempted, "set complete");
            Ok(())
        }
        args::Command::Get => {
            let path = bridge::current_wallpaper()?;
            println!("{}", path.display());
            Ok(())
        }
        args::Command::Targets => {
            let bridge = Bridge::detect()?;
            for target in bridge.targets()? {
                println!("{}\t{}", target.index, target.label);
            }
            Ok(())
        }
        args::Command::Detect => {
            println!("{}", wallbridge_infra::env_detect::detect_desktop());
            Ok(())
        }
    }
}

use clap::Parser;
use mandelbrot_explorer::{ExplorerConfig, PixelsPresenterFactory, RunGuiCommand};
use std::path::PathBuf;

/// Interactive Mandelbrot explorer
#[derive(Parser, Debug)]
#[command(name = "gui", version)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = match args.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };

    RunGuiCommand::new(PixelsPresenterFactory::new(), config).execute()?;

    Ok(())
}

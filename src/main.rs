use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use stagedraw::config::{Config, MAX_CANVAS_EDGE};
use stagedraw::replay::{self, Script};
use stagedraw::util::Viewport;

#[derive(Parser, Debug)]
#[command(name = "stagedraw")]
#[command(version, about = "Replay drawing sessions headlessly and export them as PNG")]
struct Cli {
    /// JSON event script to replay
    #[arg(long, short = 's', value_name = "FILE", required_unless_present = "print_config_schema")]
    script: Option<PathBuf>,

    /// Where to write the composited PNG
    #[arg(long, short = 'o', value_name = "PNG", required_unless_present = "print_config_schema")]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/stagedraw/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Canvas width when the script does not provide surfaces
    #[arg(
        long,
        value_name = "PX",
        value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_EDGE as i64)
    )]
    width: Option<u32>,

    /// Canvas height when the script does not provide surfaces
    #[arg(
        long,
        value_name = "PX",
        value_parser = clap::value_parser!(u32).range(1..=MAX_CANVAS_EDGE as i64)
    )]
    height: Option<u32>,

    /// Print the config file JSON schema and exit
    #[arg(long)]
    print_config_schema: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let (Some(script_path), Some(output_path)) = (cli.script, cli.output) else {
        return Err(anyhow!("--script and --output are required"));
    };

    let config = Config::load(cli.config.as_deref())?;
    let script = Script::load(&script_path)?;
    let configured = config.viewport();
    let viewport = Viewport::new(
        cli.width.unwrap_or(configured.width),
        cli.height.unwrap_or(configured.height),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    let outcome = runtime.block_on(replay::run(&script, &config, viewport))?;

    let surface = outcome
        .engine
        .surface()
        .ok_or_else(|| anyhow!("Script finished before a drawing surface was ready"))?;

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    surface
        .write_png(&mut writer, config.background())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    log::info!(
        "Wrote {}x{} drawing to {}",
        surface.width(),
        surface.height(),
        output_path.display()
    );
    Ok(())
}

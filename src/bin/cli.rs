use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use anyhow::{Context, Result};
use music_tag_renamer as lib;
use lib::config::Config;
use lib::renamer;
use lib::track::TrackRecord;

#[derive(Parser)]
#[command(name = "music-tag-renamer", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move mp3/ogg files into an <output>/<artist>/<album>/<track> layout
    Rename {
        /// Output directory (overrides the config's output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directories containing mp3/ogg files
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// List planned moves without touching any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the normalized metadata of the given files
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Validate config file and exit
    ConfigValidate,
}

/// Resolve the config file: explicit --config overrides; otherwise prefer the
/// system-wide location and fall back to the repository example config for
/// local/dev usage. Returns None when no config file exists anywhere.
fn load_optional_config(cli: &Cli) -> Result<Option<Config>> {
    let path = match &cli.config {
        Some(p) => p.clone(),
        None => {
            let etc_path = Path::new("/etc/music-tag-renamer/config.toml");
            let local_path = Path::new("config/example-config.toml");
            if etc_path.exists() {
                etc_path.to_path_buf()
            } else if local_path.exists() {
                local_path.to_path_buf()
            } else {
                return Ok(None);
            }
        }
    };

    let cfg = Config::from_path(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    Ok(Some(cfg))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match &cli.command {
        Commands::Rename {
            output,
            dirs,
            dry_run,
        } => {
            let cfg = load_optional_config(&cli)?;

            let output_dir = output
                .clone()
                .or_else(|| cfg.as_ref().map(|c| c.output_dir.clone()))
                .context("no output directory: pass --output or set output_dir in the config")?;
            let file_extensions = cfg
                .map(|c| c.file_extensions)
                .unwrap_or_else(|| vec!["*.mp3".to_string(), "*.ogg".to_string()]);

            let moves = renamer::plan_moves(dirs, &output_dir, &file_extensions);
            if *dry_run {
                for mv in &moves {
                    println!("{} -> {}", mv.source.display(), mv.target.display());
                }
            } else {
                renamer::apply_moves(&moves)?;
            }
            info!("{} file(s) planned", moves.len());
        }
        Commands::Inspect { files } => {
            for file in files {
                let record = TrackRecord::load(file)
                    .with_context(|| format!("reading tags from {}", file.display()))?;
                println!("{}: {}", file.display(), record);
            }
        }
        Commands::ConfigValidate => {
            let cfg = load_optional_config(&cli)?.context("no config file found")?;
            println!("config OK: output_dir = {}", cfg.output_dir.display());
        }
    }

    Ok(())
}

//! Lineup CLI
//!
//! Roster JSON → pitch coordinates, formation label or request schema.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use lineup_core::{LayoutConfig, LayoutResponse, LineupLayout, PresentationMode, RosterEntry};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Lay out starting lineups on a pitch diagram", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute pitch coordinates for every roster entry
    Place {
        /// Roster JSON file (array of entries, or an object with a "roster" array)
        #[arg(long)]
        roster: PathBuf,

        /// Formation label, e.g. "4-2-3-1" (detected when omitted)
        #[arg(long)]
        formation: Option<String>,

        /// Lay out the opposing side (mirrored)
        #[arg(long, default_value = "false")]
        away: bool,

        #[arg(long, value_enum, conflicts_with = "config")]
        mode: Option<Mode>,

        /// Layout geometry file (.yaml/.yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the detected formation label
    Detect {
        #[arg(long)]
        roster: PathBuf,
    },

    /// Print the JSON schema of layout requests
    Schema,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    SplitPanels,
    FullPitch,
}

impl From<Mode> for PresentationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::SplitPanels => PresentationMode::SplitPanels,
            Mode::FullPitch => PresentationMode::FullPitch,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Entries(Vec<RosterEntry>),
    Wrapped { roster: Vec<RosterEntry> },
}

fn parse_roster(json: &str) -> Result<Vec<RosterEntry>> {
    let file: RosterFile = serde_json::from_str(json).context("roster must be a JSON array or {\"roster\": [...]}")?;
    Ok(match file {
        RosterFile::Entries(entries) => entries,
        RosterFile::Wrapped { roster } => roster,
    })
}

fn read_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    parse_roster(&json).with_context(|| format!("invalid roster {}", path.display()))
}

fn parse_config(path: &Path, text: &str) -> Result<LayoutConfig> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config = if is_yaml {
        LayoutConfig::from_yaml_str(text)?
    } else {
        LayoutConfig::from_json_str(text)?
    };
    Ok(config)
}

fn load_config(path: &Path) -> Result<LayoutConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(path, &text).with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Place { roster, formation, away, mode, config } => {
            let entries = read_roster(&roster)?;
            let config = match (config, mode) {
                (Some(path), _) => load_config(&path)?,
                (None, Some(mode)) => LayoutConfig::for_mode(mode.into()),
                (None, None) => LayoutConfig::default(),
            };
            debug!("placing {} players with {:?}", entries.len(), config);

            let layout = LineupLayout::new(config).layout_roster(&entries, formation.as_deref(), !away);
            let response = LayoutResponse {
                formation: layout.formation.map(|f| f.label()),
                placements: layout.placements,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Detect { roster } => {
            let entries = read_roster(&roster)?;
            match lineup_core::detect_formation(&entries) {
                Some(formation) => println!("{formation}"),
                None => {
                    warn!("no outfield players in {}", roster.display());
                    println!("-");
                }
            }
        }

        Commands::Schema => {
            println!("{}", lineup_core::layout_request_schema()?);
        }
    }

    Ok(())
}

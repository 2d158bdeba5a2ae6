//! # Flagboard CLI
//!
//! Terminal host for a Flagboard board. Each invocation opens the layout
//! persisted in the data directory, applies one command and prints the
//! result as pretty JSON.
//!
//! ## Usage
//!
//! ```bash
//! flagboard auto A
//! flagboard place B 120 240
//! flagboard --width 360 --height 640 --compact list
//! FLAGBOARD_DATA_DIR=/tmp/board flagboard clear
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved canvas size, data directory and input files
//! - `run` - Opens a `flagboard_core::Board` over a `FileStore` and executes one command

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flagboard_core::{
    ActionOutcome, Board, BoardAction, Catalog, CatalogItem, DeviceClass, FileStore, Geometry,
    ItemId, LayoutSettings, PlacedItem, PlacementEngine,
};
use serde::Serialize;

/// Command-line arguments for flagboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "flagboard")]
#[command(about = "Place signal flags on a persisted board")]
#[command(version)]
pub struct CliArgs {
    /// Directory the board layout is stored in
    #[arg(long, env = "FLAGBOARD_DATA_DIR", default_value = ".flagboard")]
    pub data_dir: PathBuf,

    /// Layout settings JSON file
    #[arg(long, env = "FLAGBOARD_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Catalog JSON file (defaults to the built-in signal flags)
    #[arg(long, env = "FLAGBOARD_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, env = "FLAGBOARD_WIDTH", default_value = "1280")]
    pub width: f32,

    /// Canvas height in pixels
    #[arg(long, env = "FLAGBOARD_HEIGHT", default_value = "800")]
    pub height: f32,

    /// Treat the canvas as a compact (touch) device regardless of width
    #[arg(long, env = "FLAGBOARD_COMPACT")]
    pub compact: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// One board command.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Auto-place a flag at the next free slot
    Auto {
        /// Catalog kind, e.g. `A`
        key: String,
    },
    /// Place a flag centered at a point
    Place {
        /// Catalog kind
        key: String,
        /// Center X
        #[arg(allow_negative_numbers = true)]
        x: f32,
        /// Center Y
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },
    /// Move a placed flag
    Move {
        /// Placed item id
        id: String,
        /// New center X
        #[arg(allow_negative_numbers = true)]
        x: f32,
        /// New center Y
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },
    /// Remove a placed flag
    Remove {
        /// Placed item id
        id: String,
    },
    /// Remove every flag
    Clear,
    /// Print the placed flags
    List,
    /// Print the grid derived from the canvas size
    Grid,
    /// Print the catalog
    Catalog {
        /// Only show items whose kind, name or keywords contain this text
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the board layout is stored in.
    pub data_dir: PathBuf,
    /// Optional layout settings file.
    pub settings_path: Option<PathBuf>,
    /// Optional catalog file.
    pub catalog_path: Option<PathBuf>,
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Force the compact device class.
    pub compact: bool,
    /// Command to run.
    pub command: Command,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            settings_path: args.settings,
            catalog_path: args.catalog,
            width: args.width,
            height: args.height,
            compact: args.compact,
            command: args.command,
        }
    }
}

impl CliConfig {
    fn load_settings(&self) -> anyhow::Result<LayoutSettings> {
        match self.settings_path {
            Some(ref path) => LayoutSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            None => Ok(LayoutSettings::default()),
        }
    }

    fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let Some(ref path) = self.catalog_path else {
            return Ok(Catalog::signal_flags());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        Catalog::from_json(&json)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))
    }

    fn geometry(&self, settings: &LayoutSettings) -> Geometry {
        let device_class = if self.compact {
            DeviceClass::Compact
        } else {
            DeviceClass::for_width(self.width, settings.compact_breakpoint)
        };
        Geometry::new(self.width, self.height, device_class)
    }
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    count: usize,
    items: &'a [PlacedItem],
}

/// Execute the configured command and return its JSON output.
///
/// # Errors
///
/// Returns an error if the settings or catalog files are invalid, the data
/// directory cannot be created, or an id argument is not a valid UUID.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    let settings = config.load_settings()?;
    let catalog = config.load_catalog()?;
    let geometry = config.geometry(&settings);
    tracing::debug!(
        "Canvas {}x{} ({:?})",
        geometry.width,
        geometry.height,
        geometry.device_class
    );

    let store = FileStore::with_data_dir(&config.data_dir).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.data_dir.display()
        )
    })?;
    let mut board = Board::open(PlacementEngine::new(catalog, settings, geometry), store);

    let action = match config.command {
        Command::Auto { ref key } => BoardAction::AutoPlace { key: key.clone() },
        Command::Place { ref key, x, y } => BoardAction::PlaceAt {
            key: key.clone(),
            left: x,
            top: y,
        },
        Command::Move { ref id, x, y } => BoardAction::Move {
            id: ItemId::parse(id)?,
            left: x,
            top: y,
        },
        Command::Remove { ref id } => BoardAction::Remove {
            id: ItemId::parse(id)?,
        },
        Command::Clear => BoardAction::ClearAll,
        Command::List => {
            let items = board.items();
            return Ok(serde_json::to_string_pretty(&Listing {
                count: items.len(),
                items,
            })?);
        }
        Command::Grid => return Ok(serde_json::to_string_pretty(&board.grid_config())?),
        Command::Catalog { ref filter } => {
            let items: Vec<&CatalogItem> = board
                .engine()
                .catalog()
                .iter()
                .filter(|item| match filter {
                    Some(query) => item.matches(query),
                    None => true,
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&items)?);
        }
    };

    let outcome: ActionOutcome = board.apply(&action);
    if !outcome.is_mutation() {
        tracing::info!("Nothing changed: {action:?}");
    }
    Ok(serde_json::to_string_pretty(&outcome)?)
}

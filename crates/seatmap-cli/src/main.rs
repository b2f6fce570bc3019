// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use seatmap_core::render::render_seat_map;
use seatmap_core::store::{LayoutRecord, LayoutStore};
use seatmap_core::{
    disassemble_layout, generate_seats, parse_pattern, validate_batch, Configuration, EntityKind,
    Layout, LayoutPolicy, PolicyConfig,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding policy.json and layouts.json
    #[arg(long, env = "SEATMAP_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    /// Which limits to apply
    #[arg(short, long, value_enum, default_value_t = Entity::Aircraft, global = true)]
    entity: Entity,

    #[arg(long, global = true)]
    max_seats_per_row: Option<u32>,

    #[arg(long, global = true)]
    max_total_rows: Option<u32>,

    #[arg(long, global = true)]
    max_row_number: Option<u32>,

    /// More output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Entity {
    Aircraft,
    AircraftType,
}

impl From<Entity> for EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Aircraft => EntityKind::Aircraft,
            Entity::AircraftType => EntityKind::AircraftType,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the seat groups of a pattern such as 3-4-3
    Parse { pattern: String },
    /// List the seats of a row range
    Generate {
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
        #[arg(long)]
        pattern: String,
    },
    /// Validate one or more draft files
    Validate {
        #[arg(required = true)]
        drafts: Vec<PathBuf>,
        /// Print the full validation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a draft and print (or write) its layout
    Assemble {
        draft: PathBuf,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Turn a layout back into an editable draft
    Disassemble { layout: PathBuf },
    /// Draw a layout as a text seat map
    Show { layout: PathBuf },
    /// Validate a draft and store its layout under a name
    Save { name: String, draft: PathBuf },
    /// List stored layouts
    List,
    /// Remove a stored layout
    Remove { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_root = cli
        .config_dir
        .clone()
        .unwrap_or_else(seatmap_core::get_config_root);
    let entity = EntityKind::from(cli.entity);
    let policy = resolve_policy(&cli, &config_root, entity)?;
    let store = LayoutStore::new(&config_root);

    match &cli.command {
        Commands::Parse { pattern } => {
            let parsed = parse_pattern(pattern)?;
            println!(
                "{:?} ({} seats per row)",
                parsed.groups(),
                parsed.seats_per_row()
            );
        }
        Commands::Generate { from, to, pattern } => {
            parse_pattern(pattern)?;
            let seats = generate_seats(Some(*from), Some(*to), pattern);
            let codes: Vec<&str> = seats.iter().map(|s| s.seat_code.as_str()).collect();
            println!("{}", codes.join(" "));
        }
        Commands::Validate { drafts, json } => {
            let configs = drafts
                .iter()
                .map(|path| read_draft(path))
                .collect::<Result<Vec<_>>>()?;
            let results = validate_batch(&configs, &policy);

            let mut failures = 0;
            for (path, result) in drafts.iter().zip(&results) {
                if *json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else if result.valid {
                    println!("OK    {}", path.display());
                } else {
                    println!("FAIL  {}", path.display());
                    for message in result.messages() {
                        println!("      {}", message);
                    }
                }
                if !result.valid {
                    failures += 1;
                }
            }

            if failures > 0 {
                bail!("{} of {} drafts failed validation", failures, drafts.len());
            }
        }
        Commands::Assemble { draft, out } => {
            let layout = build_layout(draft, &policy)?;
            let content = serde_json::to_string_pretty(&layout)?;
            match out {
                Some(path) => {
                    fs::write(path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!(
                        "Wrote {} sections, {} seats to {:?}",
                        layout.len(),
                        layout.total_seats(),
                        path
                    );
                }
                None => println!("{}", content),
            }
        }
        Commands::Disassemble { layout } => {
            let layout = read_layout(layout)?;
            let (seat_classes, spaces) = disassemble_layout(&layout);
            let draft = Configuration::new(seat_classes, spaces);
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Commands::Show { layout } => {
            let layout = read_layout(layout)?;
            for violation in layout.check_consistency() {
                log::warn!("{}", violation);
            }
            print!("{}", render_seat_map(&layout));
            println!("{} seats", layout.total_seats());
        }
        Commands::Save { name, draft } => {
            let layout = build_layout(draft, &policy)?;
            let mut collection = store.load()?;
            let replaced = collection.upsert(LayoutRecord::new(name.clone(), entity, layout));
            store.save(&collection)?;
            println!(
                "{} {} '{}'",
                if replaced { "Updated" } else { "Saved" },
                entity,
                name
            );
        }
        Commands::List => {
            let collection = store.load()?;
            for record in collection.list(Some(entity)) {
                println!(
                    "{:<20} {:>4} seats  {}",
                    record.name,
                    record.total_seats,
                    record.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Remove { name } => {
            let mut collection = store.load()?;
            if collection.remove(entity, name).is_some() {
                store.save(&collection)?;
                println!("Removed {} '{}'", entity, name);
            } else {
                println!("No {} named '{}'", entity, name);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // A second logger (e.g. under a test harness) is not an error worth failing on.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn resolve_policy(cli: &Cli, config_root: &Path, entity: EntityKind) -> Result<LayoutPolicy> {
    let config = PolicyConfig::load(&PolicyConfig::path_in(config_root))?;
    let mut policy = config.for_entity(entity);
    if let Some(max) = cli.max_seats_per_row {
        policy = policy.with_max_seats_per_row(max);
    }
    if let Some(max) = cli.max_total_rows {
        policy = policy.with_max_total_rows(max);
    }
    if let Some(max) = cli.max_row_number {
        policy = policy.with_max_row_number(max);
    }
    log::debug!("Using policy {:?}", policy);
    Ok(policy)
}

fn read_draft(path: &Path) -> Result<Configuration> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read draft {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse draft {:?}", path))
}

fn read_layout(path: &Path) -> Result<Layout> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read layout {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse layout {:?}", path))
}

fn build_layout(path: &Path, policy: &LayoutPolicy) -> Result<Layout> {
    let draft = read_draft(path)?;
    match draft.into_layout(policy) {
        Ok(layout) => Ok(layout),
        Err(result) => {
            for message in result.messages() {
                eprintln!("{}", message);
            }
            bail!("{:?} failed validation", path)
        }
    }
}

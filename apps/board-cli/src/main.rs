use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use board_registry as boards;

#[derive(Parser, Debug)]
#[command(
    name = "boards",
    version,
    about = "Inspect biosensor board identifiers and session configs",
    disable_help_subcommand = true
)]
struct Cli {
    /// Print Prometheus metrics after the command
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known board identifiers
    List {
        /// Only virtual sources (negative codes)
        #[arg(long = "virtual", action = ArgAction::SetTrue, conflicts_with = "hardware")]
        virtual_only: bool,
        /// Only physical hardware (non-negative codes)
        #[arg(long, action = ArgAction::SetTrue)]
        hardware: bool,
        /// Print JSON instead of a table
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Resolve a numeric code to its board name
    Lookup {
        /// Board code, e.g. 0 or -1
        #[arg(long, allow_hyphen_values = true)]
        code: i32,
    },
    /// Resolve a board name to its numeric code
    Resolve {
        /// Exact board name, e.g. CYTON_BOARD
        #[arg(long)]
        name: String,
    },
    /// Validate board session configs
    ConfigValidate {
        /// YAML or JSON file path
        #[arg(long)]
        file: Option<String>,
        /// Directory containing configs
        #[arg(long)]
        dir: Option<String>,
        /// Print JSON after validation
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BoardRow {
    name: &'static str,
    code: i32,
    hardware: bool,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let hub = boards::MetricsHub::new().map_err(anyhow::Error::msg)?;

    let outcome = match cli.command {
        Commands::List {
            virtual_only,
            hardware,
            json,
        } => board_list(virtual_only, hardware, json),
        Commands::Lookup { code } => board_lookup(&hub, code),
        Commands::Resolve { name } => board_resolve(&hub, &name),
        Commands::ConfigValidate { file, dir, json } => {
            config_validate(&hub, file.as_deref(), dir.as_deref(), json)
        }
    };

    if cli.metrics {
        print!("{}", hub.encode_text());
    }
    outcome
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn board_list(only_virtual: bool, only_hardware: bool, json: bool) -> Result<()> {
    let rows: Vec<BoardRow> = boards::board_registry()
        .boards()
        .into_iter()
        .filter(|b| !only_virtual || b.is_virtual())
        .filter(|b| !only_hardware || b.is_hardware())
        .map(|b| BoardRow {
            name: b.name(),
            code: b.code(),
            hardware: b.is_hardware(),
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}\t{}", row.code, row.name);
        }
    }
    Ok(())
}

fn board_lookup(hub: &boards::MetricsHub, code: i32) -> Result<()> {
    let result = boards::board_from_code(code);
    hub.record_lookup(&result);
    let board = result?;
    println!("{board}");
    Ok(())
}

fn board_resolve(hub: &boards::MetricsHub, name: &str) -> Result<()> {
    let result = boards::board_from_name(name);
    hub.record_lookup(&result);
    let board = result?;
    println!("{}", board.code());
    Ok(())
}

fn config_validate(
    hub: &boards::MetricsHub,
    file: Option<&str>,
    dir: Option<&str>,
    json: bool,
) -> Result<()> {
    match (file, dir) {
        (Some(f), None) => {
            let cfg = boards::load_board_config_file(f)?;
            hub.lookup.configs_loaded.set(1);
            println!("ok: {} (board={}, code={})", cfg.name, cfg.board_id, cfg.board_id.code());
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
        }
        (None, Some(d)) => {
            let set = boards::load_board_configs_dir(d)?;
            hub.lookup.configs_loaded.set(set.len() as i64);
            info!(count = set.len(), "validated board configs");
            println!("ok: loaded {} configs", set.len());
            if json {
                println!("{}", serde_json::to_string_pretty(&set.configs)?);
            }
        }
        _ => {
            return Err(anyhow::anyhow!("provide --file <path> or --dir <dir>"));
        }
    }
    Ok(())
}

//! Headless Skirmish Runner
//!
//! Hands every faction to the scripted AI, plays a match out and prints
//! the result.

use std::path::PathBuf;

use clap::Parser;
use water_emblem::core::config::GameConfig;
use water_emblem::core::error::Result;
use water_emblem::game::{MatchSummary, Skirmish};

/// Headless Skirmish Runner - AI vs AI matches on a generated map
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Play a skirmish with every faction on AI and report the outcome")]
struct Args {
    /// TOML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map width override
    #[arg(long)]
    width: Option<u32>,

    /// Map height override
    #[arg(long)]
    height: Option<u32>,

    /// Rounds to play before calling it a draw
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every AI decision
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "water_emblem=debug"
    } else {
        "water_emblem=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut game = Skirmish::new(config, seed)?;
    game.automate_all();
    let summary = game.run_to_completion(args.max_turns);

    match args.format.as_str() {
        "json" => print_json(&summary),
        "text" => print_text(&summary),
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            print_json(&summary);
        }
    }
    Ok(())
}

fn print_json(summary: &MatchSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }
}

fn print_text(summary: &MatchSummary) {
    println!("=== SKIRMISH RESULT ===");
    println!("Seed: {}", summary.seed);
    println!("Turns: {}", summary.turns);
    match (&summary.winner, summary.finished) {
        (Some(name), _) => println!("Winner: {}", name),
        (None, true) => println!("Winner: none (mutual destruction)"),
        (None, false) => println!("Winner: none (turn limit reached)"),
    }
    println!("Attacks: {} ({} kills)", summary.attacks, summary.kills);
    for standing in &summary.standings {
        println!("  {:<10} {}/{} alive", standing.name, standing.alive, standing.fielded);
    }
}

//! Water Emblem - Entry Point
//!
//! Text controller for a hot-seat skirmish. Reads commands from stdin,
//! forwards them to the match as intents and prints an ASCII board.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use water_emblem::core::config::GameConfig;
use water_emblem::core::error::Result;
use water_emblem::core::types::Coord;
use water_emblem::game::Skirmish;

/// Water Emblem - hot-seat skirmish on a generated map
#[derive(Parser, Debug)]
#[command(name = "water_emblem")]
#[command(about = "Play a skirmish from the terminal, AI factions move on their own")]
struct Args {
    /// TOML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic maps and AI
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("water_emblem=info")),
        )
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut game = Skirmish::new(config, seed)?;

    println!("\n=== WATER EMBLEM ===");
    println!("Seed {}", seed);
    print_help();

    loop {
        print_board(&game);
        if game.state().is_over() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = words.first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "map" | "m" => {}
            "select" | "s" => match parse_coords(&words[1..]).as_deref() {
                Some([at]) => match game.select_cell(*at) {
                    Ok(sel) => {
                        if let Some(actor) = game.roster().actor(sel.actor) {
                            println!(
                                "{} {} lv{} hp {}/{} atk {} def {}",
                                actor.id,
                                actor.name,
                                actor.level,
                                actor.health,
                                actor.max_health,
                                actor.phys_attack,
                                actor.phys_defense
                            );
                            println!(
                                "  {} move cells, {} attack cells",
                                sel.move_cells, sel.attack_cells
                            );
                        }
                    }
                    Err(reason) => println!("Cannot select: {}", reason),
                },
                _ => println!("Usage: select <x> <y>"),
            },
            "move" | "mv" => match parse_coords(&words[1..]).as_deref() {
                Some([from, to]) => match game.request_move(*from, *to) {
                    Ok(()) => println!("Moved {} -> {}", from, to),
                    Err(reason) => println!("Cannot move: {}", reason),
                },
                _ => println!("Usage: move <x> <y> <to_x> <to_y>"),
            },
            "forecast" | "f" => match parse_coords(&words[1..]).as_deref() {
                Some([from, to]) => match game.forecast_at(*from, *to) {
                    Ok(fc) => println!(
                        "Damage {} | defender hp after {} | hit {}% crit {}% | xp {}{}",
                        fc.attacker_damage,
                        fc.defender_health_after,
                        fc.hit_chance,
                        fc.crit_chance,
                        fc.xp_gain,
                        if fc.attacker_kills_defender { " | KILL" } else { "" }
                    ),
                    Err(reason) => println!("No forecast: {}", reason),
                },
                _ => println!("Usage: forecast <x> <y> <target_x> <target_y>"),
            },
            "attack" | "a" => match parse_coords(&words[1..]).as_deref() {
                Some([from, to]) => match game.request_attack(*from, *to) {
                    Ok(result) => {
                        println!(
                            "Hit for {}{} (+{} xp)",
                            result.damage_dealt,
                            if result.defender_died { ", defender falls" } else { "" },
                            result.xp_awarded
                        );
                        for id in game.take_level_ups() {
                            if let Some(actor) = game.roster().actor(id) {
                                println!("{} reached level {}!", actor.name, actor.level);
                            }
                        }
                    }
                    Err(reason) => println!("Cannot attack: {}", reason),
                },
                _ => println!("Usage: attack <x> <y> <target_x> <target_y>"),
            },
            "end" | "e" => match game.end_turn() {
                Ok(reports) => {
                    for report in reports {
                        println!(
                            "AI turn: {} attacks, {} moves",
                            report.attacks.len(),
                            report.moves
                        );
                    }
                    game.take_level_ups();
                }
                Err(reason) => println!("Cannot end turn: {}", reason),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    match game
        .state()
        .winner()
        .and_then(|id| game.roster().faction(id))
    {
        Some(winner) => println!(
            "\n{} wins after {} turns.",
            winner.name,
            game.state().turn_number
        ),
        None if game.state().is_over() => println!("\nNo one is left standing."),
        None => println!("\nGoodbye!"),
    }
    Ok(())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  select <x> <y>            - Show a unit's move and attack range");
    println!("  move <x> <y> <tx> <ty>    - Move the unit at (x, y)");
    println!("  forecast <x> <y> <tx> <ty> - Preview an attack");
    println!("  attack <x> <y> <tx> <ty>  - Attack the unit at (tx, ty)");
    println!("  end                       - End your turn");
    println!("  map                       - Redraw the board");
    println!("  quit                      - Exit");
    println!();
}

/// Pairs of integers into coordinates
fn parse_coords(words: &[&str]) -> Option<Vec<Coord>> {
    let nums: Vec<i32> = words
        .iter()
        .map(|w| w.parse::<i32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if nums.is_empty() || nums.len() % 2 != 0 {
        return None;
    }
    Some(nums.chunks(2).map(|p| Coord::new(p[0], p[1])).collect())
}

fn print_board(game: &Skirmish) {
    let map = game.map();
    let roster = game.roster();
    let state = game.state();

    println!();
    match game.current_faction() {
        Some(faction) => println!(
            "--- Turn {} | {} | {} ---",
            state.turn_number, faction.name, state.phase
        ),
        None => println!("--- Turn {} | {} ---", state.turn_number, state.phase),
    }

    print!("    ");
    for x in 0..map.width() {
        print!("{}", x % 10);
    }
    println!();

    for y in 0..map.height() as i32 {
        print!("{:>3} ", y);
        for x in 0..map.width() as i32 {
            let Some(cell) = map.get_cell(x, y) else {
                continue;
            };
            let glyph = if let Some(actor) = cell.occupant.and_then(|id| roster.actor(id)) {
                // Faction initial, lowercase once the unit is spent
                let initial = roster
                    .faction(actor.owner)
                    .and_then(|f| f.name.chars().next())
                    .unwrap_or('?');
                if actor.can_perform_action() {
                    initial.to_ascii_uppercase()
                } else {
                    initial.to_ascii_lowercase()
                }
            } else if cell.structure.is_some() {
                '#'
            } else if cell.in_attack_range && !cell.in_move_range {
                '!'
            } else if cell.in_move_range {
                '*'
            } else {
                cell.terrain.kind.glyph()
            };
            print!("{}", glyph);
        }
        println!();
    }

    for faction in roster.factions() {
        println!(
            "  {}{}: {} alive",
            faction.name,
            if faction.has_turn { " (active)" } else { "" },
            faction.count_alive()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_to_builtin_config() {
        let args = Args::try_parse_from(["water_emblem"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_args_take_config_and_seed() {
        let args = Args::try_parse_from([
            "water_emblem",
            "--config",
            "data/default_skirmish.toml",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("data/default_skirmish.toml")));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_args_reject_bad_seed() {
        assert!(Args::try_parse_from(["water_emblem", "--seed", "-3"]).is_err());
        assert!(Args::try_parse_from(["water_emblem", "--seed", "lots"]).is_err());
    }

    #[test]
    fn test_parse_coords_needs_pairs() {
        assert_eq!(
            parse_coords(&["1", "2", "3", "4"]),
            Some(vec![Coord::new(1, 2), Coord::new(3, 4)])
        );
        assert_eq!(parse_coords(&["1", "2", "3"]), None);
        assert_eq!(parse_coords(&[]), None);
        assert_eq!(parse_coords(&["x", "2"]), None);
    }
}

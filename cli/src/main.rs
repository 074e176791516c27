mod script;

use std::path::PathBuf;

use bingo_core::{Board, BoardSurface, InteractionMode, SeededContent, SurfaceConfig, WinChange};
use clap::{Parser, Subcommand};
use rand::Rng;

use crate::script::{apply_step, parse_script, render_board, ScriptError, Step};

#[derive(Parser)]
#[command(name = "bingo", version, about = "Headless driver for bingo boards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a freshly generated board.
    New {
        #[arg(long, env = "BINGO_SEED")]
        seed: Option<String>,
    },
    /// Replay clicks, drags and text edits against a board.
    Play {
        #[arg(long, env = "BINGO_SEED")]
        seed: Option<String>,
        /// File with one step per line.
        #[arg(long)]
        script: Option<PathBuf>,
        /// Replay drags through the pointer controller instead of native drag.
        #[arg(long)]
        pointer: bool,
        /// Start with edit mode off.
        #[arg(long)]
        locked: bool,
        /// Steps such as "toggle 0,0", "swap 1,1 2,2" or "text 0,0 hello".
        steps: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { seed } => {
            let seed = resolve_seed(seed.as_deref())?;
            let board = Board::create(&mut SeededContent::new(seed));
            println!("seed: {seed:#x}");
            println!("{}", render_board(&board));
        }
        Commands::Play {
            seed,
            script,
            pointer,
            locked,
            steps,
        } => {
            let seed = resolve_seed(seed.as_deref())?;
            let mut plan = match script {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)?;
                    parse_script(text.lines())?
                }
                None => Vec::new(),
            };
            plan.extend(parse_args(&steps)?);

            let interaction = if pointer {
                InteractionMode::Pointer
            } else {
                InteractionMode::Native
            };
            let board = Board::create(&mut SeededContent::new(seed));
            let mut surface = BoardSurface::new(
                board,
                SurfaceConfig {
                    edit_mode: !locked,
                    interaction,
                },
            );
            println!("seed: {seed:#x} ({} drag)", interaction.label());

            for step in &plan {
                let report = apply_step(&mut surface, step);
                match (step, report.changed) {
                    (Step::Edit, _) => println!("{step}: {}", surface.edit_mode_label()),
                    (_, true) => println!("{step}"),
                    (_, false) => eprintln!("{step}: no change"),
                }
                match report.win {
                    Some(WinChange::Won) => println!("line complete"),
                    Some(WinChange::Cleared) => println!("line broken"),
                    None => {}
                }
            }

            println!("{}", render_board(surface.board()));
            if surface.won() {
                println!("BINGO!");
            }
        }
    }

    Ok(())
}

/// Command-line steps share the script grammar; line numbers count arguments.
fn parse_args(steps: &[String]) -> Result<Vec<Step>, ScriptError> {
    parse_script(steps.iter().map(String::as_str))
}

fn resolve_seed(raw: Option<&str>) -> Result<u64, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => parse_seed_arg(raw),
        None => Ok(rand::rng().random::<u64>()),
    }
}

fn parse_seed_arg(raw: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    let value = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)?
    } else {
        trimmed.parse::<u64>()?
    };
    Ok(value)
}

//! Connect4-MCTS command line front end.
//!
//! ## Usage
//!
//! - `connect4-mcts` - Self-play demo
//! - `connect4-mcts act [--board FILE]` - Decide a move for a board read from
//!   a file or stdin
//! - `connect4-mcts protocol` - Serve the line protocol on stdin/stdout
//!
//! Logs go to stderr and are controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use connect4_mcts::board::{Board, WinRule};
use connect4_mcts::config::{FinalSelection, Preset, RolloutPolicy, SearchConfig};
use connect4_mcts::constants::{COLS, NO_MOVE, PLAYER_ONE};
use connect4_mcts::policy::{MctsPolicy, Policy};
use connect4_mcts::protocol::ProtocolEngine;

/// Connect4-MCTS: a fast heuristic Connect-Four policy
#[derive(Parser)]
#[command(name = "connect4-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SearchArgs {
    /// Named tuning to start from
    #[arg(long, global = true, value_enum, default_value_t = Preset::Strategic)]
    preset: Preset,
    /// Search iterations per move
    #[arg(long, global = true)]
    iterations: Option<u32>,
    /// UCB1 exploration weight
    #[arg(long, global = true)]
    exploration: Option<f64>,
    /// Rollout depth in plies
    #[arg(long, global = true)]
    depth: Option<u32>,
    /// Rollout move policy
    #[arg(long, global = true, value_enum)]
    rollout: Option<RolloutPolicy>,
    /// Lines that count as a win
    #[arg(long, global = true, value_enum)]
    win_rule: Option<WinRule>,
    /// Final move selection rule
    #[arg(long = "final", global = true, value_enum)]
    final_selection: Option<FinalSelection>,
    /// Seed for reproducible play
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::preset(self.preset);
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(exploration) = self.exploration {
            config.exploration = exploration;
        }
        if let Some(depth) = self.depth {
            config.rollout_depth = depth;
        }
        if let Some(rollout) = self.rollout {
            config.rollout_policy = rollout;
        }
        if let Some(rule) = self.win_rule {
            config.win_rule = rule;
        }
        if let Some(rule) = self.final_selection {
            config.final_selection = rule;
        }
        config.validate().context("invalid search configuration")?;
        Ok(config)
    }

    fn policy(&self, config: SearchConfig) -> MctsPolicy {
        match self.seed {
            Some(seed) => MctsPolicy::with_seed(config, seed),
            None => MctsPolicy::new(config),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two presets and print every position
    Demo {
        /// Preset for the second player
        #[arg(long, value_enum, default_value_t = Preset::Basic)]
        opponent: Preset,
    },
    /// Read a board (42 symbols, top row first) and print the chosen column
    Act {
        /// Board file; stdin when omitted
        #[arg(long)]
        board: Option<PathBuf>,
    },
    /// Start the line protocol server for use by a game driver
    Protocol,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.search.config()?;
    info!(?config, "search configuration");

    match cli.command {
        Some(Commands::Act { board }) => {
            let text = match board {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read board from stdin")?;
                    buf
                }
            };
            let board: Board = text.parse().context("invalid board")?;
            let mut policy = cli.search.policy(config);
            policy.mount();
            let col = policy.act(&board).map_or(NO_MOVE, |c| c as i32);
            println!("{col}");
        }
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new(cli.search.policy(config));
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Demo { opponent }) => run_demo(&cli.search, config, opponent),
        None => run_demo(&cli.search, config, Preset::Basic),
    }

    Ok(())
}

fn run_demo(args: &SearchArgs, config: SearchConfig, opponent: Preset) {
    println!("Connect4-MCTS self-play: {} vs {opponent}\n", args.preset);

    let mut players = [
        args.policy(config),
        args.policy(SearchConfig::preset(opponent)),
    ];
    for p in &mut players {
        p.mount();
    }

    let mut board = Board::new();
    let mut side = PLAYER_ONE;
    let footer: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();

    loop {
        let (policy, view) = if side == PLAYER_ONE {
            (&mut players[0], board)
        } else {
            (&mut players[1], board.flipped())
        };
        let Some(col) = policy.act(&view) else {
            println!("Draw.");
            break;
        };
        board.drop_piece(col, side);

        let mark = if side == PLAYER_ONE { 'X' } else { 'O' };
        println!("{mark} plays {col}");
        println!("{board}{}\n", footer.join(" "));

        if board.has_four(side, WinRule::Full) {
            println!("{mark} wins.");
            break;
        }
        side = -side;
    }
}

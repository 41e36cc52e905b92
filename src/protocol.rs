//! Line protocol for driving the policy from another process.
//!
//! Framing follows GTP: each command is one line, optionally prefixed by a
//! numeric id; responses are `=[id] message` on success or `?[id] message` on
//! failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - empty board, player one to move
//! - `play <col>` - drop a piece for the side to move
//! - `genmove` - let the policy move for the side to move
//! - `showboard` - print the board
//! - `setboard <42 symbols> [1|2]` - load a position and the side to move;
//!   the symbols may be separated by spaces, as `showboard` prints them

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, WinRule};
use crate::constants::{COLS, PLAYER_ONE, PLAYER_TWO, ROWS};
use crate::policy::Policy;

const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "version",
];

/// Game state held by the protocol front end.
pub struct ProtocolEngine<P: Policy> {
    policy: P,
    board: Board,
    to_move: i8,
}

impl<P: Policy> ProtocolEngine<P> {
    pub fn new(mut policy: P) -> Self {
        policy.mount();
        Self {
            policy,
            board: Board::new(),
            to_move: PLAYER_ONE,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Serve commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.serve(stdin.lock(), io::stdout())
    }

    /// Serve commands from `input`, writing responses to `output`.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                debug!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    fn game_over(&self) -> bool {
        self.board.is_full()
            || self.board.has_four(PLAYER_ONE, WinRule::Full)
            || self.board.has_four(PLAYER_TWO, WinRule::Full)
    }

    /// Drop for the side to move and pass the turn.
    fn play(&mut self, col: usize) -> Result<(), String> {
        if self.game_over() {
            return Err("game is over".to_string());
        }
        if self.board.drop_piece(col, self.to_move).is_none() {
            return Err("illegal move".to_string());
        }
        self.to_move = -self.to_move;
        Ok(())
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = Board::new();
                self.to_move = PLAYER_ONE;
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "setboard" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                // Cells may be spaced out as `showboard` prints them, so the
                // side to move is told apart by the symbol count alone.
                let mut cells = args.concat();
                let to_move = if cells.chars().count() == ROWS * COLS + 1 {
                    match cells.pop() {
                        Some('1') => PLAYER_ONE,
                        Some('2') => PLAYER_TWO,
                        other => return (false, format!("invalid side {other:?}")),
                    }
                } else {
                    PLAYER_ONE
                };
                match cells.parse::<Board>() {
                    Ok(board) => {
                        self.board = board;
                        self.to_move = to_move;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(col) = arg.parse::<usize>() else {
                    return (false, "invalid column".to_string());
                };
                match self.play(col) {
                    Ok(()) => (true, String::new()),
                    Err(msg) => (false, msg),
                }
            }

            "genmove" => {
                if self.game_over() {
                    return (false, "game is over".to_string());
                }
                let view = if self.to_move == PLAYER_ONE {
                    self.board
                } else {
                    self.board.flipped()
                };
                let Some(col) = self.policy.act(&view) else {
                    return (false, "no legal move".to_string());
                };
                match self.play(col) {
                    Ok(()) => {
                        info!(column = col, "genmove");
                        (true, col.to_string())
                    }
                    Err(msg) => (false, msg),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

/// Split an optional numeric command id from the start of the line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end > 0 {
        if let Ok(id) = trimmed[..end].parse::<u32>() {
            return (Some(id), trimmed[end..].trim());
        }
    }
    (None, trimmed)
}

//! The decision engine and the `Policy` capability a game driver talks to.
//!
//! A driver constructs a policy, calls [`Policy::mount`] once, then calls
//! [`Policy::act`] once per turn. Boards are always presented from the
//! policy's own point of view: its pieces are `PLAYER_ONE`.

use tracing::debug;

use crate::board::{Board, Cells, Column};
use crate::config::SearchConfig;
use crate::constants::{NO_MOVE, PLAYER_ONE};
use crate::mcts::search;
use crate::tactics::{Tactic, immediate_action};

/// Something that picks a column for `PLAYER_ONE`.
pub trait Policy {
    /// One-time setup before the first decision.
    fn mount(&mut self) {}

    /// Choose a column. `None` only when no column is playable.
    fn act(&mut self, board: &Board) -> Option<Column>;

    /// Framework-facing variant of [`Policy::act`] on a raw grid of
    /// `{0, 1, -1}`: returns the column, or `-1` if nothing is playable.
    ///
    /// The grid is trusted to be a reachable position.
    fn act_raw(&mut self, cells: &Cells) -> i32 {
        let board = match Board::from_cells(*cells) {
            Ok(board) => board,
            Err(err) => {
                debug!(%err, "malformed board");
                return NO_MOVE;
            }
        };
        self.act(&board).map_or(NO_MOVE, |c| c as i32)
    }
}

/// Why a column was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    OnlyMove,
    Win,
    Block,
    Search,
}

/// A chosen column together with the reason for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub column: Column,
    pub reason: Reason,
}

/// Immediate tactics followed by a shallow Monte Carlo search.
pub struct MctsPolicy {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl MctsPolicy {
    /// Policy with an entropy-seeded random source.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Policy with a fixed seed, for reproducible play.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(config: SearchConfig, rng: fastrand::Rng) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Decide and report why.
    pub fn decide(&mut self, board: &Board) -> Option<Decision> {
        let legal = board.legal_columns();

        let decision = match legal.as_slice() {
            [] => return None,
            [only] => Decision {
                column: *only,
                reason: Reason::OnlyMove,
            },
            _ => match immediate_action(board, &legal, PLAYER_ONE, self.config.win_rule) {
                Some(Tactic::Win(column)) => Decision {
                    column,
                    reason: Reason::Win,
                },
                Some(Tactic::Block(column)) => Decision {
                    column,
                    reason: Reason::Block,
                },
                None => {
                    let result = search(board, &legal, PLAYER_ONE, &self.config, &mut self.rng)?;
                    debug!(
                        visits = ?result.stats.visits,
                        wins = ?result.stats.wins,
                        "search finished"
                    );
                    Decision {
                        column: result.column,
                        reason: Reason::Search,
                    }
                }
            },
        };

        debug!(column = decision.column, reason = ?decision.reason, "decided");
        Some(decision)
    }
}

impl Default for MctsPolicy {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Policy for MctsPolicy {
    fn act(&mut self, board: &Board) -> Option<Column> {
        self.decide(board).map(|d| d.column)
    }
}

/// Uniformly random legal column. A baseline opponent.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, board: &Board) -> Option<Column> {
        let legal = board.legal_columns();
        self.rng.choice(legal)
    }
}

//! Flat Monte Carlo search over the root columns.
//!
//! Every iteration:
//! - selects a column (unvisited columns first, in center-first order, then
//!   UCB1 over the legal columns)
//! - plays one rollout from it (see [`crate::playout`])
//! - records a visit, and a win if the rollout result was positive
//!
//! Statistics live only for the duration of one [`search`] call.

use tracing::trace;

use crate::board::{Board, Column};
use crate::config::{FinalSelection, SearchConfig};
use crate::constants::{CENTER_ORDER, COLS, LEAST_VISITED_BONUS};
use crate::playout::rollout;

/// Per-column visit and win counts for one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub visits: [u32; COLS],
    pub wins: [u32; COLS],
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_visits(&self) -> u32 {
        self.visits.iter().sum()
    }

    /// Wins over visits, or 0 for an unvisited column.
    #[inline]
    pub fn win_rate(&self, col: Column) -> f64 {
        if self.visits[col] > 0 {
            self.wins[col] as f64 / self.visits[col] as f64
        } else {
            0.0
        }
    }

    /// Back up one rollout result. Any positive result counts as a win,
    /// including favourable horizon evaluations.
    pub fn record(&mut self, col: Column, outcome: f64) {
        self.visits[col] += 1;
        if outcome > 0.0 {
            self.wins[col] += 1;
        }
    }
}

/// UCB1 score of a visited column.
pub fn ucb1(stats: &SearchStats, col: Column, exploration: f64) -> f64 {
    let visits = stats.visits[col] as f64;
    let total = stats.total_visits() as f64;
    stats.win_rate(col) + exploration * (total.ln() / visits).sqrt()
}

/// Legal columns in center-first order. Every tie in the search is broken in
/// this order.
fn center_first(legal: &[Column]) -> impl Iterator<Item = Column> + '_ {
    CENTER_ORDER.iter().copied().filter(|c| legal.contains(c))
}

/// Choose the column to simulate next.
///
/// Any unvisited legal column is taken first. Once every legal column has a
/// visit, the highest UCB1 score wins.
pub fn select(stats: &SearchStats, legal: &[Column], exploration: f64) -> Option<Column> {
    if let Some(col) = center_first(legal).find(|&c| stats.visits[c] == 0) {
        return Some(col);
    }

    let mut best: Option<(Column, f64)> = None;
    for col in center_first(legal) {
        let score = ucb1(stats, col, exploration);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((col, score));
        }
    }
    best.map(|(col, _)| col)
}

/// Pick the column to play once the budget is spent.
///
/// With [`FinalSelection::WinRateWithBonus`], unvisited columns are never
/// picked unless nothing was visited at all.
pub fn best_column(stats: &SearchStats, legal: &[Column], rule: FinalSelection) -> Option<Column> {
    let first = center_first(legal).next()?;
    let col = match rule {
        FinalSelection::MostVisited => center_first(legal).fold(first, |best, c| {
            if stats.visits[c] > stats.visits[best] {
                c
            } else {
                best
            }
        }),
        FinalSelection::WinRateWithBonus => {
            let least_visits = legal
                .iter()
                .map(|&c| stats.visits[c])
                .filter(|&v| v > 0)
                .min();

            let mut best = (first, -1.0);
            for c in center_first(legal) {
                if stats.visits[c] == 0 {
                    continue;
                }
                let mut score = stats.win_rate(c);
                if Some(stats.visits[c]) == least_visits {
                    score += LEAST_VISITED_BONUS;
                }
                if score > best.1 {
                    best = (c, score);
                }
            }
            best.0
        }
    };
    Some(col)
}

/// Outcome of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub column: Column,
    pub stats: SearchStats,
}

/// Run `config.iterations` select/rollout/backup rounds for `mover` and return
/// the chosen column. Returns `None` only when `legal` is empty.
pub fn search(
    board: &Board,
    legal: &[Column],
    mover: i8,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> Option<SearchResult> {
    let mut stats = SearchStats::new();

    for i in 0..config.iterations {
        let col = select(&stats, legal, config.exploration)?;
        let outcome = rollout(board, col, mover, config, rng);
        stats.record(col, outcome);
        trace!(iteration = i, column = col, outcome, "rollout");
    }

    let column = best_column(&stats, legal, config.final_selection)?;
    Some(SearchResult { column, stats })
}

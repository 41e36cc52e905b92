//! Rollouts (bounded-depth game simulation) and the final-position evaluator.
//!
//! A rollout starts by playing the searched column for the searching side and
//! then alternates sides for at most `rollout_depth` plies. Results are always
//! reported from the searching side's point of view:
//! - `+1` the searching side completed four in a row
//! - `-1` the opponent did
//! - `0` the board filled up
//! - `0.7 / 0.5 / 0.3` the horizon was reached; see [`evaluate`]

use crate::board::{Board, Column, WinRule};
use crate::config::{RolloutPolicy, SearchConfig};
use crate::constants::{
    CENTER_ORDER, EVAL_AHEAD, EVAL_BEHIND, EVAL_EVEN, OUTCOME_DRAW, OUTCOME_LOSS, OUTCOME_WIN,
    THREAT_THRESHOLD, THREAT_WEIGHT_THREE, THREAT_WEIGHT_TWO,
};

/// Play out the position after `mover` drops into `first`.
///
/// `board` is copied; the caller's board is never touched.
pub fn rollout(
    board: &Board,
    first: Column,
    mover: i8,
    config: &SearchConfig,
    rng: &mut fastrand::Rng,
) -> f64 {
    let rule = config.win_rule;
    let mut sim = *board;

    sim.drop_piece(first, mover);
    if sim.has_four(mover, rule) {
        return OUTCOME_WIN;
    }

    let mut player = -mover;
    for _ in 0..config.rollout_depth {
        let legal = sim.legal_columns();
        let Some(col) = rollout_action(&sim, &legal, player, config.rollout_policy, rule, rng)
        else {
            return OUTCOME_DRAW;
        };
        sim.drop_piece(col, player);

        if sim.has_four(player, rule) {
            return if player == mover {
                OUTCOME_WIN
            } else {
                OUTCOME_LOSS
            };
        }
        player = -player;
    }

    evaluate(&sim, mover)
}

/// Pick the next rollout move for `player`, or `None` when `legal` is empty.
pub fn rollout_action(
    board: &Board,
    legal: &[Column],
    player: i8,
    policy: RolloutPolicy,
    rule: WinRule,
    rng: &mut fastrand::Rng,
) -> Option<Column> {
    match policy {
        RolloutPolicy::Random => rng.choice(legal.iter().copied()),
        RolloutPolicy::Quick => {
            forced_move(board, legal, player, rule).or_else(|| center_first(legal))
        }
        RolloutPolicy::Strategic => forced_move(board, legal, player, rule)
            .or_else(|| strongest_threat(board, legal, player))
            .or_else(|| center_first(legal)),
    }
}

/// Winning drop for `player`, else a drop that blocks the opponent.
fn forced_move(board: &Board, legal: &[Column], player: i8, rule: WinRule) -> Option<Column> {
    legal
        .iter()
        .find(|&&c| board.would_win(c, player, rule))
        .or_else(|| legal.iter().find(|&&c| board.would_win(c, -player, rule)))
        .copied()
}

/// The column with the best threat potential, if that potential is significant.
fn strongest_threat(board: &Board, legal: &[Column], player: i8) -> Option<Column> {
    let mut best: Option<(Column, u32)> = None;
    for &col in legal {
        let score = threat_potential(board, col, player);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((col, score));
        }
    }
    best.filter(|&(_, score)| score > THREAT_THRESHOLD)
        .map(|(col, _)| col)
}

/// First legal column in center-first order.
fn center_first(legal: &[Column]) -> Option<Column> {
    CENTER_ORDER.iter().copied().find(|c| legal.contains(c))
}

/// Weighted count of two- and three-windows `player` owns after dropping into
/// `col` (horizontal and vertical).
pub fn threat_potential(board: &Board, col: Column, player: i8) -> u32 {
    let after = board.with_piece(col, player);
    after.count_sequences(player, 3) * THREAT_WEIGHT_THREE
        + after.count_sequences(player, 2) * THREAT_WEIGHT_TWO
}

/// Score an unresolved position for `mover` by comparing three-windows
/// (horizontal and vertical; diagonals are skipped for speed).
pub fn evaluate(board: &Board, mover: i8) -> f64 {
    let ours = board.count_sequences(mover, 3);
    let theirs = board.count_sequences(-mover, 3);
    match ours.cmp(&theirs) {
        std::cmp::Ordering::Greater => EVAL_AHEAD,
        std::cmp::Ordering::Less => EVAL_BEHIND,
        std::cmp::Ordering::Equal => EVAL_EVEN,
    }
}

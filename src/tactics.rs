//! Immediate tactics: take a winning drop, else block the opponent's.

use crate::board::{Board, Column, WinRule};

/// Why a tactical move was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tactic {
    Win(Column),
    Block(Column),
}

impl Tactic {
    pub fn column(self) -> Column {
        match self {
            Tactic::Win(c) | Tactic::Block(c) => c,
        }
    }
}

/// Scan `candidates` (in order) for a drop that wins for `mover`, then for one
/// that stops the opponent from winning next turn.
///
/// Only copies of `board` are modified.
pub fn immediate_action(
    board: &Board,
    candidates: &[Column],
    mover: i8,
    rule: WinRule,
) -> Option<Tactic> {
    if let Some(&col) = candidates.iter().find(|&&c| board.would_win(c, mover, rule)) {
        return Some(Tactic::Win(col));
    }
    candidates
        .iter()
        .find(|&&c| board.would_win(c, -mover, rule))
        .map(|&col| Tactic::Block(col))
}

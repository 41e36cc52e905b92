//! Constants for board dimensions, search parameters, and evaluation values.
//!
//! The board is the framework's 6x7 array: row 0 is the top row and row 5 is
//! the bottom row, so pieces fall towards higher row indices.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on a Connect-Four board.
pub const ROWS: usize = 6;

/// Number of columns on a Connect-Four board.
pub const COLS: usize = 7;

/// Row index of the bottom of every column.
pub const BOTTOM_ROW: usize = ROWS - 1;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

// =============================================================================
// Cell Values
// =============================================================================

/// Empty cell.
pub const EMPTY: i8 = 0;

/// The side the policy plays. Boards are always seen from this side's view.
pub const PLAYER_ONE: i8 = 1;

/// The opponent.
pub const PLAYER_TWO: i8 = -1;

/// Sentinel returned at the raw interface when no column is playable.
pub const NO_MOVE: i32 = -1;

// =============================================================================
// Move Ordering
// =============================================================================

/// Center-first column preference used for exploration order and rollouts.
pub const CENTER_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

// =============================================================================
// Search Parameters (defaults)
// =============================================================================

/// Default number of search iterations per decision.
pub const N_ITERATIONS: u32 = 50;

/// Default UCB1 exploration weight.
pub const EXPLORATION: f64 = 1.0;

/// Default rollout horizon in plies (after the first move).
pub const ROLLOUT_DEPTH: u32 = 10;

/// Bonus given to the least-visited column by the win-rate final selection.
pub const LEAST_VISITED_BONUS: f64 = 0.1;

// =============================================================================
// Rollout Heuristics
// =============================================================================

/// Threat weight for each two-in-a-row window.
pub const THREAT_WEIGHT_TWO: u32 = 1;

/// Threat weight for each three-in-a-row window.
pub const THREAT_WEIGHT_THREE: u32 = 3;

/// A threat score must exceed this before it beats positional play.
pub const THREAT_THRESHOLD: u32 = 2;

// =============================================================================
// Outcomes (always from the searching side's point of view)
// =============================================================================

/// The searching side connected four.
pub const OUTCOME_WIN: f64 = 1.0;

/// The opponent connected four.
pub const OUTCOME_LOSS: f64 = -1.0;

/// The board filled up with no winner.
pub const OUTCOME_DRAW: f64 = 0.0;

/// Evaluation when the searching side has more three-windows.
pub const EVAL_AHEAD: f64 = 0.7;

/// Evaluation when the opponent has more three-windows.
pub const EVAL_BEHIND: f64 = 0.3;

/// Evaluation when both sides have the same number of three-windows.
pub const EVAL_EVEN: f64 = 0.5;

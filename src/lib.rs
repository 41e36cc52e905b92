//! Connect4-MCTS: a fast, heuristic-guided Connect-Four policy.
//!
//! Each decision takes an immediate win or block if there is one, and
//! otherwise runs a shallow Monte Carlo search over the root columns with
//! UCB1 selection and fixed-depth rollouts.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, cell values and default parameters
//! - [`board`] - Board representation, piece dropping and line scanning
//! - [`config`] - Search configuration and named presets
//! - [`tactics`] - Immediate win / block detection
//! - [`playout`] - Rollout policies and the final-position evaluator
//! - [`mcts`] - The search loop: selection, simulation, backup
//! - [`policy`] - The `Policy` capability and the decision engine
//! - [`protocol`] - Line protocol for use from another process
//!
//! ## Example
//!
//! ```
//! use connect4_mcts::board::Board;
//! use connect4_mcts::config::SearchConfig;
//! use connect4_mcts::constants::PLAYER_TWO;
//! use connect4_mcts::policy::{MctsPolicy, Policy};
//!
//! let mut board = Board::new();
//! board.drop_piece(3, PLAYER_TWO);
//!
//! let mut policy = MctsPolicy::with_seed(SearchConfig::default(), 42);
//! policy.mount();
//! let col = policy.act(&board).expect("empty columns remain");
//! assert!(board.is_legal(col));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod mcts;
pub mod playout;
pub mod policy;
pub mod protocol;
pub mod tactics;

//! Search configuration.
//!
//! All tuning of the decision engine lives in [`SearchConfig`]. The named
//! [`Preset`]s reproduce the three tunings the engine is usually run with:
//!
//! - `basic`: few iterations, random rollouts, full win detection, most-visited
//!   final pick.
//! - `fast`: quick heuristic rollouts (win, block, center-first).
//! - `strategic` (default): like `fast`, plus threat-potential scoring.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::board::WinRule;
use crate::constants::{EXPLORATION, N_ITERATIONS, ROLLOUT_DEPTH};

/// How moves are picked during a rollout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum RolloutPolicy {
    /// Uniformly random legal column.
    Random,
    /// Win, else block, else center-first.
    Quick,
    /// Win, else block, else strongest threat if significant, else center-first.
    Strategic,
}

/// How the final column is chosen once the iteration budget is spent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum FinalSelection {
    /// Highest visit count.
    MostVisited,
    /// Highest win rate, with a small bonus for the least-visited column.
    WinRateWithBonus,
}

/// Named tunings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Preset {
    Basic,
    Fast,
    #[default]
    Strategic,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Basic => "basic",
            Preset::Fast => "fast",
            Preset::Strategic => "strategic",
        };
        f.write_str(name)
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Preset::Basic),
            "fast" => Ok(Preset::Fast),
            "strategic" => Ok(Preset::Strategic),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("iteration budget must be at least 1")]
    NoIterations,
    #[error("exploration weight must be finite and non-negative (got {0})")]
    Exploration(f64),
    #[error("rollout depth must be at least 1")]
    NoRolloutDepth,
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
}

/// Tunable parameters of one decision engine. Fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Search iterations per decision.
    pub iterations: u32,
    /// UCB1 exploration weight.
    pub exploration: f64,
    /// Rollout plies played after the first move.
    pub rollout_depth: u32,
    pub rollout_policy: RolloutPolicy,
    /// Win detection used by tactics and rollouts alike.
    pub win_rule: WinRule,
    pub final_selection: FinalSelection,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl SearchConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Basic => Self {
                iterations: 25,
                exploration: 1.4,
                rollout_depth: 8,
                rollout_policy: RolloutPolicy::Random,
                win_rule: WinRule::Full,
                final_selection: FinalSelection::MostVisited,
            },
            Preset::Fast => Self {
                iterations: N_ITERATIONS,
                exploration: EXPLORATION,
                rollout_depth: ROLLOUT_DEPTH,
                rollout_policy: RolloutPolicy::Quick,
                win_rule: WinRule::Orthogonal,
                final_selection: FinalSelection::WinRateWithBonus,
            },
            Preset::Strategic => Self {
                rollout_policy: RolloutPolicy::Strategic,
                ..Self::preset(Preset::Fast)
            },
        }
    }

    /// Check that the search is guaranteed to do useful, bounded work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::Exploration(self.exploration));
        }
        if self.rollout_depth == 0 {
            return Err(ConfigError::NoRolloutDepth);
        }
        Ok(())
    }
}

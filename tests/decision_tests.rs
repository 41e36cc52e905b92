//! End-to-end decision tests for the Connect-Four policy.
//!
//! Boards are written top row first, one line per row:
//! `.` empty, `X` the policy's pieces, `O` the opponent's.

use connect4_mcts::board::{Board, WinRule};
use connect4_mcts::config::{FinalSelection, Preset, RolloutPolicy, SearchConfig};
use connect4_mcts::constants::{NO_MOVE, PLAYER_ONE, PLAYER_TWO};
use connect4_mcts::policy::{MctsPolicy, Policy, RandomPolicy, Reason};

// =============================================================================
// Helpers
// =============================================================================

fn board(rows: &str) -> Board {
    rows.parse().expect("valid test board")
}

fn all_presets() -> [Preset; 3] {
    [Preset::Basic, Preset::Fast, Preset::Strategic]
}

fn policy(preset: Preset) -> MctsPolicy {
    MctsPolicy::with_seed(SearchConfig::preset(preset), 2024)
}

// =============================================================================
// Immediate tactics
// =============================================================================

#[test]
fn test_completes_own_row() {
    let b = board(
        ".......
         .......
         .......
         .......
         .......
         XXX....",
    );
    for preset in all_presets() {
        assert_eq!(policy(preset).act(&b), Some(3), "preset {preset}");
    }
}

#[test]
fn test_blocks_opponent_row() {
    let b = board(
        ".......
         .......
         .......
         .......
         .......
         OOO....",
    );
    for preset in all_presets() {
        assert_eq!(policy(preset).act(&b), Some(3), "preset {preset}");
    }
}

#[test]
fn test_win_preferred_over_block() {
    // Both sides have three stacked; taking the win comes first.
    let b = board(
        ".......
         .......
         .......
         X.....O
         X.....O
         X.....O",
    );
    for preset in all_presets() {
        let decision = policy(preset).decide(&b).unwrap();
        assert_eq!(decision.column, 0, "preset {preset}");
        assert_eq!(decision.reason, Reason::Win);
    }
}

#[test]
fn test_diagonal_tactics_follow_win_rule() {
    // X completes the rising diagonal (5,0) (4,1) (3,2) (2,3) by playing 3.
    let b = board(
        ".......
         .......
         .......
         ..XO...
         .XOX...
         XOOOX..",
    );
    let decision = policy(Preset::Basic).decide(&b).unwrap();
    assert_eq!(decision.column, 3);
    assert_eq!(decision.reason, Reason::Win);

    // Orthogonal-only presets do not see the diagonal and fall back to search.
    let decision = policy(Preset::Fast).decide(&b).unwrap();
    assert_eq!(decision.reason, Reason::Search);
    assert!(b.is_legal(decision.column));
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn test_empty_board_prefers_center() {
    for preset in [Preset::Fast, Preset::Strategic] {
        let col = policy(preset).act(&Board::new()).unwrap();
        assert!((2..=4).contains(&col), "preset {preset} played {col}");
    }
}

#[test]
fn test_empty_board_any_preset_is_legal() {
    for preset in all_presets() {
        let col = policy(preset).act(&Board::new()).unwrap();
        assert!(col < 7);
    }
}

#[test]
fn test_single_empty_column() {
    let b = board(
        "XOXO.OX
         OXOX.XO
         XOXO.OX
         OXOX.XO
         XOXO.OX
         OXOXXXO",
    );
    for preset in all_presets() {
        let decision = policy(preset).decide(&b).unwrap();
        assert_eq!(decision.column, 4);
        assert_eq!(decision.reason, Reason::OnlyMove);
    }
}

#[test]
fn test_full_board_has_no_move() {
    let b = board(
        "XOXOXOX
         XOXOXOX
         OXOXOXO
         OXOXOXO
         XOXOXOX
         XOXOXOX",
    );
    let mut p = policy(Preset::Strategic);
    assert_eq!(p.act(&b), None);
    assert_eq!(p.act_raw(b.cells()), NO_MOVE);
}

#[test]
fn test_never_plays_full_column() {
    // Columns 2, 3 and 4 are full.
    let b = board(
        "..OXO..
         ..XOX..
         ..OXO..
         ..XOX..
         ..OXO..
         ..XOX..",
    );
    for preset in all_presets() {
        let mut p = policy(preset);
        for _ in 0..5 {
            let col = p.act(&b).unwrap();
            assert!(![2, 3, 4].contains(&col), "preset {preset} played {col}");
        }
    }
}

#[test]
fn test_act_leaves_board_untouched() {
    let b = board(
        ".......
         .......
         .......
         ...O...
         ..XX...
         .OXOO..",
    );
    let before = b;
    for preset in all_presets() {
        policy(preset).act(&b);
        assert_eq!(b, before);
    }
}

#[test]
fn test_act_raw_matches_act() {
    let b = board(
        ".......
         .......
         .......
         .......
         .......
         OOO....",
    );
    let raw = *b.cells();
    let mut p = policy(Preset::Fast);
    assert_eq!(p.act_raw(&raw), 3);
    assert_eq!(&raw, b.cells());
}

// =============================================================================
// Configuration variants
// =============================================================================

#[test]
fn test_custom_configs_stay_legal() {
    let b = board(
        ".......
         .......
         ...X...
         ...O...
         ..OX...
         .XOXO..",
    );
    for rollout_policy in [
        RolloutPolicy::Random,
        RolloutPolicy::Quick,
        RolloutPolicy::Strategic,
    ] {
        for final_selection in [FinalSelection::MostVisited, FinalSelection::WinRateWithBonus] {
            for win_rule in [WinRule::Orthogonal, WinRule::Full] {
                let config = SearchConfig {
                    iterations: 30,
                    exploration: 1.5,
                    rollout_depth: 8,
                    rollout_policy,
                    win_rule,
                    final_selection,
                };
                let mut p = MctsPolicy::with_seed(config, 9);
                let col = p.act(&b).unwrap();
                assert!(b.is_legal(col));
            }
        }
    }
}

#[test]
fn test_seeded_policies_agree() {
    let b = board(
        ".......
         .......
         .......
         .......
         ...O...
         ..XXO..",
    );
    let config = SearchConfig::preset(Preset::Basic);
    let a = MctsPolicy::with_seed(config, 77).act(&b);
    let c = MctsPolicy::with_seed(config, 77).act(&b);
    assert_eq!(a, c);
}

// =============================================================================
// Full games
// =============================================================================

/// Play a whole game. `first` moves as player one; both see the board from
/// their own side. Returns the winner, or 0 for a draw.
fn play_game<'a>(first: &'a mut dyn Policy, second: &'a mut dyn Policy) -> i8 {
    first.mount();
    second.mount();
    let mut b = Board::new();
    let mut side = PLAYER_ONE;
    loop {
        let (player, view) = if side == PLAYER_ONE {
            (&mut *first, b)
        } else {
            (&mut *second, b.flipped())
        };
        let Some(col) = player.act(&view) else {
            return 0;
        };
        assert!(b.is_legal(col), "illegal column {col}");
        b.drop_piece(col, side);
        if b.has_four(side, WinRule::Full) {
            return side;
        }
        side = -side;
    }
}

#[test]
fn test_self_play_completes() {
    for preset in all_presets() {
        let mut a = policy(preset);
        let mut b = policy(Preset::Fast);
        let result = play_game(&mut a, &mut b);
        assert!([PLAYER_ONE, PLAYER_TWO, 0].contains(&result));
    }
}

#[test]
fn test_games_against_random_complete() {
    for seed in 0..4 {
        let mut a = MctsPolicy::with_seed(SearchConfig::default(), seed);
        let mut r = RandomPolicy::with_seed(seed);
        let result = play_game(&mut r, &mut a);
        assert!([PLAYER_ONE, PLAYER_TWO, 0].contains(&result));
    }
}

//! Property tests over generated positions.
//!
//! Positions are built by replaying random column sequences, skipping full
//! columns and any move that would end the game, so every generated board
//! respects gravity and has no four-in-a-row yet.

use proptest::prelude::*;

use connect4_mcts::board::{Board, WinRule};
use connect4_mcts::config::{Preset, SearchConfig};
use connect4_mcts::constants::{COLS, PLAYER_ONE, PLAYER_TWO};
use connect4_mcts::mcts::{SearchStats, select};
use connect4_mcts::policy::{MctsPolicy, Policy};
use connect4_mcts::tactics::immediate_action;

fn build(moves: &[usize]) -> Board {
    let mut board = Board::new();
    let mut side = PLAYER_ONE;
    for &col in moves {
        if !board.is_legal(col) {
            continue;
        }
        let next = board.with_piece(col, side);
        if next.has_four(side, WinRule::Full) {
            continue;
        }
        board = next;
        side = -side;
    }
    board
}

fn preset_strategy() -> impl Strategy<Value = Preset> {
    prop_oneof![
        Just(Preset::Basic),
        Just(Preset::Fast),
        Just(Preset::Strategic),
    ]
}

fn small(preset: Preset) -> SearchConfig {
    SearchConfig {
        iterations: 15,
        ..SearchConfig::preset(preset)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn act_returns_legal_column(
        moves in prop::collection::vec(0usize..COLS, 0..60),
        preset in preset_strategy(),
        seed in any::<u64>(),
    ) {
        let board = build(&moves);
        let mut policy = MctsPolicy::with_seed(small(preset), seed);
        match policy.act(&board) {
            Some(col) => prop_assert!(board.is_legal(col)),
            None => prop_assert!(board.is_full()),
        }
    }

    #[test]
    fn act_does_not_mutate_board(
        moves in prop::collection::vec(0usize..COLS, 0..40),
        preset in preset_strategy(),
        seed in any::<u64>(),
    ) {
        let board = build(&moves);
        let snapshot = *board.cells();
        let mut policy = MctsPolicy::with_seed(small(preset), seed);
        policy.act(&board);
        prop_assert_eq!(&snapshot, board.cells());
    }

    #[test]
    fn win_detection_is_idempotent(moves in prop::collection::vec(0usize..COLS, 0..42)) {
        let board = build(&moves);
        for rule in [WinRule::Orthogonal, WinRule::Full] {
            for player in [PLAYER_ONE, PLAYER_TWO] {
                let first = board.has_four(player, rule);
                prop_assert_eq!(first, board.has_four(player, rule));
            }
        }
    }

    #[test]
    fn forced_win_is_taken(
        moves in prop::collection::vec(0usize..COLS, 0..40),
        preset in preset_strategy(),
        seed in any::<u64>(),
    ) {
        let board = build(&moves);
        let config = small(preset);
        let legal = board.legal_columns();
        let winning: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|&c| board.would_win(c, PLAYER_ONE, config.win_rule))
            .collect();
        prop_assume!(!winning.is_empty());

        let col = MctsPolicy::with_seed(config, seed).act(&board).unwrap();
        prop_assert!(winning.contains(&col));
    }

    #[test]
    fn forced_block_is_played(
        moves in prop::collection::vec(0usize..COLS, 0..40),
        preset in preset_strategy(),
        seed in any::<u64>(),
    ) {
        let board = build(&moves);
        let config = small(preset);
        let legal = board.legal_columns();
        prop_assume!(legal.iter().all(|&c| !board.would_win(c, PLAYER_ONE, config.win_rule)));
        let blocking: Vec<usize> = legal
            .iter()
            .copied()
            .filter(|&c| board.would_win(c, PLAYER_TWO, config.win_rule))
            .collect();
        prop_assume!(!blocking.is_empty());

        let col = MctsPolicy::with_seed(config, seed).act(&board).unwrap();
        prop_assert!(blocking.contains(&col));
    }

    #[test]
    fn tactics_agree_with_policy(moves in prop::collection::vec(0usize..COLS, 0..40)) {
        let board = build(&moves);
        let legal = board.legal_columns();
        prop_assume!(legal.len() > 1);
        let config = small(Preset::Fast);
        if let Some(tactic) = immediate_action(&board, &legal, PLAYER_ONE, config.win_rule) {
            let col = MctsPolicy::with_seed(config, 0).act(&board);
            prop_assert_eq!(col, Some(tactic.column()));
        }
    }

    #[test]
    fn unvisited_columns_are_explored_first(
        visits in prop::array::uniform7(0u32..5),
        mask in prop::array::uniform7(any::<bool>()),
    ) {
        let legal: Vec<usize> = (0..COLS).filter(|&c| mask[c]).collect();
        prop_assume!(!legal.is_empty());
        let stats = SearchStats { visits, wins: [0; COLS] };
        let col = select(&stats, &legal, 1.0).unwrap();
        prop_assert!(legal.contains(&col));
        if legal.iter().any(|&c| visits[c] == 0) {
            prop_assert_eq!(visits[col], 0);
        }
    }
}

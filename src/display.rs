// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board::Board, game_state::GameState};
use std::fmt::Write;

#[inline(always)]
pub fn board_label(board: &Board, row: usize, col: usize) -> char {
    board.at(row, col).map_or('-', char::from)
}

// Hex row and column headers, the same numbering moves use.
pub fn fmt_board(board: &Board) -> String {
    let n = board.size();
    let mut s = String::with_capacity((n + 1) * (2 * n + 3));
    s.push_str("  ");
    for c in 0..n {
        if c > 0 {
            s.push(' ');
        }
        let _ = write!(s, "{c:x}");
    }
    s.push('\n');
    for r in 0..n {
        let _ = write!(s, "{r:x}");
        for c in 0..n {
            s.push(' ');
            s.push(board_label(board, r, c));
        }
        s.push('\n');
    }
    s
}

pub fn print_board(board: &Board) {
    print!("{}", fmt_board(board));
}

pub fn print_game(game_state: &GameState) {
    print_board(&game_state.board);
    for (i, player) in game_state.players.iter().enumerate() {
        println!(
            "{}{}",
            if i == game_state.turn() && !game_state.is_over() {
                "> "
            } else {
                "  "
            },
            player
        );
    }
    println!("{} tiles in bag", game_state.bag.len());
}

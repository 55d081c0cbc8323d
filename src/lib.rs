// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod display;
pub mod game_config;
pub mod game_state;
pub mod lexicon;
pub mod matrix;
pub mod mcts;
pub mod move_picker;
pub mod movegen;
pub mod play_scorer;
pub mod word;

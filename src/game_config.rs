// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StaticGameConfig {
    alphabet: alphabet::Alphabet,
    board_size: usize,
    rack_size: usize,
    num_players: usize,
    bingo_bonus: i32,
    num_zeros_to_end: usize,
}

impl Default for StaticGameConfig {
    fn default() -> Self {
        StaticGameConfig {
            alphabet: alphabet::make_english_alphabet(),
            board_size: 15,
            rack_size: 7,
            num_players: 2,
            bingo_bonus: 50,
            num_zeros_to_end: 6,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_size(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.board_size,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.num_zeros_to_end,
        }
    }

    // Only for emptying a full rack in one move.
    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: usize) -> i32 {
        match self {
            GameConfig::Static(x) => {
                if num_played == x.rack_size {
                    x.bingo_bonus
                } else {
                    0
                }
            }
        }
    }

    // Panics on a shape no game can be played with.
    pub fn check(&self) {
        match self {
            GameConfig::Static(x) => {
                assert!(x.board_size >= 1, "board size must be positive");
                assert!(x.rack_size >= 1, "rack size must be positive");
                assert!(x.num_players >= 1, "need at least one player");
            }
        }
    }
}

pub fn make_english_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig::default())
}

pub fn make_english_game_config_with_size(board_size: usize) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        board_size,
        ..StaticGameConfig::default()
    })
}

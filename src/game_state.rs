// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet::{Letter, RackTally},
    bag::Bag,
    board::Board,
    error::RuleError,
    game_config::GameConfig,
    lexicon::Lexicon,
    move_picker::MovePicker,
    movegen::{self, Move},
    play_scorer,
};
use rand::prelude::*;
use std::sync::Arc;

fn use_tiles(rack: &mut Vec<Letter>, letters: &[Letter]) {
    for &letter in letters {
        if let Some(pos) = rack.iter().position(|&l| l == letter) {
            rack.remove(pos);
        }
    }
}

#[derive(Clone)]
pub struct GamePlayer {
    pub name: String,
    pub score: i32,
    pub rack: Vec<Letter>,
    pub picker: MovePicker,
}

impl GamePlayer {
    pub fn new(name: impl Into<String>, picker: MovePicker) -> Self {
        Self {
            name: name.into(),
            score: 0,
            rack: Vec::new(),
            picker,
        }
    }

    #[inline(always)]
    pub fn has_all(&self, letters: &[Letter]) -> bool {
        RackTally::new(&self.rack).has_all(letters)
    }

    pub fn remove(&mut self, letters: &[Letter]) {
        use_tiles(&mut self.rack, letters);
    }

    pub fn draw_up_to_capacity(&mut self, bag: &mut Bag, rack_size: usize) {
        bag.replenish(&mut self.rack, rack_size);
    }

    // Sum of face values left on the rack.
    pub fn rack_value(&self, game_config: &GameConfig) -> i32 {
        let alphabet = game_config.alphabet();
        self.rack.iter().map(|&l| alphabet.score(l)).sum()
    }

    pub fn automated_copy(&self, picker: MovePicker) -> Self {
        Self {
            picker,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for GamePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} points): ", self.name, self.score)?;
        for (i, letter) in self.rack.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct PlayOutcome {
    pub score: i32,
    pub description: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct PlayerResult {
    pub name: String,
    pub score: i32,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct GameResult {
    pub players: Vec<PlayerResult>,
    pub winners: Vec<usize>,
    pub rounds: usize,
}

#[derive(Clone)]
pub struct GameState {
    pub game_config: Arc<GameConfig>,
    pub lexicon: Arc<Lexicon>,
    pub players: Box<[GamePlayer]>,
    pub board: Board,
    pub bag: Bag,
    pub round: usize,
    pub num_zeros: usize,
    over: bool,
}

impl GameState {
    // Shuffles a fresh bag and fills every rack, in seating order.
    pub fn new(
        game_config: Arc<GameConfig>,
        lexicon: Arc<Lexicon>,
        players: Vec<GamePlayer>,
        rng: &mut dyn RngCore,
    ) -> Self {
        game_config.check();
        assert!(!players.is_empty(), "need at least one player");
        let mut bag = Bag::new(game_config.alphabet());
        bag.shuffle(rng);
        let rack_size = game_config.rack_size();
        let mut players = players.into_boxed_slice();
        for player in players.iter_mut() {
            player.rack.clear();
            player.draw_up_to_capacity(&mut bag, rack_size);
        }
        let mut board = Board::new(game_config.board_size());
        board.refresh_cross_checks(&lexicon);
        Self {
            game_config,
            lexicon,
            players,
            board,
            bag,
            round: 0,
            num_zeros: 0,
            over: false,
        }
    }

    #[inline(always)]
    pub fn turn(&self) -> usize {
        self.round % self.players.len()
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn()]
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.over
    }

    // Deep copy with every player driven by `picker`.
    pub fn automated_copy(&self, picker: MovePicker) -> Self {
        let mut copy = self.clone();
        for player in copy.players.iter_mut() {
            player.picker = picker.clone();
        }
        copy
    }

    pub fn legal_moves_for(&mut self, player_idx: usize) -> Vec<Move> {
        self.board.refresh_cross_checks(&self.lexicon);
        movegen::gen_moves(
            &self.board,
            &self.lexicon,
            RackTally::new(&self.players[player_idx].rack),
        )
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.legal_moves_for(self.turn())
    }

    #[inline(always)]
    pub fn score(&self, play: &Move) -> i32 {
        play_scorer::compute_score(&self.board, &self.game_config, play)
    }

    // Asks the current player's picker. None means a person has to answer.
    pub fn pick_move(&mut self, rng: &mut dyn RngCore) -> Option<Move> {
        let picker = self.current_player().picker.clone();
        picker.pick(self, rng)
    }

    // On error nothing changes and the same player is still to move.
    pub fn play(&mut self, play: &Move) -> Result<PlayOutcome, RuleError> {
        let turn = self.turn();
        let Move::Place {
            row,
            col,
            direction,
            word,
        } = play
        else {
            self.num_zeros += 1;
            self.round += 1;
            return Ok(PlayOutcome {
                score: 0,
                description: format!("{} skips", self.players[turn].name),
            });
        };
        self.board.refresh_cross_checks(&self.lexicon);
        let needed = play_scorer::validate(&self.board, &self.lexicon, &self.players[turn].rack, play)
            .inspect_err(|e| tracing::debug!(player = %self.players[turn].name, "rejected: {e}"))?;

        let score = self.score(play);
        let rack_size = self.game_config.rack_size();
        let player = &mut self.players[turn];
        player.score += score;
        player.remove(&needed);
        player.draw_up_to_capacity(&mut self.bag, rack_size);
        self.board.set(*direction, *row, *col, word);
        if score == 0 {
            self.num_zeros += 1;
        } else {
            self.num_zeros = 0;
        }
        self.round += 1;
        Ok(PlayOutcome {
            score,
            description: format!("{} plays {play} for {score}", self.players[turn].name),
        })
    }

    // The penalty transfer happens once, on the turn the game becomes over.
    pub fn check_game_ended(&mut self) -> bool {
        if self.over {
            return true;
        }
        let ended = self.num_zeros >= self.game_config.num_zeros_to_end()
            || (self.bag.is_empty()
                && (self.players.iter().any(|p| p.rack.is_empty())
                    || (0..self.players.len()).all(|i| self.legal_moves_for(i).is_empty())));
        if ended {
            self.over = true;
            let mut total = 0;
            for player in self.players.iter_mut() {
                let leftover = player.rack_value(&self.game_config);
                player.score -= leftover;
                total += leftover;
            }
            if let Some(player) = self.players.iter_mut().find(|p| p.rack.is_empty()) {
                player.score += total;
            }
        }
        ended
    }

    pub fn winners(&self) -> Vec<usize> {
        let Some(best) = self.players.iter().map(|p| p.score).max() else {
            return Vec::new();
        };
        (0..self.players.len())
            .filter(|&i| self.players[i].score == best)
            .collect()
    }

    // +1 sole winner, 0 shared win, -1 otherwise.
    pub fn outcome_for(&self, player_idx: usize) -> i32 {
        let winners = self.winners();
        if !winners.contains(&player_idx) {
            -1
        } else if winners.len() > 1 {
            0
        } else {
            1
        }
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            players: self
                .players
                .iter()
                .map(|p| PlayerResult {
                    name: p.name.clone(),
                    score: p.score,
                })
                .collect(),
            winners: self.winners(),
            rounds: self.round,
        }
    }
}

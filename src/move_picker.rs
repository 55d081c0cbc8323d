// Copyright (C) 2020-2026 Andy Kurnia.

use super::{game_state::GameState, mcts, movegen::Move};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub enum MovePicker {
    // answered outside the engine
    Human,
    Random,
    Longest,
    MostPoints,
    Mcts(mcts::MctsParams),
}

impl MovePicker {
    // None for Human. Skip when nothing is playable.
    pub fn pick(&self, state: &mut GameState, rng: &mut dyn RngCore) -> Option<Move> {
        if let MovePicker::Human = self {
            return None;
        }
        let moves = state.legal_moves();
        let picked = match self {
            MovePicker::Human => None,
            MovePicker::Random => moves.choose(rng).cloned(),
            MovePicker::Longest => first_max_by_key(moves, |m| m.word().map_or(0, |w| w.len())),
            MovePicker::MostPoints => most_points(state, moves),
            MovePicker::Mcts(params) => {
                if moves.is_empty() {
                    None
                } else {
                    Some(mcts::search_blocking(state, moves, params))
                }
            }
        };
        Some(picked.unwrap_or(Move::Skip))
    }
}

// Earliest of the maxima.
fn first_max_by_key<K: Ord, F: FnMut(&Move) -> K>(moves: Vec<Move>, mut f: F) -> Option<Move> {
    let mut best: Option<(K, Move)> = None;
    for m in moves {
        let k = f(&m);
        if best.as_ref().is_none_or(|(best_k, _)| k > *best_k) {
            best = Some((k, m));
        }
    }
    best.map(|(_, m)| m)
}

pub fn most_points(state: &GameState, moves: Vec<Move>) -> Option<Move> {
    first_max_by_key(moves, |m| state.score(m))
}

// Highest immediate score first, ties kept in generation order.
pub fn top_moves(state: &GameState, moves: Vec<Move>, k: usize) -> Vec<Move> {
    let mut scored = moves
        .into_iter()
        .map(|m| (state.score(&m), m))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(k);
    scored.into_iter().map(|(_, m)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game_config, game_state::GamePlayer, lexicon::Lexicon, word::Word};
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn game(words: &[&str], rack: &str) -> GameState {
        let words = words.iter().map(|s| w(s)).collect::<Vec<_>>();
        let lexicon = Lexicon::from_words(words.iter().map(|w| &w[..]));
        let mut game = GameState::new(
            Arc::new(game_config::make_english_game_config()),
            Arc::new(lexicon),
            vec![
                GamePlayer::new("P1", MovePicker::MostPoints),
                GamePlayer::new("P2", MovePicker::Human),
            ],
            &mut ChaCha20Rng::seed_from_u64(1),
        );
        game.players[0].rack = w(rack).to_vec();
        game
    }

    #[test]
    fn human_is_asked_elsewhere() {
        let mut game = game(&["DO"], "DO");
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!(MovePicker::Human.pick(&mut game, &mut rng).is_none());
    }

    #[test]
    fn skip_when_nothing_fits() {
        let mut game = game(&["DO"], "XYZ");
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for picker in [MovePicker::Random, MovePicker::Longest, MovePicker::MostPoints] {
            assert_eq!(picker.pick(&mut game, &mut rng), Some(Move::Skip), "{picker:?}");
        }
    }

    #[test]
    fn longest_and_most_points() {
        let mut game = game(&["AX", "AXE", "ZA"], "AXEZ");
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let longest = MovePicker::Longest.pick(&mut game, &mut rng).unwrap();
        assert_eq!(longest.word().map(|w| w.len()), Some(3));
        let best = MovePicker::MostPoints.pick(&mut game, &mut rng).unwrap();
        let moves = game.legal_moves();
        let best_score = game.score(&best);
        assert!(moves.iter().all(|m| game.score(m) <= best_score));
        let top = top_moves(&game, moves.clone(), 3);
        assert_eq!(top.len(), 3);
        assert_eq!(game.score(&top[0]), best_score);
        assert!(game.score(&top[1]) >= game.score(&top[2]));
        let random = MovePicker::Random.pick(&mut game, &mut rng).unwrap();
        assert!(moves.contains(&random));
    }

    #[test]
    fn picks_through_game_state() {
        let mut game = game(&["DO"], "DO");
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let picked = game.pick_move(&mut rng).unwrap();
        assert_eq!(picked.word(), Some(&w("DO")));
        assert!(matches!(picked, Move::Place { row: 6 | 7, col: 6 | 7, .. }));
    }
}

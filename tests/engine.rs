// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;
use tilesmith::{
    alphabet::{Letter, RackTally},
    board::Board,
    game_config,
    game_state::{GamePlayer, GameState},
    lexicon::Lexicon,
    matrix::Direction,
    mcts,
    move_picker::MovePicker,
    movegen::{self, Move},
    play_scorer,
    word::Word,
};

static WORDS: &[&str] = &[
    "AN", "ANT", "ANTS", "ARE", "ART", "ARTS", "AT", "ATE", "CAT", "CATS", "EAR", "EARS", "EAT",
    "EATS", "ERA", "NE", "NEST", "NET", "NO", "NOSE", "NOTE", "NOTES", "ON", "ONE", "ONES", "OR",
    "ORE", "RAT", "RATE", "RATS", "REST", "ROSE", "SAT", "SEA", "SEAT", "SET", "SO", "STAR",
    "STONE", "TA", "TAN", "TAR", "TARS", "TEA", "TEAS", "TEN", "TENS", "TO", "TOE", "TON",
    "TONE", "TONES",
];

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn m(s: &str) -> Move {
    s.parse().unwrap()
}

fn word_list() -> Vec<Word> {
    WORDS.iter().map(|s| w(s)).collect()
}

fn lexicon() -> Lexicon {
    let words = word_list();
    Lexicon::from_words(words.iter().map(|w| &w[..]))
}

fn apply(board: &mut Board, play: &Move) {
    if let Move::Place {
        row,
        col,
        direction,
        word,
    } = play
    {
        board.set(*direction, *row, *col, word);
    }
}

fn occupied(board: &Board, row: isize, col: isize) -> bool {
    let n = board.size() as isize;
    (0..n).contains(&row) && (0..n).contains(&col) && board.at(row as usize, col as usize).is_some()
}

// Every placement of every listed word that validates and is not part of a
// longer run of tiles.
fn brute_force(board: &Board, lexicon: &Lexicon, words: &[Word], rack: &[Letter]) -> Vec<Move> {
    let n = board.size();
    let mut found = Vec::new();
    for direction in [Direction::Across, Direction::Down] {
        let (dr, dc) = match direction {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        };
        for row in 0..n {
            for col in 0..n {
                for word in words {
                    let (r, c) = (row as isize, col as isize);
                    let len = word.len() as isize;
                    if occupied(board, r - dr, c - dc) || occupied(board, r + dr * len, c + dc * len)
                    {
                        continue;
                    }
                    let play = Move::place(row, col, direction, word.clone());
                    if play_scorer::validate(board, lexicon, rack, &play).is_ok() {
                        found.push(play);
                    }
                }
            }
        }
    }
    found.sort_unstable();
    found.dedup();
    found
}

#[test]
fn lexicon_distinguishes_words_from_prefixes() {
    let lex = lexicon();
    assert!(lex.contains(&w("STONE")));
    assert!(!lex.contains(&w("STON")));
    let p = lex.search(Lexicon::ROOT, &w("STON"));
    assert!(p >= 0);
    assert!(!lex.accepts(p));
    assert!(lex.accepts(lex.seek(p, Letter::try_from('E').unwrap())));
    assert!(lex.search(Lexicon::ROOT, &w("STX")) < 0);
    assert!(!lex.contains(&w("S")));
}

#[test]
fn transposing_twice_is_identity() {
    let mut board = Board::new(7);
    apply(&mut board, &m("3,1,a,CATS"));
    apply(&mut board, &m("1,2,d,TEA"));
    let across = board.view(Direction::Across);
    let back = across.transposed().transposed();
    assert_eq!(back.orientation(), Direction::Across);
    for row in 0..7 {
        for col in 0..7 {
            assert_eq!(back.at(row, col), board.at(row, col));
            assert_eq!(across.transposed().at(col, row), board.at(row, col));
            assert_eq!(board.view(Direction::Down).at(col, row), board.at(row, col));
        }
    }
}

#[test]
fn first_word_through_center_of_small_board() {
    let config = game_config::make_english_game_config_with_size(5);
    let words = ["CAT", "CATS", "AT", "TA"].map(w);
    let lex = Lexicon::from_words(words.iter().map(|w| &w[..]));
    let rack = w("CATS");
    let mut board = Board::new(5);
    board.refresh_cross_checks(&lex);
    let play = m("2,1,a,CAT");
    assert_eq!(play_scorer::validate(&board, &lex, &rack, &play), Ok(w("CAT").to_vec()));
    assert_eq!(play_scorer::compute_score(&board, &config, &play), 5);
    assert!(play_scorer::validate(&board, &lex, &rack, &m("0,0,a,CAT")).is_err());
    assert!(movegen::gen_moves(&board, &lex, RackTally::new(&rack)).contains(&play));
}

#[test]
fn standard_board_scoring_sequence() {
    let config = game_config::make_english_game_config();
    let mut board = Board::new(15);
    let mut total = 0;
    for (text, expected) in [
        ("7,5,a,HORN", 14),
        ("5,7,d,FARM", 9),
        ("9,5,a,PASTE", 25),
        ("8,7,a,MOB", 16),
        ("a,4,a,BIT", 16),
    ] {
        let play = m(text);
        let score = play_scorer::compute_score(&board, &config, &play);
        assert_eq!(score, expected, "{play}");
        total += score;
        apply(&mut board, &play);
    }
    assert_eq!(total, 80);
}

#[test]
fn generator_matches_brute_force_and_scores_are_symmetric() {
    let config = game_config::make_english_game_config_with_size(7);
    let lex = lexicon();
    let words = word_list();
    let mut board = Board::new(7);
    for rack in ["SEATRON", "CATENOS", "RESTONE", "NOTEARS"] {
        let rack = w(rack);
        board.refresh_cross_checks(&lex);
        let generated = movegen::gen_moves(&board, &lex, RackTally::new(&rack));
        assert_eq!(generated, brute_force(&board, &lex, &words, &rack), "rack {rack}");
        assert!(!generated.is_empty(), "rack {rack}");

        let down = board.view(Direction::Down);
        for play in generated.iter() {
            let needed = play_scorer::validate(&board, &lex, &rack, play).unwrap();
            assert!(!needed.is_empty(), "{play}");
            assert_eq!(
                play_scorer::compute_score(&board, &config, play),
                play_scorer::score_in_view(down, &config, &play.transposed()),
                "{play}"
            );
        }

        let best = generated
            .iter()
            .max_by_key(|play| play_scorer::compute_score(&board, &config, play))
            .cloned()
            .unwrap();
        apply(&mut board, &best);
        board.refresh_cross_checks(&lex);
        // the same placement again would put nothing new down
        assert!(!movegen::gen_moves(&board, &lex, RackTally::new(&rack)).contains(&best));
    }
}

fn new_game(players: Vec<GamePlayer>, seed: u64) -> GameState {
    GameState::new(
        Arc::new(game_config::make_english_game_config_with_size(7)),
        Arc::new(lexicon()),
        players,
        &mut ChaCha20Rng::seed_from_u64(seed),
    )
}

#[test]
fn finishing_player_collects_leftovers() {
    let mut game = new_game(
        vec![
            GamePlayer::new("first", MovePicker::Human),
            GamePlayer::new("second", MovePicker::Human),
        ],
        11,
    );
    game.bag.0.clear();
    game.players[0].rack = w("CAT").to_vec();
    game.players[1].rack = w("EE").to_vec();
    let outcome = game.play(&m("3,2,a,CAT")).unwrap();
    assert_eq!(outcome.score, 5);
    assert!(game.check_game_ended());
    assert_eq!(game.players[0].score, 5 + 2);
    assert_eq!(game.players[1].score, -2);
    // idempotent once over
    assert!(game.check_game_ended());
    assert_eq!(game.players[0].score, 7);
    assert_eq!(game.winners(), vec![0]);
    assert_eq!(game.outcome_for(0), 1);
    assert_eq!(game.outcome_for(1), -1);
}

fn tiles_in_play(game: &GameState) -> usize {
    let n = game.board.size();
    let on_board = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .filter(|&(r, c)| game.board.at(r, c).is_some())
        .count();
    on_board + game.bag.len() + game.players.iter().map(|p| p.rack.len()).sum::<usize>()
}

#[test]
fn self_play_terminates_and_conserves_tiles() {
    let mut game = new_game(
        vec![
            GamePlayer::new("points", MovePicker::MostPoints),
            GamePlayer::new("random", MovePicker::Random),
        ],
        12,
    );
    let total = tiles_in_play(&game);
    assert_eq!(total, game.game_config.alphabet().num_tiles());
    let mut rng = ChaCha20Rng::seed_from_u64(13);
    while !game.check_game_ended() {
        assert!(game.round < 1000);
        let play = game.pick_move(&mut rng).unwrap();
        game.play(&play).unwrap();
        assert_eq!(tiles_in_play(&game), total);
    }
    assert!(game.is_over());
    let result = game.result();
    assert_eq!(result.players.len(), 2);
    assert_eq!(result.rounds, game.round);
    assert!(!result.winners.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn search_counts_every_rollout() {
    let mut game = new_game(
        vec![
            GamePlayer::new("mcts", MovePicker::Mcts(mcts::MctsParams::default())),
            GamePlayer::new("points", MovePicker::MostPoints),
        ],
        14,
    );
    game.players[0].rack = w("SEATRON").to_vec();
    game.players[1].rack = w("CATENOS").to_vec();
    let moves = game.legal_moves();
    let params = mcts::MctsParams {
        iterations: 24,
        pick_top: 5,
        concurrency: 4,
        ..mcts::MctsParams::default()
    };
    let report = mcts::search(&game, moves.clone(), &params).await;
    assert_eq!(report.root_visits, 24);
    assert_eq!(
        report.root_direct + report.children.iter().map(|c| c.visits).sum::<u64>(),
        24
    );
    assert!(moves.contains(&report.best));
    assert!((1..=4).contains(&report.peak_in_flight));
    assert!(game.board.is_empty());
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet::{Alphabet, Letter, RackTally},
    board::{Board, BoardView},
    error::RuleError,
    game_config::GameConfig,
    lexicon::Lexicon,
    matrix::Direction,
    movegen::Move,
};

// An across placement as seen on the view it was normalized to.
struct Placement<'a, 'b> {
    view: BoardView<'a>,
    row: usize,
    col: usize,
    word: &'b [Letter],
}

// Down moves become across moves on the transposed view.
fn normalize<'a, 'b>(view: BoardView<'a>, play: &'b Move) -> Option<Placement<'a, 'b>> {
    match play {
        Move::Skip => None,
        Move::Place {
            row,
            col,
            direction: Direction::Across,
            word,
        } => Some(Placement {
            view,
            row: *row,
            col: *col,
            word: &word[..],
        }),
        Move::Place {
            row,
            col,
            direction: Direction::Down,
            word,
        } => Some(Placement {
            view: view.transposed(),
            row: *col,
            col: *row,
            word: &word[..],
        }),
    }
}

fn face_value(letters: &[Letter], alphabet: &Alphabet) -> i32 {
    letters.iter().map(|&l| alphabet.score(l)).sum()
}

impl Placement<'_, '_> {
    #[inline(always)]
    fn fits(&self) -> bool {
        let n = self.view.size();
        self.row < n && self.col < n && self.col + self.word.len() <= n
    }

    // Assumes the placement fits. Nothing placed scores nothing.
    fn score(&self, game_config: &GameConfig) -> i32 {
        if self.word.is_empty() {
            return 0;
        }
        let alphabet = game_config.alphabet();
        let first = self.view.cell(self.row, self.col);
        let last = self.view.cell(self.row, self.col + self.word.len() - 1);
        let left = first.gather_left();
        let right = last.gather_right();

        let mut total = 0;
        if left.len() + self.word.len() + right.len() > 1 {
            let mut word_multiplier = 1;
            let mut word_score = face_value(&left, alphabet) + face_value(&right, alphabet);
            for (i, &letter) in self.word.iter().enumerate() {
                let premium = self.view.cell(self.row, self.col + i).premium();
                word_score += alphabet.score(letter) * premium.letter_multiplier;
                word_multiplier *= premium.word_multiplier;
            }
            total += word_score * word_multiplier;
        }

        let mut num_played = 0;
        for (i, &letter) in self.word.iter().enumerate() {
            let cell = self.view.cell(self.row, self.col + i);
            if !cell.is_empty() {
                continue;
            }
            num_played += 1;
            let up = cell.gather_up();
            let down = cell.gather_down();
            if up.is_empty() && down.is_empty() {
                continue;
            }
            let premium = cell.premium();
            let perpendicular = face_value(&up, alphabet)
                + alphabet.score(letter) * premium.letter_multiplier
                + face_value(&down, alphabet);
            total += perpendicular * premium.word_multiplier;
        }
        total + game_config.num_played_bonus(num_played)
    }

    fn newly_placed(&self) -> Vec<Letter> {
        self.word
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.view.at(self.row, self.col + i).is_none())
            .map(|(_, &letter)| letter)
            .collect()
    }
}

// Points for committing `play`, without touching the board. The move must
// fit on the board.
pub fn compute_score(board: &Board, game_config: &GameConfig, play: &Move) -> i32 {
    score_in_view(board.view(Direction::Across), game_config, play)
}

// As compute_score, with the move's coordinates and direction taken
// relative to `view`.
pub fn score_in_view(view: BoardView<'_>, game_config: &GameConfig, play: &Move) -> i32 {
    normalize(view, play).map_or(0, |placement| placement.score(game_config))
}

// Checks `play` against the board and the rack. Both directions' cross-checks
// must be fresh. Returns the letters that would leave the rack.
pub fn validate(
    board: &Board,
    lexicon: &Lexicon,
    rack: &[Letter],
    play: &Move,
) -> Result<Vec<Letter>, RuleError> {
    let Some(placement) = normalize(board.view(Direction::Across), play) else {
        return Ok(Vec::new());
    };
    let text = play.to_string();
    if placement.word.is_empty() {
        return Err(RuleError::NoNewLetters(text));
    }
    if !placement.fits() {
        return Err(RuleError::OutOfBounds(text));
    }

    for (i, &letter) in placement.word.iter().enumerate() {
        let cell = placement.view.cell(placement.row, placement.col + i);
        let ok = match cell.letter() {
            Some(existing) => existing == letter,
            None => cell.in_cross_check(letter),
        };
        if !ok {
            return Err(RuleError::InvalidWord(text));
        }
    }
    let first = placement.view.cell(placement.row, placement.col);
    let last = placement
        .view
        .cell(placement.row, placement.col + placement.word.len() - 1);
    let whole = first
        .gather_left()
        .concat(placement.word)
        .concat(&last.gather_right());
    if !lexicon.contains(&whole) {
        return Err(RuleError::InvalidWord(text));
    }

    let needed = placement.newly_placed();
    if needed.is_empty() {
        return Err(RuleError::NoNewLetters(text));
    }
    if !RackTally::new(rack).has_all(&needed) {
        let needed = needed.iter().map(|&l| char::from(l)).collect();
        return Err(RuleError::InsufficientRack(needed, text));
    }

    let connected = if board.is_empty() {
        let center = placement.view.center();
        center.row() == placement.row
            && (placement.col..placement.col + placement.word.len()).contains(&center.col())
    } else {
        (0..placement.word.len()).any(|i| {
            let cell = placement.view.cell(placement.row, placement.col + i);
            !cell.is_empty() || !cell.empty_around()
        })
    };
    if !connected {
        return Err(RuleError::DisconnectedMove(text));
    }
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game_config, word::Word};

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn lexicon(words: &[&str]) -> Lexicon {
        let words = words.iter().map(|s| w(s)).collect::<Vec<_>>();
        Lexicon::from_words(words.iter().map(|w| &w[..]))
    }

    fn m(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn scoring_sequence_on_standard_board() {
        let config = game_config::make_english_game_config();
        let mut board = Board::new(15);
        for (text, expected) in [
            ("7,5,a,HORN", 14),
            ("5,7,d,FARM", 9),
            ("9,5,a,PASTE", 25),
            ("8,7,a,MOB", 16),
            ("a,4,a,BIT", 16),
        ] {
            let play = m(text);
            assert_eq!(compute_score(&board, &config, &play), expected, "{play}");
            assert_eq!(
                score_in_view(board.view(Direction::Down), &config, &play.transposed()),
                expected,
                "{play} transposed"
            );
            if let Move::Place {
                row,
                col,
                direction,
                word,
            } = play
            {
                board.set(direction, row, col, &word);
            }
        }
    }

    #[test]
    fn full_rack_earns_bonus() {
        let config = game_config::make_english_game_config_with_size(9);
        let board = Board::new(9);
        // 7 letters, no premiums off the standard size
        assert_eq!(compute_score(&board, &config, &m("4,1,a,AAAAAAA")), 57);
        assert_eq!(compute_score(&board, &config, &Move::Skip), 0);
    }

    #[test]
    fn empty_placement_scores_nothing() {
        let config = game_config::make_english_game_config_with_size(5);
        let mut board = Board::new(5);
        board.set(Direction::Across, 2, 1, &w("CAT"));
        for direction in [Direction::Across, Direction::Down] {
            let play = Move::place(2, 2, direction, Word::new());
            assert_eq!(compute_score(&board, &config, &play), 0);
            assert_eq!(
                score_in_view(board.view(Direction::Down), &config, &play.transposed()),
                0
            );
        }
        assert_eq!(
            compute_score(&Board::new(5), &config, &Move::place(0, 0, Direction::Down, Word::new())),
            0
        );
    }

    #[test]
    fn single_sandwiched_letter_scores_only_across_neighbours() {
        let config = game_config::make_english_game_config_with_size(5);
        let mut board = Board::new(5);
        board.set(Direction::Down, 1, 2, &w("C"));
        board.set(Direction::Down, 3, 2, &w("T"));
        // A between C and T: no across word, down word CAT
        assert_eq!(compute_score(&board, &config, &m("2,2,a,A")), 5);
        assert_eq!(compute_score(&board, &config, &m("2,2,d,A")), 5);
    }

    #[test]
    fn validation_errors() {
        let lex = lexicon(&["CAT", "CATS", "AT", "TA"]);
        let rack = w("CATS");
        let mut board = Board::new(5);
        board.refresh_cross_checks(&lex);
        let check = |board: &Board, s: &str| validate(board, &lex, &rack, &m(s));

        assert_eq!(check(&board, "2,1,a,CAT"), Ok(w("CAT").to_vec()));
        assert!(matches!(check(&board, "2,3,a,CAT"), Err(RuleError::OutOfBounds(_))));
        assert!(matches!(check(&board, "2,1,a,CAB"), Err(RuleError::InvalidWord(_))));
        assert!(matches!(check(&board, "0,0,a,CAT"), Err(RuleError::DisconnectedMove(_))));
        assert!(matches!(
            validate(&board, &lex, &w("CA"), &m("2,1,a,CAT")),
            Err(RuleError::InsufficientRack(..))
        ));

        board.set(Direction::Across, 2, 1, &w("CAT"));
        board.refresh_cross_checks(&lex);
        assert!(matches!(check(&board, "2,1,a,CAT"), Err(RuleError::NoNewLetters(_))));
        assert_eq!(check(&board, "2,1,a,CATS"), Ok(w("S").to_vec()));
        assert!(matches!(check(&board, "0,0,a,AT"), Err(RuleError::DisconnectedMove(_))));
        // T above the C makes "TC" down
        assert!(matches!(check(&board, "1,0,a,AT"), Err(RuleError::InvalidWord(_))));
        assert_eq!(check(&board, "1,2,d,T"), Ok(w("T").to_vec()));
        assert!(matches!(
            validate(&board, &lex, &rack, &Move::place(1, 1, Direction::Across, Word::new())),
            Err(RuleError::NoNewLetters(_))
        ));
    }
}

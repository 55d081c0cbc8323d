// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet::RackTally,
    board::{Board, BoardView, Cell},
    error,
    lexicon::Lexicon,
    matrix::Direction,
    word::Word,
};

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Skip,
    Place {
        row: usize,
        col: usize,
        direction: Direction,
        word: Word,
    },
}

impl Move {
    #[inline(always)]
    pub fn place(row: usize, col: usize, direction: Direction, word: Word) -> Self {
        Move::Place {
            row,
            col,
            direction,
            word,
        }
    }

    #[inline(always)]
    pub fn is_skip(&self) -> bool {
        matches!(self, Move::Skip)
    }

    // Swaps row and column and flips the direction. Self-inverse.
    pub fn transposed(&self) -> Self {
        match self {
            Move::Skip => Move::Skip,
            Move::Place {
                row,
                col,
                direction,
                word,
            } => Move::Place {
                row: *col,
                col: *row,
                direction: direction.flipped(),
                word: word.clone(),
            },
        }
    }

    // Down moves become across moves on the transposed view; across moves
    // are returned as is.
    pub fn as_across(&self) -> Self {
        match self {
            Move::Place {
                direction: Direction::Down,
                ..
            } => self.transposed(),
            _ => self.clone(),
        }
    }

    pub fn word(&self) -> Option<&Word> {
        match self {
            Move::Skip => None,
            Move::Place { word, .. } => Some(word),
        }
    }

    // Short form accepted by FromStr, e.g. "7,5,a,HORN".
    pub fn fmt_compact(&self) -> String {
        match self {
            Move::Skip => "skip".into(),
            Move::Place {
                row,
                col,
                direction,
                word,
            } => format!(
                "{row:x},{col:x},{},{word}",
                match direction {
                    Direction::Across => 'a',
                    Direction::Down => 'd',
                }
            ),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Skip => f.write_str("skip"),
            Move::Place {
                row,
                col,
                direction,
                word,
            } => write!(f, "({row:x},{col:x}) {direction}: {word}"),
        }
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

fn parse_hex(s: &str, what: &str, whole: &str) -> Result<usize, error::MyError> {
    usize::from_str_radix(s.trim(), 16)
        .map_err(|_| error::new(format!("invalid {what} {s:?} in {whole:?}")))
}

fn parse_direction(s: &str, whole: &str) -> Result<Direction, error::MyError> {
    match s.trim() {
        "a" | "across" => Ok(Direction::Across),
        "d" | "down" => Ok(Direction::Down),
        _ => Err(error::new(format!("invalid direction {s:?} in {whole:?}"))),
    }
}

// Accepts "skip" (or "s"), the compact "r,c,a|d,WORD" with hex coordinates,
// and the displayed "(r,c) across|down: WORD".
impl std::str::FromStr for Move {
    type Err = error::MyError;

    fn from_str(whole: &str) -> Result<Self, Self::Err> {
        let s = whole.trim();
        if s == "s" || s == "skip" {
            return Ok(Move::Skip);
        }
        let (row, col, direction, word) = if let Some(rest) = s.strip_prefix('(') {
            let (coords, rest) = rest
                .split_once(')')
                .ok_or_else(|| error::new(format!("missing ')' in {whole:?}")))?;
            let (row, col) = coords
                .split_once(',')
                .ok_or_else(|| error::new(format!("missing ',' in {whole:?}")))?;
            let (direction, word) = rest
                .split_once(':')
                .ok_or_else(|| error::new(format!("missing ':' in {whole:?}")))?;
            (row, col, direction, word)
        } else {
            let parts = s.split(',').collect::<Vec<_>>();
            let [row, col, direction, word] = parts[..] else {
                return Err(error::new(format!(
                    "expected row,col,a|d,letters but got {whole:?}"
                )));
            };
            (row, col, direction, word)
        };
        let word = word.trim().to_ascii_uppercase().parse::<Word>()?;
        if word.is_empty() {
            return Err(error::new(format!("no letters in {whole:?}")));
        }
        Ok(Move::Place {
            row: parse_hex(row, "row", whole)?,
            col: parse_hex(col, "column", whole)?,
            direction: parse_direction(direction, whole)?,
            word,
        })
    }
}

// Anchor/cross-check search along the across direction of one view.
struct AxisGenerator<'a> {
    view: BoardView<'a>,
    lexicon: &'a Lexicon,
    moves: &'a mut Vec<Move>,
}

impl AxisGenerator<'_> {
    fn run(&mut self, rack: RackTally) {
        let mut anchors = self.view.anchors();
        if anchors.is_empty() && self.view.board().is_empty() {
            anchors.push(self.view.center());
        }
        for anchor in anchors {
            if anchor.left().is_some_and(|c| !c.is_empty()) {
                let left = anchor.gather_left();
                let p = self.lexicon.search(Lexicon::ROOT, &left);
                self.extend_right(&left, p, anchor, Some(anchor), rack);
            } else {
                let k = isolated_run_to_the_left(anchor);
                self.left_part(&Word::new(), Lexicon::ROOT, k, anchor, rack);
            }
        }
    }

    fn left_part(&mut self, partial: &Word, p: i32, limit: usize, anchor: Cell<'_>, rack: RackTally) {
        self.extend_right(partial, p, anchor, Some(anchor), rack);
        if limit == 0 || rack.is_empty() {
            return;
        }
        let lexicon = self.lexicon;
        for &(letter, q) in lexicon.edges(p) {
            if let Some(rest) = rack.without(letter) {
                self.left_part(&partial.appended(letter), q, limit - 1, anchor, rest);
            }
        }
    }

    // `square` is None past the right edge.
    fn extend_right(
        &mut self,
        partial: &Word,
        p: i32,
        anchor: Cell<'_>,
        square: Option<Cell<'_>>,
        rack: RackTally,
    ) {
        if p < 0 {
            return;
        }
        let square_col = square.map_or(self.view.size(), |c| c.col());
        match square {
            Some(cell) if !cell.is_empty() => {
                if let Some(letter) = cell.letter() {
                    let q = self.lexicon.seek(p, letter);
                    if q >= 0 {
                        self.extend_right(&partial.appended(letter), q, anchor, cell.right(), rack);
                    }
                }
            }
            _ => {
                if anchor.col() < square_col && self.lexicon.accepts(p) {
                    self.moves.push(Move::place(
                        anchor.row(),
                        square_col - partial.len(),
                        Direction::Across,
                        partial.clone(),
                    ));
                }
                let Some(cell) = square else {
                    return;
                };
                let lexicon = self.lexicon;
                for &(letter, q) in lexicon.edges(p) {
                    if !cell.in_cross_check(letter) {
                        continue;
                    }
                    if let Some(rest) = rack.without(letter) {
                        self.extend_right(&partial.appended(letter), q, anchor, cell.right(), rest);
                    }
                }
            }
        }
    }
}

// Empty cells with no occupied neighbour, immediately left of the anchor.
fn isolated_run_to_the_left(anchor: Cell<'_>) -> usize {
    let mut k = 0;
    let mut cur = anchor.left();
    while let Some(cell) = cur {
        if !cell.is_empty() || !cell.empty_around() {
            break;
        }
        k += 1;
        cur = cell.left();
    }
    k
}

// Every legal placement of `rack` on `board`, in board coordinates, sorted.
// Cross-checks for both directions must be fresh.
pub fn gen_moves(board: &Board, lexicon: &Lexicon, rack: RackTally) -> Vec<Move> {
    assert!(
        !board.is_stale(Direction::Across) && !board.is_stale(Direction::Down),
        "stale cross-check before move generation"
    );
    let mut moves = Vec::new();
    for direction in [Direction::Across, Direction::Down] {
        let mut found = Vec::new();
        AxisGenerator {
            view: board.view(direction),
            lexicon,
            moves: &mut found,
        }
        .run(rack);
        match direction {
            Direction::Across => moves.extend(found),
            Direction::Down => moves.extend(found.iter().map(Move::transposed)),
        }
    }
    moves.sort_unstable();
    moves.dedup();
    moves
}

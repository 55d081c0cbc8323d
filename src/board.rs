// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet::{Letter, LetterSet},
    board_layout::{self, BoardLayout, Premium},
    lexicon::Lexicon,
    matrix::{Dim, Direction},
    word::Word,
};
use std::sync::Arc;

// One row-major grid. Per-cell cross-check sets are kept per placement
// direction: cross_sets[Across] constrains letters placed by across moves
// (derived from the vertical words through that cell), and vice versa.
// None means unconstrained.
#[derive(Clone)]
pub struct Board {
    dim: Dim,
    layout: Arc<BoardLayout>,
    tiles: Box<[Option<Letter>]>,
    cross_sets: [Box<[Option<LetterSet>]>; 2],
    stale: [bool; 2],
}

impl Board {
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board size must be positive, got {size}");
        let layout = Arc::new(BoardLayout::new(size));
        let dim = layout.dim();
        Board {
            dim,
            layout,
            tiles: vec![None; dim.len()].into_boxed_slice(),
            cross_sets: [
                vec![None; dim.len()].into_boxed_slice(),
                vec![None; dim.len()].into_boxed_slice(),
            ],
            stale: [true, true],
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.dim.rows
    }

    #[inline(always)]
    pub fn dim(&self) -> Dim {
        self.dim
    }

    #[inline(always)]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> Option<Letter> {
        self.tiles[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn center(&self) -> (usize, usize) {
        (self.layout.star_row(), self.layout.star_col())
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(Option::is_none)
    }

    #[inline(always)]
    pub fn is_stale(&self, direction: Direction) -> bool {
        self.stale[direction.index()]
    }

    // The board as seen by moves in `direction`: a Down view has rows and
    // columns swapped, and its "across" reads the grid's columns.
    #[inline(always)]
    pub fn view(&self, direction: Direction) -> BoardView<'_> {
        BoardView {
            board: self,
            orientation: direction,
        }
    }

    // Writes `word` from (row, col) going in `direction`. Every written cell
    // loses its own cross-check sets, and both directions become stale.
    pub fn set(&mut self, direction: Direction, row: usize, col: usize, word: &[Letter]) {
        let (lane, start) = match direction {
            Direction::Across => (row, col),
            Direction::Down => (col, row),
        };
        let strider = self.dim.lane(direction, lane);
        assert!(
            start + word.len() <= strider.len(),
            "{word:?} at ({row},{col}) {direction} does not fit"
        );
        for (i, &letter) in word.iter().enumerate() {
            let idx = strider.at(start + i);
            self.tiles[idx] = Some(letter);
            self.cross_sets[0][idx] = None;
            self.cross_sets[1][idx] = None;
        }
        self.stale = [true, true];
    }

    // No-op when that direction is fresh.
    pub fn recompute_cross_checks(&mut self, direction: Direction, lexicon: &Lexicon) {
        if !self.is_stale(direction) {
            return;
        }
        let view = self.view(direction);
        let n = self.size();
        let mut sets = vec![None; self.dim.len()].into_boxed_slice();
        for row in 0..n {
            for col in 0..n {
                let cell = view.cell(row, col);
                if cell.is_perpendicular_anchor() {
                    sets[cell.index()] = Some(cross_set(lexicon, &cell.gather_up(), &cell.gather_down()));
                }
            }
        }
        self.cross_sets[direction.index()] = sets;
        self.stale[direction.index()] = false;
    }

    pub fn refresh_cross_checks(&mut self, lexicon: &Lexicon) {
        self.recompute_cross_checks(Direction::Across, lexicon);
        self.recompute_cross_checks(Direction::Down, lexicon);
    }
}

// Letters L with before+L+after in the lexicon.
fn cross_set(lexicon: &Lexicon, before: &[Letter], after: &[Letter]) -> LetterSet {
    let mut set = LetterSet::new();
    let p = lexicon.search(Lexicon::ROOT, before);
    for &(letter, q) in lexicon.edges(p) {
        if lexicon.accepts(lexicon.search(q, after)) {
            set.insert(letter);
        }
    }
    set
}

#[derive(Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    orientation: Direction,
}

impl<'a> BoardView<'a> {
    #[inline(always)]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[inline(always)]
    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline(always)]
    pub fn transposed(&self) -> BoardView<'a> {
        BoardView {
            board: self.board,
            orientation: self.orientation.flipped(),
        }
    }

    // Physical index of view coordinates.
    #[inline(always)]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        self.board.dim.lane(self.orientation, row).at(col)
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> Option<Letter> {
        self.board.tiles[self.index_of(row, col)]
    }

    #[inline(always)]
    pub fn cell(&self, row: usize, col: usize) -> Cell<'a> {
        debug_assert!(row < self.size() && col < self.size());
        Cell {
            view: *self,
            row,
            col,
        }
    }

    #[inline(always)]
    pub fn is_stale(&self) -> bool {
        self.board.is_stale(self.orientation)
    }

    pub fn center(&self) -> Cell<'a> {
        let (row, col) = self.board.center();
        match self.orientation {
            Direction::Across => self.cell(row, col),
            Direction::Down => self.cell(col, row),
        }
    }

    // Empty cells next to an occupied cell, in view row-major order.
    pub fn anchors(&self) -> Vec<Cell<'a>> {
        let n = self.size();
        let mut anchors = Vec::new();
        for row in 0..n {
            for col in 0..n {
                let cell = self.cell(row, col);
                if cell.is_anchor() {
                    anchors.push(cell);
                }
            }
        }
        anchors
    }
}

// A position within a view. Directions are relative to the view.
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    view: BoardView<'a>,
    row: usize,
    col: usize,
}

impl<'a> Cell<'a> {
    #[inline(always)]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline(always)]
    pub fn col(&self) -> usize {
        self.col
    }

    #[inline(always)]
    pub fn view(&self) -> BoardView<'a> {
        self.view
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        self.view.index_of(self.row, self.col)
    }

    #[inline(always)]
    pub fn letter(&self) -> Option<Letter> {
        self.view.board.tiles[self.index()]
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letter().is_none()
    }

    #[inline(always)]
    fn offset(&self, dr: isize, dc: isize) -> Option<Cell<'a>> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let n = self.view.size();
        (row < n && col < n).then(|| self.view.cell(row, col))
    }

    #[inline(always)]
    pub fn up(&self) -> Option<Cell<'a>> {
        self.offset(-1, 0)
    }

    #[inline(always)]
    pub fn down(&self) -> Option<Cell<'a>> {
        self.offset(1, 0)
    }

    #[inline(always)]
    pub fn left(&self) -> Option<Cell<'a>> {
        self.offset(0, -1)
    }

    #[inline(always)]
    pub fn right(&self) -> Option<Cell<'a>> {
        self.offset(0, 1)
    }

    pub fn left_n(&self, n: usize) -> Option<Cell<'a>> {
        self.offset(0, -(n as isize))
    }

    fn gather(&self, step: fn(&Cell<'a>) -> Option<Cell<'a>>) -> Vec<Letter> {
        let mut letters = Vec::new();
        let mut cur = step(self);
        while let Some(cell) = cur {
            match cell.letter() {
                Some(letter) => letters.push(letter),
                None => break,
            }
            cur = step(&cell);
        }
        letters
    }

    // Contiguous letters above, in reading order.
    pub fn gather_up(&self) -> Word {
        let mut letters = self.gather(Cell::up);
        letters.reverse();
        letters.into()
    }

    pub fn gather_down(&self) -> Word {
        self.gather(Cell::down).into()
    }

    pub fn gather_left(&self) -> Word {
        let mut letters = self.gather(Cell::left);
        letters.reverse();
        letters.into()
    }

    pub fn gather_right(&self) -> Word {
        self.gather(Cell::right).into()
    }

    #[inline(always)]
    fn occupied(cell: Option<Cell<'a>>) -> bool {
        cell.is_some_and(|c| !c.is_empty())
    }

    // No occupied neighbour on any side.
    pub fn empty_around(&self) -> bool {
        !(Self::occupied(self.up())
            || Self::occupied(self.down())
            || Self::occupied(self.left())
            || Self::occupied(self.right()))
    }

    pub fn is_anchor(&self) -> bool {
        self.is_empty() && !self.empty_around()
    }

    // Empty with a perpendicular word passing through.
    pub fn is_perpendicular_anchor(&self) -> bool {
        self.is_empty() && (Self::occupied(self.up()) || Self::occupied(self.down()))
    }

    pub fn cross_check(&self) -> Option<LetterSet> {
        assert!(
            !self.view.is_stale(),
            "stale cross-check queried at ({},{}) {}",
            self.row,
            self.col,
            self.view.orientation
        );
        self.view.board.cross_sets[self.view.orientation.index()][self.index()]
    }

    #[inline(always)]
    pub fn in_cross_check(&self, letter: Letter) -> bool {
        self.cross_check().is_none_or(|set| set.contains(letter))
    }

    // Occupied cells have no premium.
    pub fn premium(&self) -> Premium {
        if !self.is_empty() {
            return board_layout::FVS;
        }
        let (row, col) = self.view.board.dim.row_col_of(self.index());
        self.view.board.layout.premium_at(row, col)
    }
}

impl std::fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}) {}", self.row, self.col, self.view.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn lexicon(words: &[&str]) -> Lexicon {
        let words = words.iter().map(|s| w(s)).collect::<Vec<_>>();
        Lexicon::from_words(words.iter().map(|w| &w[..]))
    }

    #[test]
    fn views_share_the_grid() {
        let mut board = Board::new(5);
        board.set(Direction::Across, 1, 2, &w("DO"));
        let across = board.view(Direction::Across);
        let down = board.view(Direction::Down);
        assert_eq!(across.at(1, 3), Some(Letter::try_from('O').unwrap()));
        assert_eq!(down.at(3, 1), Some(Letter::try_from('O').unwrap()));
        let twice = across.transposed().transposed();
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(twice.at(row, col), across.at(row, col));
                assert_eq!(across.transposed().at(col, row), across.at(row, col));
            }
        }
    }

    #[test]
    fn set_down_writes_a_column() {
        let mut board = Board::new(5);
        board.set(Direction::Down, 0, 4, &w("CAT"));
        assert_eq!(board.at(2, 4), Some(Letter::try_from('T').unwrap()));
        let down = board.view(Direction::Down);
        assert_eq!(down.cell(4, 0).gather_right(), w("AT"));
        assert_eq!(down.cell(4, 3).gather_left(), w("CAT"));
    }

    #[test]
    fn gathers_read_in_natural_order() {
        let mut board = Board::new(5);
        board.set(Direction::Across, 2, 0, &w("HO"));
        board.set(Direction::Across, 2, 3, &w("SE"));
        let view = board.view(Direction::Across);
        let gap = view.cell(2, 2);
        assert_eq!(gap.gather_left(), w("HO"));
        assert_eq!(gap.gather_right(), w("SE"));
        assert!(gap.is_anchor());
        assert!(!gap.is_perpendicular_anchor());
        assert!(view.cell(0, 0).up().is_none());
        assert!(view.cell(4, 4).right().is_none());
        assert_eq!(view.cell(2, 4).left_n(2).map(|c| c.col()), Some(2));
    }

    #[test]
    fn cross_checks_follow_perpendicular_words() {
        let lex = lexicon(&["AT", "TA", "CAT", "CATS"]);
        let mut board = Board::new(5);
        board.set(Direction::Across, 2, 1, &w("CAT"));
        board.refresh_cross_checks(&lex);
        let across = board.view(Direction::Across);
        // above the A: L with "LA" in the lexicon
        let above_a = across.cell(1, 2).cross_check().unwrap();
        assert_eq!(format!("{above_a:?}"), "{T}");
        // below the T: "TL"
        assert_eq!(format!("{:?}", across.cell(3, 3).cross_check().unwrap()), "{A}");
        assert!(across.cell(3, 1).cross_check().unwrap().is_empty());
        // far from anything
        assert!(across.cell(0, 0).cross_check().is_none());
        // down moves are constrained by the across word
        let down = board.view(Direction::Down);
        let after_t = down.cell(4, 2).cross_check().unwrap();
        assert_eq!(format!("{after_t:?}"), "{S}");
        assert!(down.cell(0, 2).cross_check().unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "stale cross-check")]
    fn stale_query_panics() {
        let lex = lexicon(&["AT"]);
        let mut board = Board::new(3);
        board.refresh_cross_checks(&lex);
        board.set(Direction::Across, 1, 0, &w("AT"));
        board.view(Direction::Across).cell(0, 0).in_cross_check(Letter::BLANK);
    }

    #[test]
    fn copies_are_independent() {
        let lex = lexicon(&["AT"]);
        let mut board = Board::new(3);
        board.set(Direction::Across, 1, 0, &w("AT"));
        board.refresh_cross_checks(&lex);
        let mut copy = board.clone();
        copy.set(Direction::Across, 0, 0, &w("T"));
        assert!(board.at(0, 0).is_none());
        assert!(!board.is_stale(Direction::Across));
        assert!(copy.is_stale(Direction::Across));
    }

    #[test]
    fn anchors_and_premiums() {
        let mut board = Board::new(15);
        assert!(board.view(Direction::Across).anchors().is_empty());
        board.set(Direction::Across, 7, 7, &w("A"));
        let view = board.view(Direction::Across);
        let anchors = view.anchors().iter().map(|c| (c.row(), c.col())).collect::<Vec<_>>();
        assert_eq!(anchors, vec![(6, 7), (7, 6), (7, 8), (8, 7)]);
        assert_eq!(view.cell(7, 7).premium(), board_layout::FVS);
        assert_eq!(view.cell(0, 0).premium().word_multiplier, 3);
        assert_eq!(view.center().row(), 7);
    }
}

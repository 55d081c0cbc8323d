// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[inline(always)]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Across => "across",
            Direction::Down => "down",
        })
    }
}

// One line of the row-major grid, walked in reading order.
#[derive(Clone, Copy)]
pub struct Strider {
    base: usize,
    step: usize,
    len: usize,
}

impl Strider {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: usize) -> usize {
        debug_assert!(idx < self.len);
        self.base + idx * self.step
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Dim {
    pub rows: usize,
    pub cols: usize,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: usize) -> Strider {
        Strider {
            base: row * self.cols,
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: usize) -> Strider {
        Strider {
            base: col,
            step: self.cols,
            len: self.rows,
        }
    }

    // Row `lane` of the view that reads the grid in `direction`: for Down,
    // the view's rows are the grid's columns.
    #[inline(always)]
    pub fn lane(&self, direction: Direction, lane: usize) -> Strider {
        match direction {
            Direction::Across => self.across(lane),
            Direction::Down => self.down(lane),
        }
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline(always)]
    pub fn row_col_of(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_address_the_same_cells_from_both_sides() {
        let dim = Dim { rows: 3, cols: 3 };
        for row in 0..3 {
            for col in 0..3 {
                let idx = dim.at_row_col(row, col);
                assert_eq!(dim.lane(Direction::Across, row).at(col), idx);
                assert_eq!(dim.lane(Direction::Down, col).at(row), idx);
            }
        }
    }

    #[test]
    fn flipping_twice_is_identity() {
        for d in [Direction::Across, Direction::Down] {
            assert_eq!(d.flipped().flipped(), d);
            assert_ne!(d.flipped(), d);
        }
        let dim = Dim { rows: 2, cols: 5 };
        assert_eq!(dim.row_col_of(7), (1, 2));
    }
}

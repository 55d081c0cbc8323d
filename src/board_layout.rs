// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Premium {
    pub word_multiplier: i32,
    pub letter_multiplier: i32,
}

static TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
static DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
static TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
static DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
pub static FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

pub const STANDARD_SIZE: usize = 15;

// Top-left quadrant including the middle row and column.
static STANDARD_QUADRANT: [[Premium; 8]; 8] = [
    [TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS],
    [FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS],
    [FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS],
    [DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS],
    [FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS],
    [FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS],
    [FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS],
    [TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS],
];

#[derive(Clone, Debug)]
pub struct BoardLayout {
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    star_row: usize,
    star_col: usize,
}

impl BoardLayout {
    // Premium squares are only defined for the standard size; any other size
    // is all plain squares.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board size must be positive");
        let dim = matrix::Dim {
            rows: size,
            cols: size,
        };
        let mut premiums = vec![FVS; dim.len()].into_boxed_slice();
        if size == STANDARD_SIZE {
            let last = size - 1;
            for row in 0..size {
                for col in 0..size {
                    let qr = if row > last / 2 { last - row } else { row };
                    let qc = if col > last / 2 { last - col } else { col };
                    premiums[dim.at_row_col(row, col)] = STANDARD_QUADRANT[qr][qc];
                }
            }
        }
        BoardLayout {
            premiums,
            dim,
            star_row: size / 2,
            star_col: size / 2,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star_row(&self) -> usize {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> usize {
        self.star_col
    }

    #[inline(always)]
    pub fn premium_at(&self, row: usize, col: usize) -> Premium {
        self.premiums[self.dim.at_row_col(row, col)]
    }
}

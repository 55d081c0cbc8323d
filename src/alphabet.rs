// Copyright (C) 2020-2026 Andy Kurnia.

// A letter is stored as its uppercase ascii byte, the blank as b'_'.
// Tile numbering for tallies and sets: blank is 0, A..Z are 1..26.
pub const NUM_TILES: usize = 27;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(std::num::NonZeroU8);

impl Letter {
    pub const BLANK: Letter = Letter(std::num::NonZeroU8::new(b'_').unwrap());

    #[inline(always)]
    pub fn from_ascii(b: u8) -> Option<Letter> {
        if b.is_ascii_uppercase() || b == b'_' {
            std::num::NonZeroU8::new(b).map(Letter)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Option<Letter> {
        match idx {
            0 => Some(Letter::BLANK),
            1..=26 => Letter::from_ascii(b'A' + (idx as u8 - 1)),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn ascii(self) -> u8 {
        self.0.get()
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        let b = self.0.get();
        if b == b'_' {
            0
        } else {
            (b - b'A' + 1) as usize
        }
    }

    #[inline(always)]
    pub fn is_blank(self) -> bool {
        self == Letter::BLANK
    }
}

impl TryFrom<char> for Letter {
    type Error = super::error::MyError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii() {
            if let Some(letter) = Letter::from_ascii(c as u8) {
                return Ok(letter);
            }
        }
        Err(super::error::new(format!("invalid letter {c:?}")))
    }
}

impl From<Letter> for char {
    #[inline(always)]
    fn from(letter: Letter) -> char {
        letter.ascii() as char
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ascii() as char)
    }
}

impl std::fmt::Debug for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.ascii() as char)
    }
}

// Bitset over tile numbers.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterSet(u32);

impl LetterSet {
    #[inline(always)]
    pub fn new() -> Self {
        LetterSet(0)
    }

    #[inline(always)]
    pub fn insert(&mut self, letter: Letter) {
        self.0 |= 1 << letter.index();
    }

    #[inline(always)]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0 & (1 << letter.index()) != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        (0..NUM_TILES)
            .filter(|&i| self.0 & (1 << i) != 0)
            .filter_map(Letter::from_index)
    }
}

impl std::fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for letter in self.iter() {
            write!(f, "{letter}")?;
        }
        f.write_str("}")
    }
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Tile {
    pub letter: Letter,
    pub score: i32,
    pub freq: u8,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Alphabet {
    tiles: Vec<Tile>,
}

impl Alphabet {
    // tiles may come in any order; lookups go through the tile number.
    pub fn new(tiles: Vec<Tile>) -> Self {
        let mut by_index = (0..NUM_TILES)
            .filter_map(Letter::from_index)
            .map(|letter| Tile {
                letter,
                score: 0,
                freq: 0,
            })
            .collect::<Vec<_>>();
        for tile in tiles {
            let idx = tile.letter.index();
            by_index[idx] = tile;
        }
        Alphabet { tiles: by_index }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, letter: Letter) -> &Tile {
        &self.tiles[letter.index()]
    }

    #[inline(always)]
    pub fn score(&self, letter: Letter) -> i32 {
        self.get(letter).score
    }

    #[inline(always)]
    pub fn freq(&self, letter: Letter) -> u8 {
        self.get(letter).freq
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.iter().map(|tile| tile.freq as usize).sum()
    }
}

impl From<Vec<Tile>> for Alphabet {
    fn from(tiles: Vec<Tile>) -> Self {
        Alphabet::new(tiles)
    }
}

impl From<Alphabet> for Vec<Tile> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.tiles
    }
}

pub fn make_english_alphabet() -> Alphabet {
    let tile = |c: u8, score: i32, freq: u8| Tile {
        // table below only holds valid labels
        letter: Letter::from_ascii(c).unwrap_or(Letter::BLANK),
        score,
        freq,
    };
    Alphabet::new(vec![
        // the blank exists as a symbol but is not in the pool by default
        tile(b'_', 0, 0),
        tile(b'A', 1, 9),
        tile(b'B', 3, 2),
        tile(b'C', 3, 2),
        tile(b'D', 2, 4),
        tile(b'E', 1, 12),
        tile(b'F', 4, 2),
        tile(b'G', 2, 3),
        tile(b'H', 4, 2),
        tile(b'I', 1, 9),
        tile(b'J', 8, 1),
        tile(b'K', 5, 1),
        tile(b'L', 1, 4),
        tile(b'M', 3, 2),
        tile(b'N', 1, 6),
        tile(b'O', 1, 8),
        tile(b'P', 3, 2),
        tile(b'Q', 10, 1),
        tile(b'R', 1, 6),
        tile(b'S', 1, 4),
        tile(b'T', 1, 6),
        tile(b'U', 1, 4),
        tile(b'V', 4, 2),
        tile(b'W', 4, 2),
        tile(b'X', 8, 1),
        tile(b'Y', 4, 2),
        tile(b'Z', 10, 1),
    ])
}

// Multiset of letters by tile number. Copy, so a recursive search can hand
// each branch its own rack.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RackTally([u8; NUM_TILES]);

impl RackTally {
    pub fn new(rack: &[Letter]) -> Self {
        let mut tally = [0u8; NUM_TILES];
        for &letter in rack {
            tally[letter.index()] += 1;
        }
        RackTally(tally)
    }

    #[inline(always)]
    pub fn count(&self, letter: Letter) -> u8 {
        self.0[letter.index()]
    }

    #[inline(always)]
    pub fn contains(&self, letter: Letter) -> bool {
        self.count(letter) > 0
    }

    #[inline(always)]
    pub fn without(mut self, letter: Letter) -> Option<Self> {
        let slot = &mut self.0[letter.index()];
        if *slot == 0 {
            None
        } else {
            *slot -= 1;
            Some(self)
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    pub fn has_all(&self, letters: &[Letter]) -> bool {
        let mut tally = *self;
        letters.iter().all(|&letter| match tally.without(letter) {
            Some(rest) => {
                tally = rest;
                true
            }
            None => false,
        })
    }
}

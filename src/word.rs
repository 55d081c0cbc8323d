// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet::Letter, error};

// Every operation returns a new value.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(Vec<Letter>);

impl Word {
    #[inline(always)]
    pub fn new() -> Self {
        Word(Vec::new())
    }

    #[inline(always)]
    pub fn head(&self) -> Option<Letter> {
        self.0.first().copied()
    }

    #[inline(always)]
    pub fn tail(&self) -> Word {
        Word(self.0.get(1..).unwrap_or_default().to_vec())
    }

    pub fn reversed(&self) -> Word {
        Word(self.0.iter().rev().copied().collect())
    }

    pub fn appended(&self, letter: Letter) -> Word {
        let mut v = Vec::with_capacity(self.0.len() + 1);
        v.extend_from_slice(&self.0);
        v.push(letter);
        Word(v)
    }

    pub fn concat(&self, other: &[Letter]) -> Word {
        let mut v = Vec::with_capacity(self.0.len() + other.len());
        v.extend_from_slice(&self.0);
        v.extend_from_slice(other);
        Word(v)
    }

    // first occurrence only
    pub fn without(&self, letter: Letter) -> Word {
        match self.0.iter().position(|&l| l == letter) {
            Some(pos) => {
                let mut v = self.0.clone();
                v.remove(pos);
                Word(v)
            }
            None => self.clone(),
        }
    }
}

impl std::ops::Deref for Word {
    type Target = [Letter];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&[Letter]> for Word {
    #[inline(always)]
    fn from(given: &[Letter]) -> Self {
        Word(given.to_vec())
    }
}

impl From<Vec<Letter>> for Word {
    #[inline(always)]
    fn from(given: Vec<Letter>) -> Self {
        Word(given)
    }
}

impl std::str::FromStr for Word {
    type Err = error::MyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut v = Vec::with_capacity(s.len());
        for c in s.chars() {
            match Letter::try_from(c) {
                Ok(letter) => v.push(letter),
                Err(_) => {
                    return Err(error::new(format!(
                        "invalid letter {c:?} after {:?} in {s:?}",
                        Word(v)
                    )));
                }
            }
        }
        Ok(Word(v))
    }
}

impl TryFrom<String> for Word {
    type Error = error::MyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> String {
        word.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &letter in self.0.iter() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

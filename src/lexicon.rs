// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet::Letter, error, word::Word};

struct Node {
    // sorted by letter, letters unique
    edges: Vec<(Letter, i32)>,
    accepts: bool,
}

impl Node {
    fn new() -> Self {
        Node {
            edges: Vec::new(),
            accepts: false,
        }
    }
}

// Node 0 is the root (the empty word). Lookups return -1 for a path that does
// not exist, and every accessor takes a negative index without complaint, so
// searches can be chained freely.
pub struct Lexicon(Vec<Node>);

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub const ROOT: i32 = 0;

    pub fn new() -> Self {
        Lexicon(vec![Node::new()])
    }

    pub fn from_words<'w, I: IntoIterator<Item = &'w [Letter]>>(words: I) -> Self {
        let mut lexicon = Self::new();
        for word in words {
            lexicon.insert(word);
        }
        lexicon
    }

    // newline-delimited, one uppercase word per line, blank lines ignored.
    pub fn from_word_list(giant_string: &str) -> error::Returns<Self> {
        let words = read_machine_words(giant_string)?;
        Ok(Self::from_words(words.iter().map(|w| &w[..])))
    }

    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Self> {
        let path = path.as_ref();
        let giant_string = std::fs::read_to_string(path)
            .map_err(|e| error::new(format!("cannot read {}: {e}", path.display())))?;
        let lexicon = Self::from_word_list(&giant_string)?;
        tracing::info!(path = %path.display(), nodes = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn insert(&mut self, word: &[Letter]) {
        let mut p = Self::ROOT as usize;
        for &letter in word {
            p = match self.0[p].edges.binary_search_by_key(&letter, |&(l, _)| l) {
                Ok(i) => self.0[p].edges[i].1 as usize,
                Err(i) => {
                    let q = self.0.len();
                    self.0.push(Node::new());
                    self.0[p].edges.insert(i, (letter, q as i32));
                    q
                }
            };
        }
        self.0[p].accepts = true;
    }

    #[inline(always)]
    pub fn seek(&self, p: i32, letter: Letter) -> i32 {
        if p >= 0 {
            let edges = &self.0[p as usize].edges;
            if let Ok(i) = edges.binary_search_by_key(&letter, |&(l, _)| l) {
                return edges[i].1;
            }
        }
        -1
    }

    // Empty word returns p unchanged.
    pub fn search(&self, mut p: i32, word: &[Letter]) -> i32 {
        for &letter in word {
            if p < 0 {
                break;
            }
            p = self.seek(p, letter);
        }
        p
    }

    #[inline(always)]
    pub fn accepts(&self, p: i32) -> bool {
        p >= 0 && self.0[p as usize].accepts
    }

    #[inline(always)]
    pub fn edges(&self, p: i32) -> &[(Letter, i32)] {
        if p >= 0 { &self.0[p as usize].edges } else { &[] }
    }

    #[inline(always)]
    pub fn contains(&self, word: &[Letter]) -> bool {
        self.accepts(self.search(Self::ROOT, word))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.len() <= 1 && !self.0[0].accepts
    }
}

pub fn read_machine_words(giant_string: &str) -> error::Returns<Vec<Word>> {
    let mut machine_words = Vec::new();
    for (line_num, s) in (1..).zip(giant_string.lines()) {
        let s = s.trim_end_matches('\r');
        if s.is_empty() {
            continue;
        }
        match s.parse::<Word>() {
            Ok(word) => machine_words.push(word),
            Err(e) => {
                crate::return_error!(format!("line {line_num}: {e}"));
            }
        }
    }
    Ok(machine_words)
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
    fn inserted_words_are_accepted() {
        let lex = lexicon(&["CAT", "CATS", "AT", "TA"]);
        for s in ["CAT", "CATS", "AT", "TA"] {
            assert!(lex.contains(&w(s)), "{s}");
        }
    }

    #[test]
    fn prefixes_exist_but_do_not_accept() {
        let lex = lexicon(&["CATS"]);
        let p = lex.search(Lexicon::ROOT, &w("CAT"));
        assert!(p > 0);
        assert!(!lex.accepts(p));
        assert!(!lex.contains(&w("CAB")));
        assert!(!lex.contains(&w("CATSS")));
    }

    #[test]
    fn misses_chain_without_panicking() {
        let lex = lexicon(&["DO"]);
        let miss = lex.search(Lexicon::ROOT, &w("X"));
        assert!(miss < 0);
        assert!(lex.edges(miss).is_empty());
        assert!(!lex.accepts(miss));
        assert!(lex.search(miss, &w("DO")) < 0);
        assert_eq!(lex.search(Lexicon::ROOT, &Word::new()), Lexicon::ROOT);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut lex = lexicon(&["DOG"]);
        let before = lex.len();
        lex.insert(&w("DOG"));
        assert_eq!(lex.len(), before);
        assert!(lex.contains(&w("DOG")));
    }

    #[test]
    fn edges_are_unique_and_sorted() {
        let lex = lexicon(&["DO", "DOG", "DA", "DZ"]);
        let d = lex.seek(Lexicon::ROOT, Letter::try_from('D').unwrap());
        let labels = lex
            .edges(d)
            .iter()
            .map(|&(l, _)| char::from(l))
            .collect::<String>();
        assert_eq!(labels, "AOZ");
    }

    #[test]
    fn loader_skips_blank_lines_and_rejects_bad_characters() {
        let lex = Lexicon::from_word_list("DO\n\nDOG\r\n").unwrap();
        assert!(lex.contains(&w("DOG")));
        let err = Lexicon::from_word_list("DO\nd0g\n").err().unwrap();
        assert!(err.to_string().starts_with("line 2:"), "{err}");
    }
}

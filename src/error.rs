// Copyright (C) 2020-2026 Andy Kurnia.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

// Recoverable: nothing was mutated, the same player may try another move.
// Each variant carries the move in its textual form.
#[derive(Clone, PartialEq, Eq)]
pub enum RuleError {
    OutOfBounds(String),
    InvalidWord(String),
    InsufficientRack(String, String),
    NoNewLetters(String),
    DisconnectedMove(String),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::OutOfBounds(m) => write!(f, "move would fall off the board: {m}"),
            RuleError::InvalidWord(m) => write!(f, "invalid word(s) would be created: {m}"),
            RuleError::InsufficientRack(needed, m) => {
                write!(f, "required letters {needed:?} are not in rack: {m}")
            }
            RuleError::NoNewLetters(m) => {
                write!(f, "must put down at least one letter from the rack: {m}")
            }
            RuleError::DisconnectedMove(m) => write!(
                f,
                "first move must pass through the center, later moves must touch a tile: {m}"
            ),
        }
    }
}

impl std::fmt::Debug for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for RuleError {}

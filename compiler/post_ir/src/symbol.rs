//! Tape alphabet and cursor movements.

use std::fmt;

/// A symbol of the two-letter tape alphabet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The empty cell, written as `' '`.
    #[default]
    Blank,
    /// The marked cell, written as `'*'`.
    Mark,
}

impl Symbol {
    /// Character used when printing a tape.
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Blank => ' ',
            Symbol::Mark => '*',
        }
    }

    /// Parse a tape character. Only `' '` and `'*'` are part of the alphabet.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Symbol::Blank),
            '*' => Some(Symbol::Mark),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Symbol::Mark)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Cursor movement applied after a transition's write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    Left,
    Right,
}

impl Movement {
    pub const fn name(self) -> &'static str {
        match self {
            Movement::Left => "left",
            Movement::Right => "right",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! The machine tape.
//!
//! A row of [`Symbol`] cells with a cursor. The tape is unbounded in both
//! directions: moving past either end adds a blank cell there.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use post_ir::{Movement, Symbol};

/// A character that is not part of the tape alphabet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid tape symbol {found:?} at position {position}")]
pub struct TapeError {
    pub found: char,
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    position: usize,
}

impl Default for Tape {
    /// A single blank cell.
    fn default() -> Self {
        Self {
            cells: VecDeque::from([Symbol::Blank]),
            position: 0,
        }
    }
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tape holding `symbols`, cursor on the first cell.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let cells: VecDeque<_> = symbols.into_iter().collect();
        if cells.is_empty() {
            return Self::default();
        }
        Self { cells, position: 0 }
    }

    /// Move the cursor to `position`, growing the tape with blanks if needed.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        if position >= self.cells.len() {
            self.cells.resize(position + 1, Symbol::Blank);
        }
        self.position = position;
        self
    }

    /// The symbol under the cursor.
    pub fn read(&self) -> Symbol {
        self.cells.get(self.position).copied().unwrap_or_default()
    }

    pub fn write(&mut self, symbol: Symbol) {
        if let Some(cell) = self.cells.get_mut(self.position) {
            *cell = symbol;
        }
    }

    pub fn move_left(&mut self) {
        if self.position == 0 {
            self.cells.push_front(Symbol::Blank);
        } else {
            self.position -= 1;
        }
    }

    pub fn move_right(&mut self) {
        self.position += 1;
        if self.position == self.cells.len() {
            self.cells.push_back(Symbol::Blank);
        }
    }

    pub fn shift(&mut self, movement: Movement) {
        match movement {
            Movement::Left => self.move_left(),
            Movement::Right => self.move_right(),
        }
    }

    /// Cursor position, counted from the leftmost cell.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cells from left to right.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cells.iter().copied()
    }

    /// The tape as text without leading and trailing blanks.
    pub fn trimmed(&self) -> String {
        self.to_string()
            .trim_matches(Symbol::Blank.as_char())
            .to_owned()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells
            .iter()
            .try_for_each(|symbol| write!(f, "{}", symbol.as_char()))
    }
}

impl FromStr for Tape {
    type Err = TapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .enumerate()
            .map(|(position, found)| {
                Symbol::from_char(found).ok_or(TapeError { found, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_symbols(symbols))
    }
}

//! The structured program a Post machine is compiled from.
//!
//! A program is a [`Scope`]: an insertion-ordered map from key tokens to
//! [`Entry`] values. Declaration order matters: it fixes each instruction's
//! positional successor and makes the first numbered instruction the entry
//! point.
//!
//! ```text
//! Scope::new()
//!     .subroutine("ToRightAndMark", Scope::new()
//!         .instruction(10, right())
//!         .instruction(20, mark()))
//!     .instruction(10, call("ToRightAndMark"))
//!     .instruction(20, check(10, 30))
//!     .instruction(30, stop())
//! ```

use crate::Movement;

/// Where control goes after a non-branching instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Next {
    /// The instruction declared right after this one, or Halt if it is last.
    #[default]
    Positional,
    /// An explicitly named instruction index in the same scope.
    Index(i64),
}

impl Next {
    /// The explicit target, if one was given.
    #[inline]
    pub fn explicit(self) -> Option<i64> {
        match self {
            Next::Positional => None,
            Next::Index(index) => Some(index),
        }
    }
}

/// One instruction of a Post machine program.
///
/// Unapplied commands do not exist at this level: every variant is a fully
/// formed instruction. `Stop` and `Check` carry a `next` slot only so that an
/// explicit continuation on them can be reported instead of silently dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Move the cursor one cell.
    Move { direction: Movement, next: Next },
    /// Write the mark symbol.
    Mark { next: Next },
    /// Write the blank symbol.
    Erase { next: Next },
    /// Leave the tape untouched.
    Noop { next: Next },
    /// Halt the current program or return from the current subroutine.
    Stop { next: Next },
    /// Branch on the current cell.
    Check {
        if_marked: i64,
        otherwise: i64,
        next: Next,
    },
    /// Run a named subroutine, then continue.
    Call { name: String, next: Next },
    /// Run an inline sequence of commands as one instruction.
    Group { commands: Vec<Instruction>, next: Next },
}

impl Instruction {
    /// Set an explicit continuation.
    #[must_use]
    pub fn then(mut self, index: i64) -> Self {
        *self.next_mut() = Next::Index(index);
        self
    }

    /// The continuation as written.
    pub fn next(&self) -> Next {
        match self {
            Instruction::Move { next, .. }
            | Instruction::Mark { next }
            | Instruction::Erase { next }
            | Instruction::Noop { next }
            | Instruction::Stop { next }
            | Instruction::Check { next, .. }
            | Instruction::Call { next, .. }
            | Instruction::Group { next, .. } => *next,
        }
    }

    fn next_mut(&mut self) -> &mut Next {
        match self {
            Instruction::Move { next, .. }
            | Instruction::Mark { next }
            | Instruction::Erase { next }
            | Instruction::Noop { next }
            | Instruction::Stop { next }
            | Instruction::Check { next, .. }
            | Instruction::Call { next, .. }
            | Instruction::Group { next, .. } => next,
        }
    }

    /// Command name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Move {
                direction: Movement::Left,
                ..
            } => "left",
            Instruction::Move {
                direction: Movement::Right,
                ..
            } => "right",
            Instruction::Mark { .. } => "mark",
            Instruction::Erase { .. } => "erase",
            Instruction::Noop { .. } => "noop",
            Instruction::Stop { .. } => "stop",
            Instruction::Check { .. } => "check",
            Instruction::Call { .. } => "call",
            Instruction::Group { .. } => "group",
        }
    }
}

// Command vocabulary

pub fn left() -> Instruction {
    Instruction::Move {
        direction: Movement::Left,
        next: Next::Positional,
    }
}

pub fn right() -> Instruction {
    Instruction::Move {
        direction: Movement::Right,
        next: Next::Positional,
    }
}

pub fn mark() -> Instruction {
    Instruction::Mark {
        next: Next::Positional,
    }
}

pub fn erase() -> Instruction {
    Instruction::Erase {
        next: Next::Positional,
    }
}

pub fn noop() -> Instruction {
    Instruction::Noop {
        next: Next::Positional,
    }
}

pub fn stop() -> Instruction {
    Instruction::Stop {
        next: Next::Positional,
    }
}

/// Branch to `if_marked` when the current cell holds a mark, else to `otherwise`.
pub fn check(if_marked: i64, otherwise: i64) -> Instruction {
    Instruction::Check {
        if_marked,
        otherwise,
        next: Next::Positional,
    }
}

pub fn call(name: impl Into<String>) -> Instruction {
    Instruction::Call {
        name: name.into(),
        next: Next::Positional,
    }
}

pub fn group(commands: impl IntoIterator<Item = Instruction>) -> Instruction {
    Instruction::Group {
        commands: commands.into_iter().collect(),
        next: Next::Positional,
    }
}

/// The value stored under a scope key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Instruction(Instruction),
    Subroutine(Scope),
}

impl From<Instruction> for Entry {
    fn from(instruction: Instruction) -> Self {
        Entry::Instruction(instruction)
    }
}

impl From<Scope> for Entry {
    fn from(scope: Scope) -> Self {
        Entry::Subroutine(scope)
    }
}

/// An insertion-ordered instruction map.
///
/// Keys are kept as raw tokens; they are validated when the scope is
/// compiled, not when it is built. Inserting an existing key replaces its
/// value and keeps the original declaration position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    entries: Vec<(String, Entry)>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numbered instruction.
    #[must_use]
    pub fn instruction(self, index: i64, instruction: Instruction) -> Self {
        self.entry(index.to_string(), Entry::Instruction(instruction))
    }

    /// Declare a subroutine visible to this scope and every scope nested in it.
    #[must_use]
    pub fn subroutine(self, name: impl Into<String>, body: Scope) -> Self {
        self.entry(name, Entry::Subroutine(body))
    }

    /// Add an entry under a raw key token.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Insert or replace an entry, returning the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        let key = key.into();
        let entry = entry.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, entry));
        }
        self.entries.push((key, entry));
        None
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, E: Into<Entry>> FromIterator<(K, E)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (key, entry) in iter {
            scope.insert(key, entry);
        }
        scope
    }
}

//! Automaton state graph.
//!
//! A compiled program is an arena of [`State`]s addressed by [`StateId`].
//! Transitions are generic over their target so the compiler can build states
//! that still point at unbound forward references, then rewrite every target
//! to a plain [`StateId`] once the whole program is linked.
//!
//! # Halt
//!
//! [`StateId::HALT`] is the terminal sentinel. It has no transition table and
//! is never stored in the arena; user states are numbered from 1.
//!
//! # Calls and returns
//!
//! A state with [`return_to`](State::return_to) set is a *wrapper*: it behaves
//! like the state it wraps, but when control later reaches Halt the stepping
//! engine resumes at `return_to` instead of stopping. Subroutine calls and
//! groups are compiled to wrappers.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::{Movement, Symbol};

// ── ID newtype ──────────────────────────────────────────────────────

/// State ID within a [`StateGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StateId(u32);

impl StateId {
    /// The terminal state.
    pub const HALT: StateId = StateId(0);

    /// Create a state ID from a raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_halt(self) -> bool {
        self.0 == 0
    }

    /// Position in the arena, `None` for Halt.
    #[inline]
    fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_halt() {
            f.write_str("halt")
        } else {
            write!(f, "s{}", self.0)
        }
    }
}

// ── Transitions ─────────────────────────────────────────────────────

/// What a state does for one tape symbol: write, then move, then go to `next`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition<T = StateId> {
    pub write: Option<Symbol>,
    pub movement: Option<Movement>,
    pub next: T,
}

impl<T> Transition<T> {
    /// A transition that leaves the tape untouched.
    pub fn goto(next: T) -> Self {
        Self {
            write: None,
            movement: None,
            next,
        }
    }

    pub fn try_map<U, E>(self, f: &mut impl FnMut(T) -> Result<U, E>) -> Result<Transition<U>, E> {
        Ok(Transition {
            write: self.write,
            movement: self.movement,
            next: f(self.next)?,
        })
    }
}

/// A state's transition table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transitions<T = StateId> {
    /// The same transition whatever the current symbol is.
    Always(Transition<T>),
    /// One transition per symbol of the alphabet.
    OnSymbol {
        marked: Transition<T>,
        blank: Transition<T>,
    },
}

impl<T> Transitions<T> {
    /// The transition taken when the cursor reads `symbol`.
    pub fn for_symbol(&self, symbol: Symbol) -> &Transition<T> {
        match self {
            Transitions::Always(transition) => transition,
            Transitions::OnSymbol { marked, blank } => match symbol {
                Symbol::Mark => marked,
                Symbol::Blank => blank,
            },
        }
    }

    /// Every transition target, in table order.
    pub fn targets(&self) -> impl Iterator<Item = &T> {
        let (first, second) = match self {
            Transitions::Always(transition) => (&transition.next, None),
            Transitions::OnSymbol { marked, blank } => (&marked.next, Some(&blank.next)),
        };
        std::iter::once(first).chain(second)
    }

    pub fn try_map<U, E>(self, f: &mut impl FnMut(T) -> Result<U, E>) -> Result<Transitions<U>, E> {
        Ok(match self {
            Transitions::Always(transition) => Transitions::Always(transition.try_map(f)?),
            Transitions::OnSymbol { marked, blank } => Transitions::OnSymbol {
                marked: marked.try_map(f)?,
                blank: blank.try_map(f)?,
            },
        })
    }
}

// ── States ──────────────────────────────────────────────────────────

/// One automaton state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State<T = StateId> {
    pub transitions: Transitions<T>,
    /// Where to resume when control reaches Halt after passing through this state.
    pub return_to: Option<T>,
}

impl<T> State<T> {
    pub fn new(transitions: Transitions<T>) -> Self {
        Self {
            transitions,
            return_to: None,
        }
    }

    /// Rewrite every target, failing on the first one `f` rejects.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<State<U>, E> {
        Ok(State {
            transitions: self.transitions.try_map(&mut f)?,
            return_to: self.return_to.map(&mut f).transpose()?,
        })
    }
}

// ── Graph ───────────────────────────────────────────────────────────

/// A frozen state graph.
///
/// Immutable once built. Any number of stepping engines may read it at the
/// same time, each with its own tape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateGraph {
    states: Vec<State>,
}

impl StateGraph {
    /// Build a graph from states numbered `1..=states.len()`.
    pub fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Look up a state. Halt and out-of-range IDs have no state.
    pub fn state(&self, id: StateId) -> Option<&State> {
        id.slot().and_then(|slot| self.states.get(slot))
    }

    /// Number of user states (Halt excluded).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (1..=self.states.len()).filter_map(|raw| u32::try_from(raw).ok().map(StateId::new))
    }

    /// Every state control can move to from `id`, including its return state.
    pub fn successors(&self, id: StateId) -> Vec<StateId> {
        let Some(state) = self.state(id) else {
            return Vec::new();
        };
        state
            .transitions
            .targets()
            .copied()
            .chain(state.return_to)
            .collect()
    }

    /// All states reachable from `entry`, `entry` included.
    pub fn reachable_from(&self, entry: StateId) -> FxHashSet<StateId> {
        let mut seen = FxHashSet::default();
        let mut pending = vec![entry];
        while let Some(id) = pending.pop() {
            if seen.insert(id) {
                pending.extend(self.successors(id));
            }
        }
        seen
    }

    /// Returns `true` if a cycle is reachable from `entry`.
    pub fn has_cycle_from(&self, entry: StateId) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Open,
            Done,
        }

        let mut marks = rustc_hash::FxHashMap::default();
        // (state, successors still to visit)
        let mut stack: Vec<(StateId, Vec<StateId>)> = vec![(entry, self.successors(entry))];
        marks.insert(entry, Mark::Open);

        while let Some((id, pending)) = stack.last_mut() {
            let id = *id;
            match pending.pop() {
                Some(next) => match marks.get(&next) {
                    Some(Mark::Open) => return true,
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(next, Mark::Open);
                        let successors = self.successors(next);
                        stack.push((next, successors));
                    }
                },
                None => {
                    marks.insert(id, Mark::Done);
                    stack.pop();
                }
            }
        }
        false
    }
}

impl fmt::Display for StateGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.ids().zip(&self.states) {
            write!(f, "{id}:")?;
            match &state.transitions {
                Transitions::Always(transition) => write_transition(f, "any", transition)?,
                Transitions::OnSymbol { marked, blank } => {
                    write_transition(f, "'*'", marked)?;
                    write_transition(f, "' '", blank)?;
                }
            }
            if let Some(return_to) = state.return_to {
                write!(f, " returns to {return_to}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_transition(f: &mut fmt::Formatter<'_>, on: &str, transition: &Transition) -> fmt::Result {
    write!(f, " [{on}")?;
    if let Some(symbol) = transition.write {
        write!(f, " write '{symbol}'")?;
    }
    if let Some(movement) = transition.movement {
        write!(f, " {movement}")?;
    }
    write!(f, " -> {}]", transition.next)
}

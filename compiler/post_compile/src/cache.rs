//! State deduplication.
//!
//! One [`StateCache`] lives for a whole `compile` call and is shared by every
//! nested scope, subroutine and group. Keys describe what a state *does*
//! (command kind plus resolved targets), never which instruction asked for
//! it, so two instructions with the same behaviour share one state.
//!
//! Targets are forward references, and every reference is unique within one
//! compile, so index numbers that repeat across scopes never collide.

use post_ir::{Movement, StateId, Symbol};
use rustc_hash::FxHashMap;

use crate::builder::Target;

/// What a non-branching state does to the tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Movement),
    Write(Symbol),
    Noop,
}

/// Canonical description of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    Command { action: Action, next: Target },
    Check { marked: Target, blank: Target },
    /// A call or group entry whose Halt transitions return to `continuation`.
    Wrap { entry: StateId, continuation: Target },
}

#[derive(Debug, Default)]
pub struct StateCache {
    states: FxHashMap<StateKey, StateId>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StateKey) -> Option<StateId> {
        let hit = self.states.get(key).copied();
        if let Some(state) = hit {
            tracing::trace!(?key, %state, "state cache hit");
        }
        hit
    }

    pub fn insert(&mut self, key: StateKey, state: StateId) {
        self.states.insert(key, state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}

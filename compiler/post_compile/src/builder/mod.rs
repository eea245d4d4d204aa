//! Arena for states under construction.
//!
//! Instructions may target states that do not exist yet: a later index, the
//! instruction itself through a subroutine, or a sibling subroutine declared
//! further down. [`GraphBuilder`] hands out [`RefId`] slots for those targets
//! up front and binds each slot exactly once. [`finish`](GraphBuilder::finish)
//! resolves every slot and freezes the result into a [`StateGraph`].

use post_ir::{State, StateGraph, StateId};

use crate::CompileError;

/// A forward reference to a state that may not have been built yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct RefId(u32);

impl RefId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A transition target during construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    State(StateId),
    Ref(RefId),
}

impl Target {
    pub const HALT: Target = Target::State(StateId::HALT);
}

/// States under construction plus their forward references.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    states: Vec<State<Target>>,
    refs: Vec<Option<StateId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an unbound reference.
    pub fn new_ref(&mut self) -> Result<RefId, CompileError> {
        let raw = u32::try_from(self.refs.len()).map_err(|_| CompileError::TooManyStates)?;
        self.refs.push(None);
        Ok(RefId(raw))
    }

    /// Bind a reference. References are write-once.
    pub fn bind(&mut self, reference: RefId, state: StateId) {
        if let Some(slot) = self.refs.get_mut(reference.index()) {
            debug_assert!(slot.is_none(), "reference bound twice");
            *slot = Some(state);
        }
    }

    /// The state a reference is bound to, if any.
    pub fn bound(&self, reference: RefId) -> Option<StateId> {
        self.refs.get(reference.index()).copied().flatten()
    }

    /// Add a state to the arena.
    pub fn push(&mut self, state: State<Target>) -> Result<StateId, CompileError> {
        let raw = u32::try_from(self.states.len() + 1).map_err(|_| CompileError::TooManyStates)?;
        self.states.push(state);
        Ok(StateId::new(raw))
    }

    /// Look up a state built so far. Halt has no state.
    pub fn state(&self, id: StateId) -> Option<&State<Target>> {
        (id.raw() as usize)
            .checked_sub(1)
            .and_then(|slot| self.states.get(slot))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Resolve every reference and freeze the graph.
    pub fn finish(self) -> Result<StateGraph, CompileError> {
        let GraphBuilder { states, refs } = self;
        let resolve = |target: Target| match target {
            Target::State(id) => Ok(id),
            Target::Ref(reference) => refs
                .get(reference.index())
                .copied()
                .flatten()
                .ok_or(CompileError::UnboundReference),
        };
        let states = states
            .into_iter()
            .map(|state| state.try_map(resolve))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StateGraph::from_states(states))
    }
}

#[cfg(test)]
mod tests;

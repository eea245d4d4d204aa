//! The stepping engine.
//!
//! [`Execution`] walks a [`StateGraph`] against a [`Tape`], one transition
//! per iteration. It keeps a return stack for wrapper states: entering a state
//! with `return_to` pushes it, and a transition into Halt pops the most recent
//! return instead of stopping. Execution ends when Halt is reached with an
//! empty stack, or with [`RunError::LongExecution`] when the step budget runs
//! out first.

use post_ir::{Movement, StateGraph, StateId, Symbol};

use crate::Tape;

/// One applied transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// 1-based step number.
    pub index: usize,
    pub state: StateId,
    pub symbol_before: Symbol,
    pub symbol_after: Symbol,
    pub movement: Option<Movement>,
    /// The state control moved to, after any return.
    pub next: StateId,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// The step budget ran out before the program halted.
    #[error("long execution: no halt within {limit} steps")]
    LongExecution { limit: usize },
}

/// A run in progress.
///
/// Borrows the graph shared and the tape exclusively: many executions may
/// read one graph at once as long as each has its own tape.
pub struct Execution<'a> {
    graph: &'a StateGraph,
    tape: &'a mut Tape,
    current: StateId,
    returns: Vec<StateId>,
    steps: usize,
    limit: usize,
    finished: bool,
}

impl<'a> Execution<'a> {
    pub fn new(graph: &'a StateGraph, entry: StateId, tape: &'a mut Tape, limit: usize) -> Self {
        Self {
            graph,
            tape,
            current: entry,
            returns: Vec::new(),
            steps: 0,
            limit,
            finished: false,
        }
    }

    /// The state the next step will apply.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Steps applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.graph.state(self.current).is_none()
    }

    pub fn tape(&self) -> &Tape {
        self.tape
    }
}

impl Iterator for Execution<'_> {
    type Item = Result<Step, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let graph = self.graph;
        let Some(state) = graph.state(self.current) else {
            self.finished = true;
            tracing::trace!(steps = self.steps, "halted");
            return None;
        };
        if self.steps == self.limit {
            self.finished = true;
            tracing::debug!(limit = self.limit, state = %self.current, "step limit reached");
            return Some(Err(RunError::LongExecution { limit: self.limit }));
        }

        self.steps += 1;
        if let Some(return_to) = state.return_to {
            self.returns.push(return_to);
        }

        let symbol_before = self.tape.read();
        let transition = state.transitions.for_symbol(symbol_before);
        if let Some(symbol) = transition.write {
            self.tape.write(symbol);
        }
        if let Some(movement) = transition.movement {
            self.tape.shift(movement);
        }

        let mut next = transition.next;
        if next.is_halt() {
            if let Some(return_to) = self.returns.pop() {
                next = return_to;
            }
        }

        let step = Step {
            index: self.steps,
            state: self.current,
            symbol_before,
            symbol_after: transition.write.unwrap_or(symbol_before),
            movement: transition.movement,
            next,
        };
        tracing::trace!(
            step = step.index,
            state = %step.state,
            next = %step.next,
            depth = self.returns.len(),
            "step"
        );
        self.current = next;
        Some(Ok(step))
    }
}

#[cfg(test)]
mod tests;

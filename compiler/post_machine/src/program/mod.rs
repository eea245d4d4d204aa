//! A compiled program bound to its tape.

use post_compile::{compile, CompileError, Compiled};
use post_ir::{Scope, StateGraph, StateId};

use crate::engine::{Execution, RunError, Step};
use crate::{RunOptions, Tape};

/// A program ready to run.
///
/// The graph is immutable once compiled. The tape belongs to the program and
/// persists across runs; [`Program::run_on`] runs the same graph against a
/// caller-owned tape instead, which lets several threads share one program.
#[derive(Clone, Debug)]
pub struct Program {
    graph: StateGraph,
    entry: StateId,
    tape: Tape,
}

impl Program {
    /// Compile `scope` with a fresh single-cell tape.
    pub fn compile(scope: &Scope) -> Result<Self, CompileError> {
        let Compiled { graph, entry } = compile(scope)?;
        Ok(Self {
            graph,
            entry,
            tape: Tape::new(),
        })
    }

    pub fn entry(&self) -> StateId {
        self.entry
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    /// Install a new tape, returning the old one.
    pub fn replace_tape(&mut self, tape: Tape) -> Tape {
        std::mem::replace(&mut self.tape, tape)
    }

    /// Step through a run on the program's own tape.
    pub fn stepwise(&mut self, steps_limit: usize) -> Execution<'_> {
        Execution::new(&self.graph, self.entry, &mut self.tape, steps_limit)
    }

    /// Run to completion on the program's own tape, reporting every step.
    ///
    /// Returns the number of steps taken. The tape keeps whatever the
    /// program wrote, including after a failed run.
    pub fn run(
        &mut self,
        options: RunOptions,
        on_step: impl FnMut(&Step),
    ) -> Result<usize, RunError> {
        drive(
            Execution::new(&self.graph, self.entry, &mut self.tape, options.steps_limit),
            on_step,
        )
    }

    /// Run to completion on `tape`, leaving the program's own tape alone.
    pub fn run_on(
        &self,
        tape: &mut Tape,
        options: RunOptions,
        on_step: impl FnMut(&Step),
    ) -> Result<usize, RunError> {
        drive(
            Execution::new(&self.graph, self.entry, tape, options.steps_limit),
            on_step,
        )
    }
}

#[tracing::instrument(level = "debug", skip_all)]
fn drive(mut execution: Execution<'_>, mut on_step: impl FnMut(&Step)) -> Result<usize, RunError> {
    for step in execution.by_ref() {
        on_step(&step?);
    }
    let steps = execution.steps();
    tracing::debug!(steps, tape = %execution.tape(), "run finished");
    Ok(steps)
}

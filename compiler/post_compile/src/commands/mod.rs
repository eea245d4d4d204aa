//! Command producers.
//!
//! Each instruction kind lowers to a state here. Producers run once per
//! instruction, in declaration order, and return the state that the
//! instruction's own reference is bound to:
//!
//! - **move / mark / erase / noop**: one wildcard transition to the resolved
//!   continuation, deduplicated by action and target.
//! - **stop**: Halt itself.
//! - **check**: a two-way branch on the current symbol.
//! - **call**: a wrapper around the subroutine's entry state that returns to
//!   the continuation.
//! - **group**: the group body compiled as an anonymous scope, wrapped the
//!   same way as a call.

use post_ir::{Instruction, Next, State, StateId, Symbol, Transition, Transitions};

use crate::builder::{RefId, Target};
use crate::cache::{Action, StateKey};
use crate::scope::{build_numbered, Lowering};
use crate::subroutines::SubroutineTable;
use crate::CompileError;

/// Where an instruction sits in its scope.
pub struct Site<'a> {
    pub index: i64,
    /// The index declared right after this one.
    pub positional_next: Option<i64>,
    /// References of every numbered instruction in the scope.
    pub references: &'a [(i64, RefId)],
    pub in_group: bool,
}

impl Site<'_> {
    fn reference(&self, index: i64) -> Option<RefId> {
        self.references
            .iter()
            .find(|(declared, _)| *declared == index)
            .map(|(_, reference)| *reference)
    }

    /// Resolve `next` against the explicit, positional and self-loop rules.
    fn continuation(&self, command: &'static str, next: Next) -> Result<Target, CompileError> {
        if self.in_group && next != Next::Positional {
            return Err(CompileError::InappropriateInGroup {
                index: self.index,
                command,
            });
        }
        let Some(target) = next.explicit().or(self.positional_next) else {
            return Ok(Target::HALT);
        };
        if target == self.index {
            return Err(CompileError::InfiniteLoop { index: self.index });
        }
        self.reference(target)
            .map(Target::Ref)
            .ok_or(CompileError::InvalidNextIndex {
                index: self.index,
                target,
            })
    }

    /// Resolve one branch of a check.
    fn branch(&self, target: i64) -> Result<Target, CompileError> {
        self.reference(target)
            .map(Target::Ref)
            .ok_or(CompileError::InvalidNextIndex {
                index: self.index,
                target,
            })
    }
}

/// Lower one instruction to the state its reference binds to.
pub fn produce(
    lowering: &mut Lowering,
    site: &Site<'_>,
    instruction: &Instruction,
    subroutines: &SubroutineTable,
) -> Result<StateId, CompileError> {
    tracing::trace!(index = site.index, command = instruction.name(), "producing state");
    match instruction {
        Instruction::Move { direction, next } => {
            simple(lowering, site, instruction.name(), Action::Move(*direction), *next)
        }
        Instruction::Mark { next } => {
            simple(lowering, site, "mark", Action::Write(Symbol::Mark), *next)
        }
        Instruction::Erase { next } => {
            simple(lowering, site, "erase", Action::Write(Symbol::Blank), *next)
        }
        Instruction::Noop { next } => simple(lowering, site, "noop", Action::Noop, *next),
        Instruction::Stop { next } => stop(site, *next),
        Instruction::Check {
            if_marked,
            otherwise,
            next,
        } => check(lowering, site, *if_marked, *otherwise, *next),
        Instruction::Call { name, next } => call(lowering, site, name, *next, subroutines),
        Instruction::Group { commands, next } => {
            group(lowering, site, commands, *next, subroutines)
        }
    }
}

fn simple(
    lowering: &mut Lowering,
    site: &Site<'_>,
    command: &'static str,
    action: Action,
    next: Next,
) -> Result<StateId, CompileError> {
    let next = site.continuation(command, next)?;
    action_state(lowering, action, next)
}

/// The deduplicated state performing `action` and moving on to `next`.
fn action_state(
    lowering: &mut Lowering,
    action: Action,
    next: Target,
) -> Result<StateId, CompileError> {
    let key = StateKey::Command { action, next };
    if let Some(state) = lowering.cache.get(&key) {
        return Ok(state);
    }
    let (write, movement) = match action {
        Action::Move(movement) => (None, Some(movement)),
        Action::Write(symbol) => (Some(symbol), None),
        Action::Noop => (None, None),
    };
    let state = lowering.graph.push(State::new(Transitions::Always(Transition {
        write,
        movement,
        next,
    })))?;
    lowering.cache.insert(key, state);
    Ok(state)
}

fn stop(site: &Site<'_>, next: Next) -> Result<StateId, CompileError> {
    if next != Next::Positional {
        return Err(CompileError::InappropriateUsage {
            index: site.index,
            command: "stop",
        });
    }
    if site.in_group {
        return Err(CompileError::InappropriateInGroup {
            index: site.index,
            command: "stop",
        });
    }
    Ok(StateId::HALT)
}

fn check(
    lowering: &mut Lowering,
    site: &Site<'_>,
    if_marked: i64,
    otherwise: i64,
    next: Next,
) -> Result<StateId, CompileError> {
    if next != Next::Positional {
        return Err(CompileError::InappropriateUsage {
            index: site.index,
            command: "check",
        });
    }
    if site.in_group {
        return Err(CompileError::InappropriateInGroup {
            index: site.index,
            command: "check",
        });
    }
    let marked = site.branch(if_marked)?;
    let blank = site.branch(otherwise)?;
    if if_marked == otherwise {
        return Err(CompileError::NonUniqueBranches { index: site.index });
    }
    if site.index == if_marked || site.index == otherwise {
        return Err(CompileError::PotentialInfiniteLoop { index: site.index });
    }

    let key = StateKey::Check { marked, blank };
    if let Some(state) = lowering.cache.get(&key) {
        return Ok(state);
    }
    let state = lowering.graph.push(State::new(Transitions::OnSymbol {
        marked: Transition::goto(marked),
        blank: Transition::goto(blank),
    }))?;
    lowering.cache.insert(key, state);
    Ok(state)
}

fn call(
    lowering: &mut Lowering,
    site: &Site<'_>,
    name: &str,
    next: Next,
    subroutines: &SubroutineTable,
) -> Result<StateId, CompileError> {
    if !post_ir::is_valid_subroutine_name(name) {
        return Err(CompileError::InvalidSubroutineName {
            name: name.to_owned(),
        });
    }
    let Some(entry) = subroutines.lookup(name) else {
        return Err(CompileError::UndefinedSubroutine {
            name: name.to_owned(),
        });
    };
    let continuation = site.continuation("call", next)?;
    wrap(lowering, entry, continuation)
}

fn group(
    lowering: &mut Lowering,
    site: &Site<'_>,
    commands: &[Instruction],
    next: Next,
    subroutines: &SubroutineTable,
) -> Result<StateId, CompileError> {
    if commands.is_empty() {
        return Err(CompileError::EmptyGroup { index: site.index });
    }
    if commands
        .iter()
        .any(|command| matches!(command, Instruction::Group { .. }))
    {
        return Err(CompileError::InvalidGroupCommand { index: site.index });
    }

    let numbered: Vec<(i64, &Instruction)> = (1..).zip(commands).collect();
    let entry = build_numbered(lowering, &numbered, subroutines, true)?;
    tracing::debug!(index = site.index, commands = commands.len(), "group inlined");

    let continuation = site.continuation("group", next)?;
    wrap(lowering, entry, continuation)
}

/// Wrap `entry` so that reaching Halt from it resumes at `continuation`.
///
/// Control returns through the no-op state for `continuation`. Wrappers are
/// shared between every site with the same entry and continuation. An entry
/// that is itself a wrapper (a group starting with a call) keeps its own
/// return: the new wrapper steps into it instead of copying its transitions.
fn wrap(
    lowering: &mut Lowering,
    entry: StateId,
    continuation: Target,
) -> Result<StateId, CompileError> {
    let return_state = action_state(lowering, Action::Noop, continuation)?;
    let Some(entry_state) = lowering.graph.state(entry) else {
        return Ok(return_state);
    };

    let key = StateKey::Wrap {
        entry,
        continuation,
    };
    if let Some(state) = lowering.cache.get(&key) {
        return Ok(state);
    }
    let transitions = if entry_state.return_to.is_some() {
        Transitions::Always(Transition::goto(Target::State(entry)))
    } else {
        entry_state.transitions.clone()
    };
    let wrapper = State {
        transitions,
        return_to: Some(Target::State(return_state)),
    };
    let state = lowering.graph.push(wrapper)?;
    lowering.cache.insert(key, state);
    Ok(state)
}

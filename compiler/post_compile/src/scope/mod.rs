//! Scope building.
//!
//! [`build_scope`] lowers one instruction map in three passes:
//!
//! 1. Classify keys into subroutine declarations and numbered instructions,
//!    rejecting anything else.
//! 2. Give every local subroutine a reference and an entry state *before*
//!    compiling any body, so bodies may call themselves or siblings declared
//!    later. Then compile each body as a child scope and bind its reference.
//! 3. Give every numbered instruction a reference, run its command producer
//!    in declaration order and bind the result.
//!
//! The scope's entry state is whatever its first declared index is bound to.

use post_ir::validate::looks_numeric;
use post_ir::{
    is_valid_subroutine_name, parse_index, Entry, Instruction, Scope, State, StateId, Transition,
    Transitions,
};

use crate::builder::{GraphBuilder, RefId, Target};
use crate::cache::StateCache;
use crate::commands::{produce, Site};
use crate::stack::ensure_sufficient_stack;
use crate::subroutines::SubroutineTable;
use crate::CompileError;

/// Mutable state shared by every scope of one compile.
#[derive(Debug, Default)]
pub struct Lowering {
    pub graph: GraphBuilder,
    pub cache: StateCache,
}

impl Lowering {
    pub fn new() -> Self {
        Self {
            graph: GraphBuilder::new(),
            cache: StateCache::new(),
        }
    }
}

/// Build a scope and return its entry state.
pub fn build_scope(
    lowering: &mut Lowering,
    scope: &Scope,
    inherited: &SubroutineTable,
) -> Result<StateId, CompileError> {
    ensure_sufficient_stack(|| {
        let (declared, numbered) = classify(scope)?;

        let mut subroutines = inherited.clone();
        let mut bodies = Vec::with_capacity(declared.len());
        for (name, body) in declared {
            let reference = lowering.graph.new_ref()?;
            let entry = lowering.graph.push(State::new(Transitions::Always(Transition::goto(
                Target::Ref(reference),
            ))))?;
            subroutines.declare(name, entry);
            bodies.push((name, body, reference));
        }
        for (name, body, reference) in bodies {
            let body_entry = build_scope(lowering, body, &subroutines)?;
            lowering.graph.bind(reference, body_entry);
            tracing::debug!(subroutine = name, entry = %body_entry, "subroutine bound");
        }

        build_numbered(lowering, &numbered, &subroutines, false)
    })
}

/// Build the numbered instructions of one scope and return its entry state.
///
/// Groups call this directly with synthetic indices `1..=n`.
pub fn build_numbered(
    lowering: &mut Lowering,
    numbered: &[(i64, &Instruction)],
    subroutines: &SubroutineTable,
    in_group: bool,
) -> Result<StateId, CompileError> {
    let Some(&(first, _)) = numbered.first() else {
        return Err(CompileError::EmptyScope);
    };

    let references = numbered
        .iter()
        .map(|&(index, _)| {
            lowering
                .graph
                .new_ref()
                .map(|reference| (index, reference))
        })
        .collect::<Result<Vec<(i64, RefId)>, CompileError>>()?;

    for (position, &(index, instruction)) in numbered.iter().enumerate() {
        let site = Site {
            index,
            positional_next: numbered.get(position + 1).map(|&(next, _)| next),
            references: &references,
            in_group,
        };
        let state = produce(lowering, &site, instruction, subroutines)?;
        lowering.graph.bind(references[position].1, state);
    }

    let entry = lowering
        .graph
        .bound(references[0].1)
        .ok_or(CompileError::UnboundReference)?;
    tracing::debug!(
        first,
        instructions = numbered.len(),
        in_group,
        %entry,
        "scope built"
    );
    Ok(entry)
}

type Classified<'a> = (Vec<(&'a str, &'a Scope)>, Vec<(i64, &'a Instruction)>);

/// Split a scope into subroutine declarations and numbered instructions.
fn classify(scope: &Scope) -> Result<Classified<'_>, CompileError> {
    let mut subroutines = Vec::new();
    let mut numbered: Vec<(i64, &Instruction)> = Vec::new();

    for (key, entry) in scope.entries() {
        if let Some(index) = parse_index(key) {
            let Entry::Instruction(instruction) = entry else {
                return Err(CompileError::InvalidInstruction { index });
            };
            if numbered.iter().any(|&(declared, _)| declared == index) {
                return Err(CompileError::DuplicateIndex { index });
            }
            numbered.push((index, instruction));
        } else if is_valid_subroutine_name(key) {
            let Entry::Subroutine(body) = entry else {
                return Err(CompileError::InvalidSubroutineBody {
                    name: key.to_owned(),
                });
            };
            subroutines.push((key, body));
        } else if looks_numeric(key) {
            return Err(CompileError::InvalidIndex {
                key: key.to_owned(),
            });
        } else {
            return Err(CompileError::InvalidSubroutineName {
                name: key.to_owned(),
            });
        }
    }

    if numbered.is_empty() {
        return Err(CompileError::EmptyScope);
    }
    Ok((subroutines, numbered))
}

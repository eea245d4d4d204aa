//! Compiler from Post machine programs to state graphs.
//!
//! [`compile`] takes a [`Scope`] (numbered instructions plus named,
//! nestable, possibly recursive subroutines) and produces a linked,
//! deduplicated [`StateGraph`] with a single entry state.
//!
//! # Architecture
//!
//! ```text
//! compile(scope)
//!     │
//!     ▼
//! build_scope ──► subroutine bodies (recursive, pre-registered)
//!     │
//!     ▼
//! build_numbered ──► produce (per instruction) ──► group bodies (recursive)
//!     │                   │
//!     │                   ▼
//!     │              StateCache (one per compile)
//!     ▼
//! GraphBuilder::finish ──► StateGraph
//! ```
//!
//! Compilation is atomic: it either returns a fully linked graph or the
//! first [`CompileError`] found in declaration order.

mod builder;
mod cache;
mod commands;
mod error;
mod scope;
mod stack;
mod subroutines;

use post_ir::{Scope, StateGraph, StateId};

pub use error::CompileError;

use crate::scope::{build_scope, Lowering};
use crate::subroutines::SubroutineTable;

/// A compiled program: a frozen graph and the state execution starts in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compiled {
    pub graph: StateGraph,
    pub entry: StateId,
}

/// Compile a program.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(program: &Scope) -> Result<Compiled, CompileError> {
    let mut lowering = Lowering::new();
    let entry = match build_scope(&mut lowering, program, &SubroutineTable::new()) {
        Ok(entry) => entry,
        Err(error) => {
            tracing::debug!(%error, "program rejected");
            return Err(error);
        }
    };

    let cached = lowering.cache.len();
    let built = lowering.graph.len();
    let graph = lowering.graph.finish()?;
    tracing::debug!(states = built, cached, %entry, "program compiled");
    tracing::trace!("state graph:\n{graph}");

    Ok(Compiled { graph, entry })
}

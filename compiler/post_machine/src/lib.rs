//! Post machine: compile a program, then run it against a tape.
//!
//! ```text
//! Scope ──compile──► Program { StateGraph, entry, Tape }
//!                        │
//!                        ├── run / run_on ──► step count or RunError
//!                        └── stepwise ──► Execution (Iterator<Item = Result<Step, RunError>>)
//! ```
//!
//! The program vocabulary and the compiler live in `post_ir` and
//! `post_compile`; the pieces a caller needs are re-exported here.

mod config;
mod engine;
mod program;
mod tape;

use std::sync::Once;

pub use config::{RunOptions, DEFAULT_STEPS_LIMIT};
pub use engine::{Execution, RunError, Step};
pub use post_compile::{compile, CompileError, Compiled};
pub use post_ir::{
    call, check, erase, group, left, mark, noop, right, stop, Entry, Instruction, Movement, Next,
    Scope, State, StateGraph, StateId, Symbol, Transition, Transitions,
};
pub use program::Program;
pub use tape::{Tape, TapeError};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only ever runs once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

//! Shared types for the Post machine compiler.
//!
//! This crate provides:
//!
//! - **Program model** ([`Scope`], [`Entry`], [`Instruction`], [`Next`]): the
//!   structured instruction map a program is written as. Numbered keys hold
//!   instructions, identifier keys hold subroutine bodies.
//!
//! - **Validators** ([`is_valid_index`], [`is_valid_subroutine_name`]): total
//!   predicates that classify scope keys before any graph is built.
//!
//! - **State graph** ([`StateGraph`], [`State`], [`StateId`]): the frozen,
//!   immutable automaton produced by `post_compile` and walked by the
//!   stepping engine in `post_machine`.
//!
//! # Crate Dependencies
//!
//! `post_ir` sits at the bottom of the workspace. `post_compile` lowers a
//! [`Scope`] into a [`StateGraph`]; `post_machine` runs that graph against a
//! tape of [`Symbol`]s.

pub mod graph;
pub mod program;
mod symbol;
pub mod validate;

pub use graph::{State, StateGraph, StateId, Transition, Transitions};
pub use program::{
    call, check, erase, group, left, mark, noop, right, stop, Entry, Instruction, Next, Scope,
};
pub use symbol::{Movement, Symbol};
pub use validate::{is_valid_index, is_valid_subroutine_name, parse_index};

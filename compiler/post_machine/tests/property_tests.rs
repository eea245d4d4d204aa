//! Property-based tests for compiled programs.
//!
//! Generated straight-line programs and tapes check that:
//! 1. Runs are deterministic: same program, same tape, same steps
//! 2. A straight line of primitive commands takes one step per command
//! 3. An implicit continuation into nothing, an explicit one into `stop` and
//!    a positional one into `stop` all compile to the same graph

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use post_machine::{
    erase, left, mark, noop, right, stop, Instruction, Program, RunOptions, Scope, Step, Tape,
};
use proptest::prelude::*;

// -- Strategies --

/// One of the commands that never branch or call.
fn primitive_strategy() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        Just(left()),
        Just(right()),
        Just(mark()),
        Just(erase()),
        Just(noop()),
    ]
}

fn tape_strategy() -> impl Strategy<Value = Tape> {
    prop::string::string_regex("[ *]{1,12}")
        .expect("valid regex")
        .prop_map(|text| text.parse().unwrap())
}

/// Two distinct instruction indices.
fn index_pair_strategy() -> impl Strategy<Value = (i64, i64)> {
    (1..10_000i64, 1..10_000i64).prop_filter("distinct", |(a, b)| a != b)
}

// -- Helpers --

fn straight_line(commands: &[Instruction]) -> Scope {
    (1..)
        .zip(commands)
        .fold(Scope::new(), |scope, (index, command)| {
            scope.instruction(index * 10, command.clone())
        })
}

fn trace(scope: &Scope, tape: Tape) -> (Vec<Step>, Tape) {
    let mut program = Program::compile(scope).unwrap();
    program.replace_tape(tape);
    let mut steps = Vec::new();
    program
        .run(RunOptions::default(), |step| steps.push(step.clone()))
        .unwrap();
    let tape = program.tape().clone();
    (steps, tape)
}

// -- Properties --

proptest! {
    #[test]
    fn runs_are_deterministic(
        commands in prop::collection::vec(primitive_strategy(), 1..16),
        tape in tape_strategy(),
    ) {
        let scope = straight_line(&commands);
        let first = trace(&scope, tape.clone());
        let second = trace(&scope, tape);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn one_step_per_primitive(
        commands in prop::collection::vec(primitive_strategy(), 1..16),
        tape in tape_strategy(),
    ) {
        let (steps, _) = trace(&straight_line(&commands), tape);
        let indices: Vec<usize> = steps.iter().map(|step| step.index).collect();
        let expected: Vec<usize> = (1..=commands.len()).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn halting_continuations_are_equivalent(
        command in primitive_strategy(),
        (index, stop_index) in index_pair_strategy(),
        tape in tape_strategy(),
    ) {
        let alone = Scope::new().instruction(index, command.clone());
        let explicit = Scope::new()
            .instruction(index, command.clone().then(stop_index))
            .instruction(stop_index, stop());
        let positional = Scope::new()
            .instruction(index, command)
            .instruction(stop_index, stop());

        let graphs: Vec<_> = [&alone, &explicit, &positional]
            .into_iter()
            .map(|scope| Program::compile(scope).unwrap().graph().clone())
            .collect();
        prop_assert_eq!(&graphs[0], &graphs[1]);
        prop_assert_eq!(&graphs[0], &graphs[2]);

        let expected = trace(&alone, tape.clone());
        prop_assert_eq!(&trace(&explicit, tape.clone()), &expected);
        prop_assert_eq!(&trace(&positional, tape), &expected);
    }
}

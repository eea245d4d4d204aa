#![allow(clippy::unwrap_used)]

use post_ir::{State, Transition, Transitions};
use pretty_assertions::assert_eq;

use super::*;

fn id(raw: u32) -> StateId {
    StateId::new(raw)
}

fn write(symbol: Symbol, next: StateId) -> State {
    State::new(Transitions::Always(Transition {
        write: Some(symbol),
        movement: None,
        next,
    }))
}

fn shift(movement: Movement, next: StateId) -> State {
    State::new(Transitions::Always(Transition {
        write: None,
        movement: Some(movement),
        next,
    }))
}

fn run_all(graph: &StateGraph, entry: StateId, tape: &mut Tape, limit: usize) -> Vec<Result<Step, RunError>> {
    Execution::new(graph, entry, tape, limit).collect()
}

#[test]
fn halt_entry_takes_no_steps() {
    let graph = StateGraph::default();
    let mut tape = Tape::new();
    let mut execution = Execution::new(&graph, StateId::HALT, &mut tape, 10);

    assert!(execution.is_halted());
    assert!(execution.next().is_none());
    assert_eq!(execution.steps(), 0);
}

#[test]
fn single_write() {
    let graph = StateGraph::from_states(vec![write(Symbol::Mark, StateId::HALT)]);
    let mut tape = Tape::new();
    let steps = run_all(&graph, id(1), &mut tape, 10);

    assert_eq!(
        steps,
        vec![Ok(Step {
            index: 1,
            state: id(1),
            symbol_before: Symbol::Blank,
            symbol_after: Symbol::Mark,
            movement: None,
            next: StateId::HALT,
        })]
    );
    assert_eq!(tape.to_string(), "*");
}

#[test]
fn step_limit_is_reported_once() {
    // s1 -> s2 -> s1 ...
    let graph = StateGraph::from_states(vec![
        shift(Movement::Right, id(2)),
        shift(Movement::Left, id(1)),
    ]);
    let mut tape = Tape::new();
    let steps = run_all(&graph, id(1), &mut tape, 3);

    assert_eq!(steps.len(), 4);
    assert!(steps[..3].iter().all(Result::is_ok));
    assert_eq!(steps[3], Err(RunError::LongExecution { limit: 3 }));
}

#[test]
fn halting_exactly_at_the_limit_is_fine() {
    let graph = StateGraph::from_states(vec![
        write(Symbol::Mark, id(2)),
        shift(Movement::Right, StateId::HALT),
    ]);
    let mut tape = Tape::new();
    let steps = run_all(&graph, id(1), &mut tape, 2);

    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(Result::is_ok));
}

#[test]
fn halt_inside_a_wrapper_returns() {
    // s1 wraps s2 and returns to s3.
    let mut wrapper = State::new(Transitions::Always(Transition::goto(id(2))));
    wrapper.return_to = Some(id(3));
    let graph = StateGraph::from_states(vec![
        wrapper,
        write(Symbol::Mark, StateId::HALT),
        shift(Movement::Right, StateId::HALT),
    ]);
    let mut tape = Tape::new();
    let visited: Vec<_> = run_all(&graph, id(1), &mut tape, 10)
        .into_iter()
        .map(|step| step.map(|step| (step.state, step.next)))
        .collect();

    assert_eq!(
        visited,
        vec![
            Ok((id(1), id(2))),
            Ok((id(2), id(3))),
            Ok((id(3), StateId::HALT)),
        ]
    );
    assert_eq!(tape.to_string(), "* ");
    assert_eq!(tape.position(), 1);
}

#[test]
fn branch_follows_current_symbol() {
    let graph = StateGraph::from_states(vec![
        State::new(Transitions::OnSymbol {
            marked: Transition::goto(id(2)),
            blank: Transition::goto(id(3)),
        }),
        write(Symbol::Blank, StateId::HALT),
        write(Symbol::Mark, StateId::HALT),
    ]);

    let mut marked: Tape = "*".parse().unwrap();
    run_all(&graph, id(1), &mut marked, 10);
    assert_eq!(marked.to_string(), " ");

    let mut blank = Tape::new();
    let mut execution = Execution::new(&graph, id(1), &mut blank, 10);
    assert_eq!(execution.next().map(|step| step.map(|s| s.next)), Some(Ok(id(3))));
    assert_eq!(execution.current(), id(3));
    assert!(execution.next().is_some());
    assert!(execution.is_halted());
    assert_eq!(execution.tape().to_string(), "*");
}

#![allow(clippy::unwrap_used)]

use post_ir::{Transition, Transitions};
use pretty_assertions::assert_eq;

use super::*;

fn goto(target: Target) -> State<Target> {
    State::new(Transitions::Always(Transition::goto(target)))
}

#[test]
fn states_are_numbered_from_one() {
    let mut builder = GraphBuilder::new();
    let first = builder.push(goto(Target::HALT)).unwrap();
    let second = builder.push(goto(Target::State(first))).unwrap();

    assert_eq!(first, StateId::new(1));
    assert_eq!(second, StateId::new(2));
    assert_eq!(builder.len(), 2);
    assert!(builder.state(StateId::HALT).is_none());
    assert_eq!(builder.state(second), Some(&goto(Target::State(first))));
}

#[test]
fn forward_reference_resolves_on_finish() {
    let mut builder = GraphBuilder::new();
    let forward = builder.new_ref().unwrap();
    let first = builder.push(goto(Target::Ref(forward))).unwrap();
    assert_eq!(builder.bound(forward), None);

    let second = builder.push(goto(Target::HALT)).unwrap();
    builder.bind(forward, second);
    assert_eq!(builder.bound(forward), Some(second));

    let graph = builder.finish().unwrap();
    assert_eq!(graph.successors(first), vec![second]);
}

#[test]
fn self_reference_builds_a_cycle() {
    let mut builder = GraphBuilder::new();
    let this = builder.new_ref().unwrap();
    let state = builder.push(goto(Target::Ref(this))).unwrap();
    builder.bind(this, state);

    let graph = builder.finish().unwrap();
    assert!(graph.has_cycle_from(state));
}

#[test]
fn unbound_reference_fails_to_freeze() {
    let mut builder = GraphBuilder::new();
    let dangling = builder.new_ref().unwrap();
    builder.push(goto(Target::Ref(dangling))).unwrap();

    assert_eq!(builder.finish(), Err(CompileError::UnboundReference));
}

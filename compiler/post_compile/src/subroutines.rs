//! Subroutine symbol table.
//!
//! Maps each visible subroutine name to its entry state. A child scope starts
//! from a clone of its parent's table and declares its own subroutines on top,
//! so names accumulate downward and a local declaration shadows an outer one
//! for that subtree only.

use post_ir::StateId;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct SubroutineTable {
    entries: FxHashMap<String, StateId>,
}

impl SubroutineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or shadow) a subroutine.
    pub fn declare(&mut self, name: &str, entry: StateId) {
        self.entries.insert(name.to_owned(), entry);
    }

    /// Look up the entry state of a visible subroutine.
    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.entries.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_table_inherits_and_shadows() {
        let mut parent = SubroutineTable::new();
        parent.declare("Outer", StateId::new(1));
        parent.declare("Shared", StateId::new(2));

        let mut child = parent.clone();
        child.declare("Shared", StateId::new(3));
        child.declare("Inner", StateId::new(4));

        assert_eq!(child.lookup("Outer"), Some(StateId::new(1)));
        assert_eq!(child.lookup("Shared"), Some(StateId::new(3)));
        assert_eq!(parent.lookup("Shared"), Some(StateId::new(2)));
        assert_eq!(parent.lookup("Inner"), None);
    }
}

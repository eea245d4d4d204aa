//! Compile errors.
//!
//! Every variant is fatal: the first rule violation found in declaration
//! order aborts the compile, and no partial graph escapes.

/// A structural problem in a program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A scope holds no numbered instructions.
    #[error("there are no instructions")]
    EmptyScope,

    /// A key looks numeric but is not a nonzero integer.
    #[error("invalid instruction index: '{key}'")]
    InvalidIndex { key: String },

    /// Two keys in one scope name the same integer.
    #[error("duplicate instruction index: {index}")]
    DuplicateIndex { index: i64 },

    /// A non-numeric key, or a called name, is not an identifier.
    #[error("invalid subroutine name: '{name}'")]
    InvalidSubroutineName { name: String },

    /// A subroutine key holds an instruction instead of a scope.
    #[error("invalid body of the '{name}' subroutine")]
    InvalidSubroutineBody { name: String },

    /// A numbered key holds a scope instead of an instruction.
    #[error("invalid instruction at {index}")]
    InvalidInstruction { index: i64 },

    #[error("empty group at instruction {index}")]
    EmptyGroup { index: i64 },

    /// A group contains something that cannot be inlined, such as another group.
    #[error("invalid command in the group at instruction {index}")]
    InvalidGroupCommand { index: i64 },

    /// A continuation names an index not declared in the same scope.
    #[error("invalid next instruction index {target} at instruction {index}")]
    InvalidNextIndex { index: i64, target: i64 },

    /// A non-branching command continues to itself.
    #[error("infinite loop at instruction {index}")]
    InfiniteLoop { index: i64 },

    /// A check branches back to itself.
    #[error("potential infinite loop at instruction {index}")]
    PotentialInfiniteLoop { index: i64 },

    /// A check sends both symbols to the same instruction.
    #[error("next instruction indexes for the check at {index} must be unique")]
    NonUniqueBranches { index: i64 },

    #[error("undefined '{name}' subroutine")]
    UndefinedSubroutine { name: String },

    /// `check` or `stop` in a group, or an explicit continuation in a group.
    #[error("inappropriate '{command}' command usage in a group at instruction {index}")]
    InappropriateInGroup { index: i64, command: &'static str },

    /// An explicit continuation on a command that takes none.
    #[error("inappropriate '{command}' command usage at instruction {index}")]
    InappropriateUsage { index: i64, command: &'static str },

    /// The program needs more states than a [`StateId`](post_ir::StateId) can address.
    #[error("program is too large")]
    TooManyStates,

    /// A forward reference was never bound. Indicates a compiler bug.
    #[error("unbound state reference")]
    UnboundReference,
}

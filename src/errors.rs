use std::io;
use thiserror::Error;

/// Tape machine errors, raised while executing emitted code
#[derive(Debug, Error)]
pub enum VMError {
    #[error("Memory access out of bounds at cell {0}")]
    MemoryOutOfBounds(isize),
    #[error("Unmatched bracket at instruction {0}")]
    BracketMismatch(usize),
    #[error("Execution timeout after {0} steps")]
    ExecutionTimeout(u64),
    #[error("Input exhausted")]
    InputExhausted,
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Code generation errors. None of these are recoverable: generation stops and
/// whatever code was produced so far must be discarded.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("'{0}' does not exist")]
    VariableNotFound(String),
    #[error("'{name}' lives in cell {cell_index}, which is not behind the pointer at {pointer}")]
    VariableNotBehind {
        name: String,
        cell_index: usize,
        pointer: usize,
    },
    #[error("Unexpected token {0}")]
    UnexpectedToken(String),
    #[error("Invalid literal {0}")]
    InvalidLiteral(String),
    #[error("Operator {0} needs a variable operand")]
    MissingVariable(String),
    #[error("Flag cell at offset {flag_offset} lies inside the body's scratch cells (..{window_end})")]
    ScratchOverlap {
        flag_offset: usize,
        window_end: usize,
    },
}

impl CompileError {
    /// Semantic errors come from the source program (e.g. an undeclared
    /// identifier). Everything else means the front-end handed the generator
    /// something it should never have.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            CompileError::VariableNotFound(_) | CompileError::VariableNotBehind { .. }
        )
    }
}

// For tape machine runs
pub type VMResult<T> = std::result::Result<T, VMError>;

// For code generation
pub type CompileResult<T> = std::result::Result<T, CompileError>;

// For the command line and demos, where errors are only reported
pub type Result<T> = anyhow::Result<T>;

//! Code generation back end for compiling a small C-like language to Brainfuck.
//!
//! Every generator returns a self-contained snippet of Brainfuck (`Code`) that works
//! relative to the pointer position it starts at. Snippets follow the "next available
//! cell" convention: the pointer sits on the first free cell, everything to its left
//! is live, and a snippet that produces a value leaves it in that cell and steps onto
//! the next one.

pub mod arith;
pub mod array;
pub mod bf;
pub mod code;
pub mod conditional;
pub mod console;
pub mod encoder;
pub mod errors;
pub mod movement;
pub mod operand;
pub mod symbols;
pub mod tape;
pub mod token;
pub mod unary;

pub use arith::{binary_op_code, CodegenOptions};
pub use bf::BF;
pub use code::Code;
pub use errors::{CompileError, CompileResult, VMError, VMResult};
pub use symbols::SymbolTable;
pub use tape::{ScratchWindow, TapeCursor};
pub use token::{BinaryOp, Token, TokenKind, UnaryOp};
pub use unary::Fixity;

use std::collections::HashMap;

use log::debug;

use crate::errors::{CompileError, CompileResult};
use crate::tape::TapeCursor;
use crate::token::{Token, TokenKind};

/// A declared variable and the tape cell it lives in. Arrays occupy consecutive
/// cells starting at `cell_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub cell_index: usize,
    pub dimensions: Vec<usize>,
}

/// Identifiers declared in one block.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    ids: HashMap<String, Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, cell_index: usize, dimensions: Vec<usize>) {
        self.ids.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                cell_index,
                dimensions,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.ids.get(name)
    }
}

/// The chain of scopes visible at some point of the program, built by the front-end.
/// Lookups search the innermost scope first.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    // outermost first; searched in reverse
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// A table with a single, global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop_scope(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `name` in the innermost scope, opening one if there is none.
    pub fn declare(&mut self, name: &str, cell_index: usize, dimensions: Vec<usize>) {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.declare(name, cell_index, dimensions);
        }
    }

    pub fn lookup(&self, id: &Token) -> CompileResult<&Variable> {
        if id.kind != TokenKind::Id {
            return Err(CompileError::UnexpectedToken(id.to_string()));
        }
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&id.data))
            .ok_or_else(|| {
                debug!("lookup of '{}' failed in {} scopes", id.data, self.depth());
                CompileError::VariableNotFound(id.data.clone())
            })
    }

    pub fn cell_index(&self, id: &Token) -> CompileResult<usize> {
        Ok(self.lookup(id)?.cell_index)
    }

    pub fn dimensions(&self, id: &Token) -> CompileResult<&[usize]> {
        Ok(&self.lookup(id)?.dimensions)
    }

    /// How far left of the cursor the variable's cell is.
    pub fn offset_to_variable(&self, id: &Token, cursor: TapeCursor) -> CompileResult<usize> {
        let variable = self.lookup(id)?;
        cursor
            .offset_to(variable.cell_index)
            .ok_or_else(|| CompileError::VariableNotBehind {
                name: variable.name.clone(),
                cell_index: variable.cell_index,
                pointer: cursor.pointer(),
            })
    }
}

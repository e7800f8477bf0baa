use crate::code::Code;
use crate::errors::{CompileError, CompileResult};
use crate::movement::{copy_back_code, copy_from_offset_code};
use crate::symbols::SymbolTable;
use crate::tape::TapeCursor;
use crate::token::{Token, UnaryOp};

/// Whether the operator is written before or after its operand. For the mutating
/// operators this decides if the expression sees the new or the old value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

/// Code for a prefix operator.
///
/// `!` and `~` work on the value at the pointer, clearing and using the next cell,
/// and leave the pointer on that next cell. The other operators copy the variable
/// `offset_to_variable` cells to the left into the current cell, change both the copy
/// and the variable, and also end on the next cell.
pub fn unary_prefix_code(op: UnaryOp, offset_to_variable: Option<usize>) -> CompileResult<Code> {
    let mut code = Code::new();
    match op {
        UnaryOp::Not => {
            code.right(1).clear().add(1).left(1); // temp = 1
            code.raw("[>-<[-]]"); // a != 0: temp = 0, a = 0
            code.right(1).raw("[<+>-]"); // temp != 0: a = 1
        }
        UnaryOp::BitwiseNot => {
            code.right(1).clear().left(1); // temp = 0
            code.raw("[>+<-]"); // a -> temp
            code.right(1).raw("+[<->-]"); // a = -(temp + 1)
        }
        _ => {
            let offset = offset_to_variable.ok_or_else(|| CompileError::MissingVariable(op.symbol().to_string()))?;
            let edit = match op {
                UnaryOp::Increment => "+",
                UnaryOp::Decrement => "-",
                UnaryOp::Modulo => "[-]",
                _ => "",
            };
            code.append(&copy_back_code(offset, edit, edit));
        }
    }
    Ok(code)
}

/// Code for a postfix operator: the current cell gets the variable's old value and
/// only the variable changes. Only the variable-mutating operators have a postfix
/// form.
pub fn unary_postfix_code(op: UnaryOp, offset_to_variable: usize) -> CompileResult<Code> {
    let edit = match op {
        UnaryOp::Increment => "+",
        UnaryOp::Decrement => "-",
        UnaryOp::Power | UnaryOp::Divide => "",
        UnaryOp::Modulo => "[-]",
        UnaryOp::BitwiseNot | UnaryOp::Not => {
            return Err(CompileError::UnexpectedToken(format!("postfix {}", op.symbol())))
        }
    };
    Ok(copy_back_code(offset_to_variable, "", edit))
}

/// Applies `op` to variable `id` and leaves the expression's value in the current
/// cell. Returns the cursor of the next available cell.
pub fn variable_unary_code(
    symbols: &SymbolTable,
    id: &Token,
    op: UnaryOp,
    fixity: Fixity,
    cursor: TapeCursor,
) -> CompileResult<(Code, TapeCursor)> {
    let offset = symbols.offset_to_variable(id, cursor)?;
    let code = match fixity {
        Fixity::Postfix => unary_postfix_code(op, offset)?,
        Fixity::Prefix if op.mutates_variable() => unary_prefix_code(op, Some(offset))?,
        Fixity::Prefix => {
            // evaluate the variable, then work on the copy
            let mut code = copy_from_offset_code(offset);
            code.left(1).append(&unary_prefix_code(op, None)?);
            code
        }
    };
    Ok((code, cursor.advance(1)))
}

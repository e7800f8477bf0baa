use crate::code::Code;
use crate::errors::{CompileError, CompileResult};
use crate::symbols::SymbolTable;
use crate::tape::TapeCursor;
use crate::token::Token;

/// Moves the current cell's value `offset` cells to the left. The destination is
/// cleared first; the source ends up zero and the pointer stays on it, which makes
/// it the next available cell.
pub fn move_to_offset_code(offset: usize) -> Code {
    debug_assert!(offset > 0);
    let mut code = Code::new();
    code.left(offset).clear().right(offset); // clear destination
    code.begin_loop()
        .left(offset)
        .add(1)
        .right(offset)
        .sub(1)
        .end_loop();
    code
}

/// Copies the current cell's value `offset` cells to the left, going through the
/// next cell as a temporary. The source keeps its value and the pointer stays on it.
pub fn copy_to_offset_code(offset: usize) -> Code {
    debug_assert!(offset > 0);
    let mut code = Code::new();
    code.right(1).clear(); // temp = 0
    code.left(offset + 1).clear().right(offset); // destination = 0
    code.begin_loop() // source -> temp and destination
        .right(1)
        .add(1)
        .left(offset + 1)
        .add(1)
        .right(offset)
        .sub(1)
        .end_loop();
    code.right(1).raw("[<+>-]").left(1); // temp -> source
    code
}

/// Copies the cell `offset` cells to the left into the current cell, using the next
/// cell as a temporary. The pointer ends on that (zero) temporary.
pub fn copy_from_offset_code(offset: usize) -> Code {
    copy_back_code(offset, "", "")
}

/// The copy behind `copy_from_offset_code`, with hooks for changing the copy and
/// the original on the way.
///
/// The source cell is drained into the result (current cell) and the temp (next
/// cell). `result_edit` then runs on the result and `variable_edit` on the temp
/// before the temp is poured back into the source.
pub(crate) fn copy_back_code(offset: usize, result_edit: &str, variable_edit: &str) -> Code {
    debug_assert!(offset > 0);
    let mut code = Code::new();
    code.clear().right(1).clear(); // result = 0, temp = 0
    code.left(offset + 1)
        .begin_loop()
        .right(offset)
        .raw("+>+")
        .left(offset + 1)
        .sub(1)
        .end_loop();
    code.right(offset).raw(result_edit);
    code.right(1).raw(variable_edit);
    code.begin_loop()
        .left(offset + 1)
        .add(1)
        .right(offset + 1)
        .sub(1)
        .end_loop();
    code
}

/// Copies the current cell into variable `id`. The pointer does not move.
pub fn copy_to_variable_code(symbols: &SymbolTable, id: &Token, cursor: TapeCursor) -> CompileResult<Code> {
    let offset = symbols.offset_to_variable(id, cursor)?;
    Ok(copy_to_offset_code(offset))
}

/// Copies variable `id` into the current cell and moves on to the next one.
pub fn copy_from_variable_code(
    symbols: &SymbolTable,
    id: &Token,
    cursor: TapeCursor,
) -> CompileResult<(Code, TapeCursor)> {
    let offset = symbols.offset_to_variable(id, cursor)?;
    Ok((copy_from_offset_code(offset), cursor.advance(1)))
}

/// Moves the current cell into a function's return value cell.
pub fn move_to_return_value_cell_code(return_value_cell: usize, cursor: TapeCursor) -> CompileResult<Code> {
    let offset = cursor
        .offset_to(return_value_cell)
        .ok_or_else(|| CompileError::VariableNotBehind {
            name: "return value".to_string(),
            cell_index: return_value_cell,
            pointer: cursor.pointer(),
        })?;
    Ok(move_to_offset_code(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bf::BF;
    use pretty_assertions::assert_eq;

    fn tape_with(value: u8, at: usize, len: usize) -> Vec<u8> {
        let mut cells = vec![0u8; len];
        cells[at] = value;
        cells
    }

    #[test]
    fn test_move_to_offset() {
        let mut cells = tape_with(42, 3, 6);
        cells[0] = 9; // overwritten
        let mut bf = BF::new(move_to_offset_code(3).as_str())
            .with_cells(&cells)
            .with_pointer(3);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(6), &[42, 0, 0, 0, 0, 0]);
        assert_eq!(bf.pointer(), 3);
    }

    #[test]
    fn test_copy_to_offset_keeps_source() {
        for offset in 1..=20 {
            for value in 0..=255u8 {
                let mut cells = tape_with(value, offset, offset + 2);
                cells[0] = 17;
                cells[offset + 1] = 3; // stale temp
                let mut bf = BF::new(copy_to_offset_code(offset).as_str())
                    .with_memory_size(offset + 2)
                    .with_cells(&cells)
                    .with_pointer(offset);
                bf.run().unwrap();
                let tape = bf.dump_cells(offset + 2);
                assert_eq!(
                    (tape[0], tape[offset], tape[offset + 1], bf.pointer()),
                    (value, value, 0, offset)
                );
            }
        }
    }

    #[test]
    fn test_copy_from_offset() {
        let mut cells = tape_with(77, 0, 6);
        cells[4] = 5;
        cells[5] = 6;
        let mut bf = BF::new(copy_from_offset_code(4).as_str())
            .with_cells(&cells)
            .with_pointer(4);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(6), &[77, 0, 0, 0, 77, 0]);
        assert_eq!(bf.pointer(), 5);
    }

    #[test]
    fn test_move_then_copy_back_round_trip() {
        for value in [0u8, 1, 128, 255] {
            let mut code = move_to_offset_code(5);
            code.append(&copy_from_offset_code(5));
            let mut bf = BF::new(code.as_str())
                .with_cells(&tape_with(value, 5, 7))
                .with_pointer(5);
            bf.run().unwrap();
            assert_eq!(bf.dump_cells(7)[5], value);
            assert_eq!(bf.dump_cells(7)[0], value);
        }
    }

    #[test]
    fn test_variable_copies() {
        let mut symbols = SymbolTable::new();
        symbols.declare("x", 1, vec![]);
        let cursor = TapeCursor::at(4);

        let (code, after) = copy_from_variable_code(&symbols, &Token::id("x"), cursor).unwrap();
        assert_eq!(after, TapeCursor::at(5));
        let mut bf = BF::new(code.as_str()).with_cells(&[0, 33]).with_pointer(4);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(6), &[0, 33, 0, 0, 33, 0]);
        assert_eq!(bf.pointer(), after.pointer());

        let code = copy_to_variable_code(&symbols, &Token::id("x"), cursor).unwrap();
        let mut bf = BF::new(code.as_str())
            .with_cells(&[0, 1, 0, 0, 90])
            .with_pointer(4);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(6), &[0, 90, 0, 0, 90, 0]);
        assert_eq!(bf.pointer(), 4);
    }

    #[test]
    fn test_unknown_variable() {
        let symbols = SymbolTable::new();
        let err = copy_to_variable_code(&symbols, &Token::id("ghost"), TapeCursor::at(3)).unwrap_err();
        assert!(err.is_semantic());
    }

    #[test]
    fn test_move_to_return_value_cell() {
        let code = move_to_return_value_cell_code(2, TapeCursor::at(6)).unwrap();
        let mut bf = BF::new(code.as_str()).with_cells(&[0, 0, 4, 0, 0, 0, 200]).with_pointer(6);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(7), &[0, 0, 200, 0, 0, 0, 0]);
        assert!(move_to_return_value_cell_code(6, TapeCursor::at(6)).is_err());
    }
}

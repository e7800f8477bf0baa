//! Walking the pointer by a run-time amount.
//!
//! Brainfuck cannot address a cell by a computed index, so array access moves the
//! whole working area instead: the index travels along with the pointer, one cell per
//! step, until it runs out.

use crate::code::Code;

/// Runs `index_code`, which must evaluate the index into the current cell and step
/// onto the next one, then walks right `index` cells.
///
/// Afterwards the cell that held the index when the walk stopped is zero and the
/// next one holds the number of steps taken (the original index). The pointer ends
/// on the cell after that.
pub fn move_right_index_cells_code(index_code: &Code) -> Code {
    let mut code = index_code.clone();
    code.clear().left(1); // counter = 0

    code.begin_loop()
        .right(2)
        .clear()
        .left(1)
        .add(1)
        .raw("[>+<-]") // counter + 1 -> next cell
        .left(1)
        .sub(1)
        .raw("[>+<-]") // index - 1 -> next cell
        .right(1)
        .end_loop();

    code.right(2);
    code
}

/// Walks left by the index under the pointer, carrying the value in the cell before
/// it along. The value ends up `index` cells further left and the pointer on the cell
/// after it.
pub fn move_left_index_cell_code() -> Code {
    let mut code = Code::new();
    code.begin_loop()
        .left(1)
        .raw("[<+>-]") // value one cell left
        .right(1)
        .sub(1)
        .raw("[<+>-]") // index one cell left
        .left(1)
        .end_loop();
    code
}

use crate::code::Code;
use crate::errors::CompileResult;
use crate::tape::ScratchWindow;

/// Wraps `body` in "if the current cell is zero".
///
/// A flag cell `flag_offset` cells to the right is set to 1 and cleared if the current
/// cell is non-zero; the body then runs only while the flag is still up. The current
/// cell is always zero afterwards, whichever branch was taken.
///
/// `body` starts and must end on the current cell. `body_window` lists the cells right
/// of the current one that the body writes to, and the flag has to lie past all of
/// them.
pub fn if_zero(body: &Code, body_window: ScratchWindow, flag_offset: usize) -> CompileResult<Code> {
    body_window.ensure_outside(flag_offset)?;

    let mut code = Code::new();
    code.right(flag_offset).clear().add(1).left(flag_offset); // flag = 1

    code.begin_loop() // cell != 0: drop the flag, zero the cell
        .right(flag_offset)
        .sub(1)
        .left(flag_offset)
        .clear()
        .end_loop();

    code.right(flag_offset)
        .begin_loop()
        .left(flag_offset)
        .append(body)
        .right(flag_offset)
        .sub(1)
        .end_loop()
        .left(flag_offset);

    Ok(code)
}

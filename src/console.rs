use log::trace;

use crate::code::Code;
use crate::encoder::set_cell_value_code;

/// Prints an 8-bit cell in decimal, without leading zeros. This is the well known
/// esolangs.org routine: it expects the value in the current cell and the ten cells
/// after it zeroed, and leaves the value and the pointer where they were.
const PRINT_CELL_AS_DECIMAL: &str = concat!(
    ">>++++++++++<<[->+>-[>+>>]>[+[-<+>]>+>>]<<<<<<]>>[-]>>>++++++++++<[->-[>+>>]>[+[-",
    "<+>]>+>>]<<<<<]>[-]>>[>++++++[-<++++++++>]<.<<+>+>[-]]<[<[->-<]++++++[->++++++++",
    "<]>.[-]]<<++++++[-<++++++++>]<.[-]<<[-<+>]<",
);

/// Reads a decimal number terminated by a newline into the current cell.
///
/// Layout: `result, tmp, input, loop`, pointer on `result` before and after. Input
/// must end with `\n`; there is no end-of-input handling.
pub fn read_int_code() -> Code {
    let mut code = Code::new();
    code.clear(); // result = 0
    code.right(1).clear(); // tmp = 0
    code.right(2).clear().add(1); // loop = 1

    code.begin_loop()
        .clear()
        .left(1)
        .input()
        .sub(10) // newline check
        .begin_loop()
        .right(1)
        .add(1) // keep reading
        .left(3)
        .raw("[>+<-]") // result -> tmp
        .right(1)
        .raw("[<++++++++++>-]") // result = tmp * 10
        .right(1)
        .sub(usize::from(b'0') - 10) // digit value
        .raw("[<<+>>-]") // result += digit
        .end_loop()
        .right(1)
        .end_loop();

    code.left(3);
    code
}

/// Prints the cell after the pointer as a decimal number. The pointer starts and
/// ends on the cell before it (the return value cell); the printed value is kept.
/// Clears and uses the ten cells after the value.
pub fn print_int_code() -> Code {
    let mut code = Code::new();
    code.right(1);
    for _ in 0..10 {
        code.right(1).clear();
    }
    code.left(10);
    code.raw(PRINT_CELL_AS_DECIMAL);
    code.left(1);
    code
}

/// Reads one byte into the current cell.
pub fn read_char_code() -> Code {
    let mut code = Code::new();
    code.input();
    code
}

/// Prints the cell after the pointer; the pointer stays put.
pub fn print_char_code() -> Code {
    let mut code = Code::new();
    code.right(1).output().left(1);
    code
}

/// Prints `text` (its UTF-8 bytes) using the current and next cell. Each byte is
/// reached from the previous one rather than from zero.
pub fn print_string_code(text: &str) -> Code {
    let mut code = Code::new();
    code.clear().right(1).clear().left(1);

    let mut previous = 0;
    for byte in text.bytes() {
        let step = set_cell_value_code(byte, previous, false);
        trace!("{:?} -> {:?}: {} instructions", previous as char, byte as char, step.len());
        code.append(&step).output();
        previous = byte;
    }
    code
}

//! Binary operators.
//!
//! Every routine here starts with the first operand `a` under the pointer and the
//! second operand `b` in the next cell. It leaves the result in `a`'s cell and the
//! pointer on the cell after it, which becomes the next available cell. Cells past
//! `a` up to `BinaryOp::scratch` are overwritten freely; a routine clears any cell it
//! reads before using it, so stale values there are fine.

use log::debug;

use crate::code::Code;
use crate::conditional::if_zero;
use crate::console::print_string_code;
use crate::errors::CompileResult;
use crate::tape::ScratchWindow;
use crate::token::BinaryOp;

/// Printed by the division guard before the program hangs.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Error - Division by zero\n";

/// Per-bit combinators for `bitwise_code`: start on the first bit, the second bit
/// is in the next cell and the result bit goes two cells to the left.
const AND_BITS: &str = "[->[-<<+>>]<]>[-]";
const OR_BITS: &str = "[>+<-]>[[-]<<+>>]";
const XOR_BITS: &str = "[>-<-]>[[-]<<+>>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Guard `/` and `%` against a zero divisor: the emitted program prints
    /// `DIVISION_BY_ZERO_MESSAGE` and then loops forever.
    pub division_by_zero_check: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            division_by_zero_check: true,
        }
    }
}

pub fn binary_op_code(op: BinaryOp, options: &CodegenOptions) -> CompileResult<Code> {
    let mut code = Code::new();
    match op {
        BinaryOp::Add => {
            code.raw(">[<+>-]");
        }
        BinaryOp::Sub => {
            code.raw(">[<->-]");
        }
        BinaryOp::Mul => {
            code.append(&multiply_code());
        }
        BinaryOp::Div => {
            code.append(&divmod_code(options)?);
            code.right(3).raw("[<<<+>>>-]").left(2); // a = a / b
        }
        BinaryOp::Mod => {
            code.append(&divmod_code(options)?);
            code.right(2).raw("[<<+>>-]").left(1); // a = a % b
        }
        BinaryOp::Eq => {
            code.raw("[->-<]+"); // b -= a, a = 1
            code.right(1).raw("[<->[-]]"); // b != 0: a = 0
        }
        BinaryOp::Ne => {
            code.raw("[->-<]"); // b -= a
            code.right(1).raw("[<+>[-]]"); // b != 0: a = 1
        }
        BinaryOp::Gt => {
            code.append(&race_code(Driver::First, true));
        }
        BinaryOp::Le => {
            code.append(&race_code(Driver::First, false));
        }
        BinaryOp::Lt => {
            code.append(&race_code(Driver::Second, true));
        }
        BinaryOp::Ge => {
            code.append(&race_code(Driver::Second, false));
        }
        BinaryOp::And => {
            code.append(&logical_and_code());
        }
        BinaryOp::Or => {
            code.append(&logical_or_code());
        }
        BinaryOp::Shl => {
            code.append(&shift_left_code());
        }
        BinaryOp::Shr => {
            code.append(&shift_right_code());
        }
        BinaryOp::BitAnd => {
            code.append(&bitwise_code(Code::new().raw(AND_BITS)));
        }
        BinaryOp::BitOr => {
            code.append(&bitwise_code(Code::new().raw(OR_BITS)));
        }
        BinaryOp::BitXor => {
            code.append(&bitwise_code(Code::new().raw(XOR_BITS)));
        }
    }
    Ok(code)
}

// a, b, t1, t2
fn multiply_code() -> Code {
    let mut code = Code::new();
    code.right(2).clear().right(1).clear().left(3);
    code.raw("[>>>+<<<-]"); // a -> t2, which counts down
    code.right(3)
        .begin_loop()
        .left(2)
        .raw("[<+>>+<-]") // a += b, b -> t1
        .right(1)
        .raw("[<+>-]") // t1 -> b
        .right(1)
        .sub(1)
        .end_loop();
    code.left(2);
    code
}

/// `a, b` becomes `0, b - a % b, a % b, a / b` with the pointer on the first cell.
/// Uses two more cells after those four.
///
/// The loop counts `a` down while counting `b` down and `w` up in step. Whenever
/// `b` reaches zero a whole `b` has been taken out: `x` goes up by one and `w` is
/// poured back into `b`.
pub fn divmod_code(options: &CodegenOptions) -> CompileResult<Code> {
    let mut code = Code::new();

    if options.division_by_zero_check {
        debug!("emitting zero divisor guard");
        let mut hang = print_string_code(DIVISION_BY_ZERO_MESSAGE);
        hang.raw("[]");

        code.right(2).clear().right(1).clear().left(2);
        code.raw("[>+>+<<-]>[<+>-]"); // b -> both temps, first one back into b
        code.right(1);
        code.append(&if_zero(&hang, ScratchWindow::new(0, 2), 2)?);
        code.left(3);
    }

    // a, b, w, x, y, z
    code.right(2).clear().right(1).clear().right(1).clear().right(1).clear().left(5);
    code.begin_loop()
        .sub(1) // a -= 1
        .right(1)
        .sub(1) // b -= 1
        .right(1)
        .add(1) // w += 1
        .left(1)
        .raw("[->>>+>+<<<<]>>>>[-<<<<+>>>>]") // b -> y, via z
        .left(1);

    let mut carry = Code::new();
    carry.raw("<+"); // x += 1
    carry.raw("<[-<+>]"); // w -> b
    carry.right(2);
    code.append(&if_zero(&carry, ScratchWindow::new(0, 1), 1)?);

    code.left(4).end_loop();
    Ok(code)
}

#[derive(Debug, Clone, Copy)]
enum Driver {
    First,
    Second,
}

/// Comparisons, as a race: the driver operand counts down while the other one is
/// decremented alongside it for as long as it stays non-zero. The result `c` is
/// set on each round and cleared when the other operand still had something left,
/// so after the last round it says whether the other operand ran out first.
///
/// Strict comparisons start at 0 and flip to 1 on a round where the other operand
/// is already zero; non-strict ones start at 1 and flip to 0 the same way.
///
/// `a > b` and `a <= b` are driven by `a`, `a < b` and `a >= b` by `b`.
// a, b, c, d
fn race_code(driver: Driver, strict: bool) -> Code {
    let (set, unset) = if strict { ("+", "-") } else { ("", "+") };
    let mut code = Code::new();
    code.right(2).clear();
    if !strict {
        code.add(1);
    }
    code.right(1).clear();

    match driver {
        Driver::First => {
            code.left(3).begin_loop();
            code.right(2).clear().left(1).raw("[>+>+<<-]>[<+>-]"); // b -> d, via c
            code.raw(set);
            code.right(1)
                .begin_loop()
                .clear()
                .left(1)
                .raw(unset)
                .left(1)
                .sub(1) // b -= 1
                .right(2)
                .end_loop();
            code.left(3).sub(1).end_loop();
            code.right(2).raw("[<<+>>-]").left(1);
        }
        Driver::Second => {
            code.left(2).begin_loop();
            code.right(1).clear().left(2).raw("[>>+>+<<<-]>>[<<+>>-]"); // a -> d, via c
            code.raw(set);
            code.right(1)
                .begin_loop()
                .clear()
                .left(1)
                .raw(unset)
                .left(2)
                .sub(1) // a -= 1
                .right(3)
                .end_loop();
            code.left(2).sub(1).end_loop();
            code.left(1).clear().right(2).raw("[<<+>>-]").left(1);
        }
    }
    code
}

// a, b, t
fn logical_and_code() -> Code {
    let mut code = Code::new();
    code.right(2).clear().left(2);
    code.begin_loop()
        .right(1)
        .raw("[>+<[-]]") // b != 0: t = 1
        .left(1)
        .clear()
        .end_loop();
    code.right(2).raw("[<<+>>-]").left(1);
    code
}

// a, b, t
fn logical_or_code() -> Code {
    let mut code = Code::new();
    code.right(2).clear().left(2);
    code.raw("[>[-]>+<<[-]]"); // a != 0: t = 1, drop b
    code.right(1).raw("[>+<[-]]"); // b != 0: t = 1
    code.right(1).raw("[<<+>>-]").left(1);
    code
}

// a, b, t
fn shift_left_code() -> Code {
    let mut code = Code::new();
    code.right(2).clear().left(1);
    code.begin_loop()
        .left(1)
        .raw("[>>+<<-]") // a -> t
        .right(2)
        .raw("[<<++>>-]") // a = 2 * t
        .left(1)
        .sub(1)
        .end_loop();
    code
}

/// Halves `a`, `b` times. Each halving walks `a` down to zero while a counter `c`
/// cycles 2, 1, 2, 1, ...; every completed cycle adds one to the quotient `x`.
// a, b, c, x, y, z
fn shift_right_code() -> Code {
    let mut code = Code::new();
    code.right(1);
    for _ in 0..4 {
        code.right(1).clear();
    }
    code.left(4);

    code.begin_loop()
        .right(1)
        .add(2) // c = 2
        .left(2)
        .begin_loop()
        .sub(1)
        .right(2)
        .sub(1)
        .raw("[>>+>+<<<-]>>>[<<<+>>>-]") // c -> y, via z
        .left(1)
        .raw("-[<+<++>>+]") // c ran out: x += 1, c = 2
        .left(4)
        .end_loop();
    code.right(3).raw("[<<<+>>>-]"); // x -> a
    code.left(1).clear(); // c = 0
    code.left(1).sub(1).end_loop(); // b -= 1
    code
}

/// Bit-by-bit operator framework.
///
/// Layout: `a, b, c, w, x, y, z, bit1, bitcounter, res`. For each of the eight bits,
/// `a` and `b` are halved through the same parity counter as `>>`, dropping their low
/// bits into `bit1` and `z`. `combinator` then runs with the pointer on `z`: it must
/// put the combined bit into `y` (which is zero) and leave `z` and `bit1` zero, with
/// the pointer back on `bit1`. The combined bit is shifted left by the bit number and
/// added to `res`, which finally replaces `a`.
pub fn bitwise_code(combinator: &Code) -> Code {
    let mut code = Code::new();
    code.right(7).clear(); // bit1 = 0
    code.right(1).raw(">[-]<"); // res = 0

    // bitcounter runs 0..8, stored minus eight so the loop test is a zero test
    code.clear().sub(8).begin_loop().add(8);
    code.left(1);
    for _ in 0..5 {
        code.left(1).clear(); // c, w, x, y, z = 0
    }
    code.add(2).left(2); // c = 2

    // a's low bit -> bit1, a /= 2 into x
    code.begin_loop()
        .sub(1)
        .right(2)
        .sub(1)
        .raw("[>+>>+<<<-]>[<+>-]") // c -> y, via w
        .right(2)
        .raw(">>+<<") // bit1 += 1
        .raw("-[<+<<++>>>>>--<<+]") // c ran out: x += 1, c = 2, bit1 -= 2
        .left(5)
        .end_loop();
    code.right(4).raw("[<<<<+>>>>-]"); // x -> a
    code.left(2).clear().add(2).left(1); // c = 2

    // b's low bit -> z, b /= 2 into x
    code.begin_loop()
        .sub(1)
        .right(1)
        .sub(1)
        .raw("[>+>>+<<<-]>[<+>-]") // c -> y, via w
        .right(2)
        .raw(">+<") // z += 1
        .raw("-[>--<<+<<++>>>+]") // c ran out: z -= 2, x += 1, c = 2
        .left(4)
        .end_loop();
    code.right(3).raw("[<<<+>>>-]"); // x -> b

    code.right(2).append(combinator);

    code.raw(">[<+<+>>-]<[>+<-]"); // bitcounter -> z, via bit1
    code.left(1)
        .begin_loop() // y <<= z
        .left(1)
        .raw("[<+>-]")
        .raw("<[>++<-]")
        .right(2)
        .sub(1)
        .end_loop();
    code.left(1).raw("[>>>>+<<<<-]"); // res += y

    code.right(3).sub(7).end_loop();

    code.right(1).raw("[<<<<<<<<<+>>>>>>>>>-]"); // res -> a
    code.left(8);
    code
}

use std::io::{self, Read};

use bf_tapegen::arith::{binary_op_code, CodegenOptions};
use bf_tapegen::console::{print_int_code, print_string_code, read_int_code};
use bf_tapegen::errors::Result;
use bf_tapegen::operand::token_code;
use bf_tapegen::{BinaryOp, Code, SymbolTable, TapeCursor, Token, VMError, BF};

const OPERATORS: [BinaryOp; 8] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Lt,
    BinaryOp::Eq,
    BinaryOp::BitAnd,
];

/// a and b live in cells 0 and 1, cell 2 is the return value cell and the
/// expression is evaluated from cell 3 on.
fn print_result_code(symbols: &SymbolTable, op: BinaryOp) -> Result<Code> {
    let cursor = TapeCursor::at(3);
    let mut code = print_string_code(&format!("a {} b = ", op.symbol()));

    let (a, cursor) = token_code(symbols, &Token::id("a"), cursor)?;
    let (b, _) = token_code(symbols, &Token::id("b"), cursor)?;
    code.append(&a).append(&b).left(2);
    code.append(&binary_op_code(op, &CodegenOptions::default())?);

    code.left(2).append(&print_int_code()).right(1);
    code.append(&print_string_code("\n"));
    Ok(code)
}

fn main() -> Result<()> {
    let mut symbols = SymbolTable::new();
    symbols.declare("a", 0, vec![]);
    symbols.declare("b", 1, vec![]);

    let mut code = read_int_code();
    code.right(1).append(&read_int_code()).right(2);
    for op in OPERATORS {
        code.append(&print_result_code(&symbols, op)?);
    }
    println!("=== Program: {} instructions ===", code.len());

    eprintln!("Enter two numbers (0-255), one per line:");
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut bf = BF::new(code.as_str())
        .with_input(input.as_bytes())
        .with_max_steps(10_000_000)
        .with_echo(true);
    match bf.run() {
        Ok(()) => println!("({} steps)", bf.steps()),
        Err(VMError::ExecutionTimeout(steps)) => println!("\nProgram hung, stopped after {} steps", steps),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

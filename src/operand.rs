use crate::code::Code;
use crate::encoder::set_cell_value_code;
use crate::errors::{CompileError, CompileResult};
use crate::movement::copy_from_variable_code;
use crate::symbols::SymbolTable;
use crate::tape::TapeCursor;
use crate::token::{char_token_value, num_token_value, Token, TokenKind};

/// Evaluates a single-token operand into the current cell and moves on to the next
/// cell, which is returned as the new cursor.
///
/// Literals are written from scratch (the cell is cleared first); identifiers are
/// copied out of their variable.
pub fn token_code(symbols: &SymbolTable, token: &Token, cursor: TapeCursor) -> CompileResult<(Code, TapeCursor)> {
    let value = match token.kind {
        TokenKind::Num => num_token_value(token)?,
        TokenKind::Char => char_token_value(token)?,
        TokenKind::True => 1,
        TokenKind::False => 0,
        TokenKind::Id => return copy_from_variable_code(symbols, token, cursor),
        _ => return Err(CompileError::UnexpectedToken(token.to_string())),
    };

    let mut code = Code::new();
    code.clear().append(&set_cell_value_code(value, 0, true)).right(1);
    Ok((code, cursor.advance(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bf::BF;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn evaluate(token: Token) -> (u8, BF) {
        let mut symbols = SymbolTable::new();
        symbols.declare("answer", 0, vec![]);
        let cursor = TapeCursor::at(2);
        let (code, after) = token_code(&symbols, &token, cursor).unwrap();
        assert_eq!(after, TapeCursor::at(3));

        // stale values in the target and the next cell
        let mut bf = BF::new(code.as_str())
            .with_cells(&[42, 0, 17, 23])
            .with_pointer(2);
        bf.run().unwrap();
        assert_eq!(bf.pointer(), 3);
        (bf.dump_cells(3)[2], bf)
    }

    #[rstest(token, expected,
        case(Token::num("0"), 0),
        case(Token::num("65"), 65),
        case(Token::num("255"), 255),
        case(Token::num("0x7f"), 127),
        case(Token::num("258"), 2),
        case(Token::char('A'), 65),
        case(Token::char('\n'), 10),
        case(Token::new(TokenKind::True, "true"), 1),
        case(Token::new(TokenKind::False, "false"), 0),
        case(Token::id("answer"), 42),
    )]
    fn test_operand_value(token: Token, expected: u8) {
        let (value, bf) = evaluate(token);
        assert_eq!(value, expected);
        assert_eq!(bf.dump_cells(1), &[42]);
    }

    #[test]
    fn test_operators_are_not_operands() {
        let symbols = SymbolTable::new();
        let err = token_code(&symbols, &Token::op("+"), TapeCursor::at(0)).unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedToken(_)));
    }

    #[test]
    fn test_bad_literals() {
        let symbols = SymbolTable::new();
        for token in [Token::num("12a"), Token::num("0xzz"), Token::new(TokenKind::Char, "ab")] {
            assert!(matches!(
                token_code(&symbols, &token, TapeCursor::at(0)),
                Err(CompileError::InvalidLiteral(_))
            ));
        }
    }

    #[test]
    fn test_undeclared_identifier() {
        let symbols = SymbolTable::new();
        let err = token_code(&symbols, &Token::id("nope"), TapeCursor::at(4)).unwrap_err();
        assert_eq!(err.to_string(), "'nope' does not exist");
    }
}

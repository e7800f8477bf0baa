use std::fmt;

use crate::errors::{CompileError, CompileResult};
use crate::tape::ScratchWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Num,
    Char,
    Id,
    True,
    False,
    Increment,
    Decrement,
    UnaryMultiplicative,
    BitwiseNot,
    Not,
    And,
    Or,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    /// Relational and arithmetic operators; the operator text is in `data`.
    BinaryOp,
}

/// A lexer token, as handed over by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub data: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.data)
    }
}

impl Token {
    pub fn new(kind: TokenKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    pub fn num(literal: impl Into<String>) -> Self {
        Self::new(TokenKind::Num, literal)
    }

    pub fn char(c: char) -> Self {
        Self::new(TokenKind::Char, c.to_string())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Id, name)
    }

    pub fn op(symbol: impl Into<String>) -> Self {
        Self::new(TokenKind::BinaryOp, symbol)
    }
}

/// Value of a NUM token: decimal, or hexadecimal with a `0x` prefix. Cells are
/// 8 bits wide, so the value is reduced modulo 256.
pub fn num_token_value(token: &Token) -> CompileResult<u8> {
    if token.kind != TokenKind::Num {
        return Err(CompileError::UnexpectedToken(token.to_string()));
    }
    let parsed = match token.data.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.data.parse::<u64>(),
    };
    parsed
        .map(|value| (value % 256) as u8)
        .map_err(|_| CompileError::InvalidLiteral(token.to_string()))
}

/// Value of a CHAR token. The character has to fit in one cell.
pub fn char_token_value(token: &Token) -> CompileResult<u8> {
    if token.kind != TokenKind::Char {
        return Err(CompileError::UnexpectedToken(token.to_string()));
    }
    let mut chars = token.data.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => u8::try_from(u32::from(c))
            .map_err(|_| CompileError::InvalidLiteral(token.to_string())),
        _ => Err(CompileError::InvalidLiteral(token.to_string())),
    }
}

/// Operators that combine the value at the pointer with the value in the next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::Le,
        BinaryOp::Ge,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
    ];

    pub fn from_token(token: &Token) -> CompileResult<Self> {
        let op = match token.kind {
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::BitwiseAnd => Some(BinaryOp::BitAnd),
            TokenKind::BitwiseOr => Some(BinaryOp::BitOr),
            TokenKind::BitwiseXor => Some(BinaryOp::BitXor),
            TokenKind::BinaryOp => Self::from_symbol(&token.data),
            _ => None,
        };
        op.ok_or_else(|| CompileError::UnexpectedToken(token.to_string()))
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
        }
    }

    /// Cells the operator's code may overwrite, counted from the first operand.
    /// The caller must not keep live values there.
    pub fn scratch(self) -> ScratchWindow {
        let size = match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Eq | BinaryOp::Ne => 2,
            BinaryOp::Shl | BinaryOp::And | BinaryOp::Or => 3,
            BinaryOp::Mul | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 4,
            BinaryOp::Div | BinaryOp::Mod | BinaryOp::Shr => 6,
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => 10,
        };
        ScratchWindow::new(0, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Increment,
    Decrement,
    /// `**`: leaves the variable unchanged
    Power,
    /// `//`: leaves the variable unchanged
    Divide,
    /// `%%`: zeroes the variable
    Modulo,
    BitwiseNot,
    Not,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 7] = [
        UnaryOp::Increment,
        UnaryOp::Decrement,
        UnaryOp::Power,
        UnaryOp::Divide,
        UnaryOp::Modulo,
        UnaryOp::BitwiseNot,
        UnaryOp::Not,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn from_token(token: &Token) -> CompileResult<Self> {
        let op = match (token.kind, token.data.as_str()) {
            (TokenKind::Increment, _) => UnaryOp::Increment,
            (TokenKind::Decrement, _) => UnaryOp::Decrement,
            (TokenKind::UnaryMultiplicative, "**") => UnaryOp::Power,
            (TokenKind::UnaryMultiplicative, "//") => UnaryOp::Divide,
            (TokenKind::UnaryMultiplicative, "%%") => UnaryOp::Modulo,
            (TokenKind::BitwiseNot, _) => UnaryOp::BitwiseNot,
            (TokenKind::Not, _) => UnaryOp::Not,
            _ => return Err(CompileError::UnexpectedToken(token.to_string())),
        };
        Ok(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
            UnaryOp::Power => "**",
            UnaryOp::Divide => "//",
            UnaryOp::Modulo => "%%",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::Not => "!",
        }
    }

    /// Whether the operator writes back to a variable's own cell.
    pub fn mutates_variable(self) -> bool {
        !matches!(self, UnaryOp::BitwiseNot | UnaryOp::Not)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest(literal, expected,
        case("0", 0),
        case("42", 42),
        case("255", 255),
        case("256", 0),
        case("300", 44),
        case("0x41", 65),
        case("0xff", 255),
        case("0xFF", 255),
    )]
    fn test_num_token_value(literal: &str, expected: u8) {
        assert_eq!(num_token_value(&Token::num(literal)).unwrap(), expected);
    }

    #[test]
    fn test_bad_num_literals() {
        assert!(matches!(
            num_token_value(&Token::num("12a")),
            Err(CompileError::InvalidLiteral(_))
        ));
        assert!(matches!(
            num_token_value(&Token::num("0x")),
            Err(CompileError::InvalidLiteral(_))
        ));
        assert!(matches!(
            num_token_value(&Token::id("x")),
            Err(CompileError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn test_char_token_value() {
        assert_eq!(char_token_value(&Token::char('A')).unwrap(), 65);
        assert_eq!(char_token_value(&Token::char('\n')).unwrap(), 10);
        assert_eq!(char_token_value(&Token::char('ÿ')).unwrap(), 255);
        assert!(char_token_value(&Token::char('€')).is_err());
        assert!(char_token_value(&Token::new(TokenKind::Char, "ab")).is_err());
    }

    #[test]
    fn test_binary_op_symbols_round_trip() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOp::from_symbol("**"), None);
    }

    #[test]
    fn test_binary_op_from_token() {
        assert_eq!(BinaryOp::from_token(&Token::op("<=")).unwrap(), BinaryOp::Le);
        assert_eq!(
            BinaryOp::from_token(&Token::new(TokenKind::BitwiseXor, "^")).unwrap(),
            BinaryOp::BitXor
        );
        assert_eq!(
            BinaryOp::from_token(&Token::new(TokenKind::And, "&&")).unwrap(),
            BinaryOp::And
        );
        assert!(BinaryOp::from_token(&Token::op("=>")).is_err());
        assert!(BinaryOp::from_token(&Token::num("1")).is_err());
    }

    #[test]
    fn test_unary_op_from_token() {
        let um = |s: &str| Token::new(TokenKind::UnaryMultiplicative, s);
        assert_eq!(UnaryOp::from_token(&um("**")).unwrap(), UnaryOp::Power);
        assert_eq!(UnaryOp::from_token(&um("//")).unwrap(), UnaryOp::Divide);
        assert_eq!(UnaryOp::from_token(&um("%%")).unwrap(), UnaryOp::Modulo);
        assert!(UnaryOp::from_token(&um("++")).is_err());
        assert_eq!(
            UnaryOp::from_token(&Token::new(TokenKind::Not, "!")).unwrap(),
            UnaryOp::Not
        );
        assert!(!UnaryOp::Not.mutates_variable());
        assert!(UnaryOp::Modulo.mutates_variable());
    }

    #[test]
    fn test_unary_symbols_do_not_clash() {
        for op in UnaryOp::ALL {
            assert_eq!(UnaryOp::from_symbol(op.symbol()), Some(op));
            assert_eq!(BinaryOp::from_symbol(op.symbol()), None);
        }
    }
}

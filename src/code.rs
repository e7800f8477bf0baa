use std::fmt;

/// The eight tape machine instructions.
pub const INSTRUCTIONS: &str = "+-<>[].,";

/// Append-only buffer of emitted tape machine instructions.
///
/// Generators build snippets by chaining the methods below and hand the result to
/// their caller, which appends it to a larger program. Nothing ever reads a `Code`
/// back apart from tests and the final writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    bf: String,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bf)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.bf
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.bf
    }
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append instruction text verbatim.
    pub fn raw(&mut self, bf: &str) -> &mut Self {
        debug_assert!(
            bf.chars().all(|c| INSTRUCTIONS.contains(c)),
            "non-instruction character in {:?}",
            bf
        );
        self.bf.push_str(bf);
        self
    }

    pub fn append(&mut self, other: &Code) -> &mut Self {
        self.bf.push_str(&other.bf);
        self
    }

    pub fn right(&mut self, cells: usize) -> &mut Self {
        self.repeat('>', cells)
    }

    pub fn left(&mut self, cells: usize) -> &mut Self {
        self.repeat('<', cells)
    }

    pub fn add(&mut self, amount: usize) -> &mut Self {
        self.repeat('+', amount)
    }

    pub fn sub(&mut self, amount: usize) -> &mut Self {
        self.repeat('-', amount)
    }

    /// `[-]`
    pub fn clear(&mut self) -> &mut Self {
        self.raw("[-]")
    }

    pub fn begin_loop(&mut self) -> &mut Self {
        self.push('[')
    }

    pub fn end_loop(&mut self) -> &mut Self {
        self.push(']')
    }

    pub fn output(&mut self) -> &mut Self {
        self.push('.')
    }

    pub fn input(&mut self) -> &mut Self {
        self.push(',')
    }

    fn push(&mut self, c: char) -> &mut Self {
        self.bf.push(c);
        self
    }

    fn repeat(&mut self, c: char, times: usize) -> &mut Self {
        self.bf.extend(std::iter::repeat(c).take(times));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.bf
    }

    /// Net pointer movement (`>` minus `<`). Only meaningful for snippets whose
    /// loops return to the cell they started on.
    pub fn net_shift(&self) -> isize {
        self.bf.chars().fold(0, |pos, c| match c {
            '>' => pos + 1,
            '<' => pos - 1,
            _ => pos,
        })
    }
}

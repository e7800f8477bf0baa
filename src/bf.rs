use std::collections::VecDeque;
use std::io::Write;

use log::warn;

use crate::errors::{VMError, VMResult};

pub const DEFAULT_MEMORY_SIZE: usize = 30000;
pub const DEFAULT_MAX_STEPS: u64 = 100_000_000;

/// Small tape machine for running generated code: 8-bit wrapping cells, a fixed-size
/// tape, input from a buffer and a step budget so that programs which never halt
/// can be told apart from slow ones.
pub struct BF {
    cells: Vec<u8>,
    ptr: usize,
    code: Vec<char>,
    pc: usize,
    input: VecDeque<u8>,
    output: Vec<u8>,
    steps: u64,
    max_steps: u64,
    echo: bool,
}

impl BF {
    pub fn new(code: &str) -> Self {
        BF {
            cells: vec![0; DEFAULT_MEMORY_SIZE],
            ptr: 0,
            code: code.chars().collect(),
            pc: 0,
            input: VecDeque::new(),
            output: Vec::new(),
            steps: 0,
            max_steps: DEFAULT_MAX_STEPS,
            echo: false,
        }
    }

    pub fn with_memory_size(mut self, size: usize) -> Self {
        self.cells.resize(size, 0);
        self
    }

    /// Preloads the first cells of the tape, growing it if needed.
    pub fn with_cells(mut self, values: &[u8]) -> Self {
        if values.len() > self.cells.len() {
            self.cells.resize(values.len(), 0);
        }
        self.cells[..values.len()].copy_from_slice(values);
        self
    }

    pub fn with_pointer(mut self, ptr: usize) -> Self {
        self.ptr = ptr;
        self
    }

    pub fn with_input(mut self, input: &[u8]) -> Self {
        self.input.extend(input);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Also write every output byte to stdout as soon as it is produced.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn dump_cells(&self, n: usize) -> &[u8] {
        &self.cells[..n.min(self.cells.len())]
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn pointer(&self) -> usize {
        self.ptr
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run(&mut self) -> VMResult<()> {
        let jumps = match_brackets(&self.code)?;
        if self.ptr >= self.cells.len() {
            return Err(VMError::MemoryOutOfBounds(self.ptr as isize));
        }

        while self.pc < self.code.len() {
            if self.steps >= self.max_steps {
                warn!(
                    "giving up after {} steps at instruction {}",
                    self.steps, self.pc
                );
                return Err(VMError::ExecutionTimeout(self.steps));
            }
            self.steps += 1;

            match self.code[self.pc] {
                '>' => {
                    self.ptr += 1;
                    if self.ptr >= self.cells.len() {
                        return Err(VMError::MemoryOutOfBounds(self.ptr as isize));
                    }
                }
                '<' => {
                    if self.ptr == 0 {
                        return Err(VMError::MemoryOutOfBounds(-1));
                    }
                    self.ptr -= 1;
                }
                '+' => self.cells[self.ptr] = self.cells[self.ptr].wrapping_add(1),
                '-' => self.cells[self.ptr] = self.cells[self.ptr].wrapping_sub(1),
                '.' => self.emit(self.cells[self.ptr])?,
                ',' => {
                    self.cells[self.ptr] = self.input.pop_front().ok_or(VMError::InputExhausted)?;
                }
                '[' => {
                    if self.cells[self.ptr] == 0 {
                        self.pc = jumps[self.pc];
                    }
                }
                ']' => {
                    if self.cells[self.ptr] != 0 {
                        self.pc = jumps[self.pc];
                    }
                }
                _ => {} // Ignore other characters
            }
            self.pc += 1;
        }
        Ok(())
    }

    fn emit(&mut self, byte: u8) -> VMResult<()> {
        self.output.push(byte);
        if self.echo {
            let mut stdout = std::io::stdout();
            stdout.write_all(&[byte])?;
            stdout.flush()?;
        }
        Ok(())
    }
}

/// For every bracket, the index of its partner.
fn match_brackets(code: &[char]) -> VMResult<Vec<usize>> {
    let mut jumps = vec![0; code.len()];
    let mut open = Vec::new();
    for (i, c) in code.iter().enumerate() {
        match c {
            '[' => open.push(i),
            ']' => {
                let start = open.pop().ok_or(VMError::BracketMismatch(i))?;
                jumps[start] = i;
                jumps[i] = start;
            }
            _ => {}
        }
    }
    match open.first() {
        Some(&unmatched) => Err(VMError::BracketMismatch(unmatched)),
        None => Ok(jumps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_operations() {
        let mut bf = BF::new("+++.");
        bf.run().unwrap();
        assert_eq!(bf.output, vec![3]);
    }

    #[test]
    fn test_pointer_movement() {
        let mut bf = BF::new(">+++>++<.");
        bf.run().unwrap();
        assert_eq!(bf.output, vec![3]);
        assert_eq!(bf.pointer(), 1);
    }

    #[test]
    fn test_loop() {
        let mut bf = BF::new("+++[>+<-]>.");
        bf.run().unwrap();
        assert_eq!(bf.output, vec![3]);
    }

    #[test]
    fn test_wraparound() {
        let mut bf = BF::new("-.+.");
        bf.run().unwrap();
        assert_eq!(bf.output, vec![255, 0]);
    }

    #[test]
    fn test_hello_world() {
        let mut bf = BF::new("++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.");
        bf.run().unwrap();
        assert_eq!(String::from_utf8(bf.output).unwrap(), "Hello World!\n");
    }

    #[test]
    fn test_bounds_checking() {
        let mut bf = BF::new("<");
        assert!(matches!(bf.run(), Err(VMError::MemoryOutOfBounds(-1))));

        let mut bf = BF::new(&">".repeat(8)).with_memory_size(8);
        assert!(matches!(bf.run(), Err(VMError::MemoryOutOfBounds(8))));

        let mut bf = BF::new("+").with_memory_size(2).with_pointer(5);
        assert!(bf.run().is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        let mut bf = BF::new("+[");
        assert!(matches!(bf.run(), Err(VMError::BracketMismatch(1))));

        let mut bf = BF::new("[]]");
        assert!(matches!(bf.run(), Err(VMError::BracketMismatch(2))));
    }

    #[test]
    fn test_input() {
        let mut bf = BF::new(",.,.").with_input(b"AB");
        bf.run().unwrap();
        assert_eq!(bf.output, b"AB".to_vec());

        let mut bf = BF::new(",,").with_input(b"A");
        assert!(matches!(bf.run(), Err(VMError::InputExhausted)));
    }

    #[test]
    fn test_preloaded_tape() {
        let mut bf = BF::new("[->+<]").with_cells(&[0, 7, 5]).with_pointer(1);
        bf.run().unwrap();
        assert_eq!(bf.dump_cells(3), &[0, 0, 12]);
    }

    #[test]
    fn test_step_budget() {
        let mut bf = BF::new("+[]").with_max_steps(1000);
        assert!(matches!(bf.run(), Err(VMError::ExecutionTimeout(1000))));
        assert_eq!(bf.steps(), 1000);

        let mut bf = BF::new("+++").with_max_steps(3);
        bf.run().unwrap();
        assert_eq!(bf.steps(), 3);
    }

    #[test]
    fn test_output_survives_timeout() {
        let mut bf = BF::new("++.[]").with_max_steps(50);
        assert!(bf.run().is_err());
        assert_eq!(bf.output(), &[2]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let mut bf = BF::new("+ add one\n+ and another .");
        bf.run().unwrap();
        assert_eq!(bf.output, vec![2]);
    }
}

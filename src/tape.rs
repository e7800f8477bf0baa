use crate::errors::{CompileError, CompileResult};

/// Where the front-end's pointer is while it emits code: the first cell that holds
/// no live value ("next available cell").
///
/// Generators never keep one of these around. They take a cursor, and the ones that
/// move the pointer hand back the updated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TapeCursor {
    pointer: usize,
}

impl TapeCursor {
    pub const fn at(pointer: usize) -> Self {
        Self { pointer }
    }

    pub const fn pointer(self) -> usize {
        self.pointer
    }

    pub const fn advance(self, cells: usize) -> Self {
        Self {
            pointer: self.pointer + cells,
        }
    }

    /// Releases `cells` cells, e.g. after a binary operator folds two operands into one.
    pub fn retreat(self, cells: usize) -> Self {
        Self {
            pointer: self.pointer.saturating_sub(cells),
        }
    }

    /// Distance from the pointer back to `cell_index`. `None` unless the cell is
    /// strictly to the left of the pointer.
    pub fn offset_to(self, cell_index: usize) -> Option<usize> {
        match self.pointer.checked_sub(cell_index) {
            Some(0) | None => None,
            offset => offset,
        }
    }
}

/// Cells a routine may overwrite, as offsets from the cell it starts on:
/// `base_offset .. base_offset + size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchWindow {
    pub base_offset: usize,
    pub size: usize,
}

impl ScratchWindow {
    pub const fn new(base_offset: usize, size: usize) -> Self {
        Self { base_offset, size }
    }

    /// First offset past the window.
    pub const fn end(self) -> usize {
        self.base_offset + self.size
    }

    pub fn contains(self, offset: usize) -> bool {
        (self.base_offset..self.end()).contains(&offset)
    }

    /// Fails unless `offset` lies at or beyond the end of the window.
    pub fn ensure_outside(self, offset: usize) -> CompileResult<()> {
        if offset < self.end() {
            return Err(CompileError::ScratchOverlap {
                flag_offset: offset,
                window_end: self.end(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_moves() {
        let cursor = TapeCursor::at(10);
        assert_eq!(cursor.advance(3).pointer(), 13);
        assert_eq!(cursor.retreat(4).pointer(), 6);
        assert_eq!(cursor.retreat(40).pointer(), 0);
    }

    #[test]
    fn test_offset_to() {
        let cursor = TapeCursor::at(10);
        assert_eq!(cursor.offset_to(3), Some(7));
        assert_eq!(cursor.offset_to(9), Some(1));
        assert_eq!(cursor.offset_to(10), None);
        assert_eq!(cursor.offset_to(11), None);
    }

    #[test]
    fn test_window_bounds() {
        let window = ScratchWindow::new(1, 3);
        assert_eq!(window.end(), 4);
        assert!(!window.contains(0));
        assert!(window.contains(1));
        assert!(window.contains(3));
        assert!(!window.contains(4));
    }

    #[test]
    fn test_ensure_outside() {
        let window = ScratchWindow::new(0, 2);
        assert!(window.ensure_outside(2).is_ok());
        assert!(matches!(
            window.ensure_outside(1),
            Err(CompileError::ScratchOverlap {
                flag_offset: 1,
                window_end: 2
            })
        ));
    }
}

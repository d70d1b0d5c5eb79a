//! Row-major iteration over the cells of a [`Table`].

use std::iter::{FusedIterator};
use std::rc::{Rc};

use super::{Position, Structure, Table};

/// Walks the coordinate space of a locked [`Structure`] in row-major order,
/// yielding the buffer index of each cell.
///
/// The buffer index is `base` plus the structure's [`vector_offset()`], so a
/// `Cursor` over a view walks the view's cells, not consecutive buffer
/// entries.
///
/// [`vector_offset()`]: Structure::vector_offset()
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    structure: Rc<Structure>,
    base: usize,
    vector: Vec<usize>,
    started: bool,
    done: bool,
}

impl Cursor {
    pub(crate) fn new(structure: Rc<Structure>, base: usize) -> Self {
        debug_assert!(structure.is_locked());
        let vector = vec![0; structure.dim()];
        let done = structure.is_empty();
        Self {structure, base, vector, started: false, done}
    }

    /// A `Position` for the cell most recently yielded.
    pub(crate) fn position(&self) -> Position {
        Position::new(self.structure.clone(), self.vector.clone())
    }
}

impl Iterator for Cursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done { return None; }
        if self.started {
            if !self.structure.advance(&mut self.vector) {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.base + self.structure.vector_offset(&self.vector))
    }
}

impl FusedIterator for Cursor {}

// ----------------------------------------------------------------------------

/// The values of a [`Table`] in row-major order. See [`Table::iter()`].
pub struct Iter<'a, T> {
    table: &'a Table<T>,
    cursor: Cursor,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(table: &'a Table<T>) -> Self {
        Self {table, cursor: table.cursor()}
    }
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cursor.next().map(|i| self.table.at(i))
    }
}

impl<'a, T: Clone> FusedIterator for Iter<'a, T> {}

/// The values of a [`Table`] in row-major order, with their [`Position`]s.
/// See [`Table::iter_with_position()`].
pub struct IterWithPosition<'a, T> {
    table: &'a Table<T>,
    cursor: Cursor,
}

impl<'a, T> IterWithPosition<'a, T> {
    pub(crate) fn new(table: &'a Table<T>) -> Self {
        Self {table, cursor: table.cursor()}
    }
}

impl<'a, T: Clone> Iterator for IterWithPosition<'a, T> {
    type Item = (T, Position);

    fn next(&mut self) -> Option<(T, Position)> {
        let i = self.cursor.next()?;
        Some((self.table.at(i), self.cursor.position()))
    }
}

impl<'a, T: Clone> FusedIterator for IterWithPosition<'a, T> {}

impl<'a, T: Clone> IntoIterator for &'a Table<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// ----------------------------------------------------------------------------

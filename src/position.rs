use std::cell::{OnceCell};
use std::fmt::{self, Debug};
use std::rc::{Rc};

use super::{AxisSpec, Label, Structure};

/// The address of one cell of a locked [`Structure`].
///
/// A `Position` knows its 0-based index along every axis. Its offset into
/// the flat buffer and its labels are computed when first asked for.
///
/// ```
/// use std::rc::{Rc};
/// use ntable::{coords, Axis, Label, Structure};
/// let mut s = Structure::new();
/// s.add_named(Axis::labeled(["one", "two"]), "a")?.add(Axis::indexed_from(3, 1))?.lock();
/// let s = Rc::new(s);
/// let p = s.position(&coords!["two", 2])?.unwrap();
/// assert_eq!(p.offset(), 4);
/// assert_eq!(p.coordinate("a"), Some(Label::from("two")));
/// assert_eq!(p.coordinate_vector(), [Label::from("two"), Label::from(2)]);
/// let q = p.next().unwrap();
/// assert_eq!(q.coordinate(1), Some(Label::from(3)));
/// assert!(q.next().is_none());
/// assert_eq!(q.previous(), Some(p));
/// # Ok::<(), ntable::Error>(())
/// ```
#[derive(Clone)]
pub struct Position {
    structure: Rc<Structure>,
    vector: Vec<usize>,
    offset: OnceCell<usize>,
    labels: OnceCell<Vec<Label>>,
}

impl Position {
    pub(crate) fn new(structure: Rc<Structure>, vector: Vec<usize>) -> Self {
        debug_assert!(structure.is_locked());
        debug_assert_eq!(vector.len(), structure.dim());
        Self {structure, vector, offset: OnceCell::new(), labels: OnceCell::new()}
    }

    /// Returns the `Position` at `offset` in `structure`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `structure` is not locked.
    pub fn from_offset(structure: Rc<Structure>, offset: usize) -> Option<Self> {
        assert!(structure.is_locked());
        let vector = structure.offset_vector(offset)?;
        let p = Self::new(structure, vector);
        let _ = p.offset.set(offset);
        Some(p)
    }

    pub fn structure(&self) -> &Rc<Structure> { &self.structure }

    /// The 0-based index along each axis.
    pub fn vector(&self) -> &[usize] { &self.vector }

    /// The offset of this cell, relative to the start of its table.
    pub fn offset(&self) -> usize {
        *self.offset.get_or_init(|| self.structure.vector_offset(&self.vector))
    }

    /// The label of this cell along the axis `spec`.
    pub fn coordinate(&self, spec: impl Into<AxisSpec>) -> Option<Label> {
        let p = self.structure.resolve(&spec.into())?;
        self.coordinate_vector().get(p).cloned()
    }

    /// The labels of this cell along every axis, in order.
    pub fn coordinate_vector(&self) -> &[Label] {
        self.labels.get_or_init(|| self.structure.vector_labels(&self.vector))
    }

    /// The next cell in row-major order, if any.
    pub fn next(&self) -> Option<Position> {
        let mut vector = self.vector.clone();
        if !self.structure.advance(&mut vector) { return None; }
        Some(Self::new(self.structure.clone(), vector))
    }

    /// The previous cell in row-major order, if any.
    pub fn previous(&self) -> Option<Position> {
        let mut vector = self.vector.clone();
        if !self.structure.retreat(&mut vector) { return None; }
        Some(Self::new(self.structure.clone(), vector))
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        (Rc::ptr_eq(&self.structure, &other.structure) || self.structure.eql(&other.structure))
            && self.offset() == other.offset()
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Position")
            .field("vector", &self.vector)
            .field("labels", &self.coordinate_vector())
            .finish()
    }
}

// ----------------------------------------------------------------------------

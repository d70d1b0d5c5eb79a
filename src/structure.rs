use std::fmt::{self, Display};
use std::rc::{Rc};

use itertools::{Itertools};

use super::{Axis, AxisSpec, Coordinates, Label, Position, Error, Result};
use super::record::{AxisRecord};

/// One axis of a [`Structure`], with its position and optional name.
#[derive(Debug, Clone)]
pub struct AxisEntry {
    axis: Axis,
    position: usize,
    name: Option<String>,
}

impl AxisEntry {
    pub fn axis(&self) -> &Axis { &self.axis }

    /// The 0-based position of this axis in its `Structure`.
    pub fn position(&self) -> usize { self.position }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
}

impl PartialEq for AxisEntry {
    fn eq(&self, other: &Self) -> bool { self.axis == other.axis && self.name == other.name }
}

// ----------------------------------------------------------------------------

/// The shape of a table: an ordered list of (optionally named) axes, and the
/// arithmetic to address cells in a flat buffer.
///
/// A `Structure` starts out open, and axes can be added, removed and
/// replaced. Once [`lock()`]ed, which happens implicitly when a [`Table`] is
/// built from it, its shape is frozen and it can compute offsets. Offsets are
/// row-major: the last axis varies fastest.
///
/// ```
/// use ntable::{coords, Axis, Structure};
/// let mut s = Structure::new();
/// s.add(Axis::labeled(["one", "two"]))?.add(Axis::indexed(10))?;
/// s.lock();
/// assert_eq!(s.size(), 20);
/// assert_eq!(s.steps(), Some(&[10, 1][..]));
/// assert_eq!(s.offset(&coords!["two", 3])?, Some(13));
/// assert_eq!(s.offset(&coords!["two"])?, Some(10));
/// assert_eq!(s.offset(&coords!["three", 0])?, None);
/// # Ok::<(), ntable::Error>(())
/// ```
///
/// [`lock()`]: Self::lock()
/// [`Table`]: super::Table
#[derive(Debug, Clone, Default)]
pub struct Structure {
    entries: Vec<AxisEntry>,
    locked: bool,
    steps: Vec<usize>,
    parent: Option<Rc<Structure>>,
}

impl Structure {
    /// Constructs an open `Structure` with no axes.
    pub fn new() -> Self { Self::default() }

    /// Appends an unnamed axis. Fails with [`Error::Overflow`] if the
    /// structure would have more than `usize::MAX` cells.
    pub fn add(&mut self, axis: impl Into<Axis>) -> Result<&mut Self> {
        self.push(axis.into(), None)
    }

    /// Appends a named axis. Fails if the name is already in use.
    pub fn add_named(&mut self, axis: impl Into<Axis>, name: impl Into<String>) -> Result<&mut Self> {
        self.push(axis.into(), Some(name.into()))
    }

    fn push(&mut self, axis: Axis, name: Option<String>) -> Result<&mut Self> {
        if self.locked { return Err(Error::StructureLocked); }
        if let Some(name) = &name {
            if self.entries.iter().any(|e| e.name() == Some(name.as_str())) {
                return Err(Error::DuplicateAxisName(name.clone()));
            }
        }
        check_size(self.entries.iter().map(|e| &e.axis).chain([&axis]))?;
        let position = self.entries.len();
        self.entries.push(AxisEntry {axis, position, name});
        Ok(self)
    }

    /// Removes an axis. Later axes move down one position.
    pub fn remove(&mut self, spec: impl Into<AxisSpec>) -> Result<&mut Self> {
        if self.locked { return Err(Error::StructureLocked); }
        let spec = spec.into();
        let position = self.resolve(&spec).ok_or(Error::UnknownAxis(spec))?;
        self.entries.remove(position);
        for entry in &mut self.entries[position..] { entry.position -= 1; }
        Ok(self)
    }

    /// Replaces an axis, keeping its name and position.
    pub fn replace(&mut self, spec: impl Into<AxisSpec>, axis: impl Into<Axis>) -> Result<&mut Self> {
        let axis = axis.into();
        self.replace_with(spec, |_| axis)
    }

    /// Replaces an axis with one computed from its current entry.
    pub fn replace_with(
        &mut self,
        spec: impl Into<AxisSpec>,
        f: impl FnOnce(&AxisEntry) -> Axis,
    ) -> Result<&mut Self> {
        if self.locked { return Err(Error::StructureLocked); }
        let spec = spec.into();
        let position = self.resolve(&spec).ok_or(Error::UnknownAxis(spec))?;
        let axis = f(&self.entries[position]);
        check_size(self.entries.iter().enumerate().map(|(i, e)| if i == position { &axis } else { &e.axis }))?;
        self.entries[position].axis = axis;
        Ok(self)
    }

    /// Freezes the shape and computes the step of each axis. Does nothing if
    /// already locked.
    pub fn lock(&mut self) -> &mut Self {
        if !self.locked {
            // `check_size()` bounds every partial product.
            let mut step = 1;
            let mut steps = vec![0; self.entries.len()];
            for (i, entry) in self.entries.iter().enumerate().rev() {
                steps[i] = step;
                step *= entry.axis.size();
            }
            self.steps = steps;
            self.locked = true;
            tracing::trace!(dim = self.dim(), size = self.size(), steps = ?self.steps, "locked structure");
        }
        self
    }

    pub fn is_locked(&self) -> bool { self.locked }

    /// The number of axes.
    pub fn dim(&self) -> usize { self.entries.len() }

    /// `true` if this structure has no axes. A table with a degenerate
    /// structure holds exactly one value.
    pub fn is_degenerate(&self) -> bool { self.entries.is_empty() }

    /// The number of cells: the product of the axis sizes.
    pub fn size(&self) -> usize { self.entries.iter().map(|e| e.axis.size()).product() }

    /// `true` if some axis has no rows, so that there are no cells.
    pub fn is_empty(&self) -> bool { self.size() == 0 }

    /// The step of each axis, once locked.
    ///
    /// Moving one row along axis `i` moves `steps()[i]` places in the flat
    /// buffer. A structure derived with [`substructure_omitting()`] and
    /// friends keeps the steps of the structure it was derived from.
    ///
    /// [`substructure_omitting()`]: Self::substructure_omitting()
    pub fn steps(&self) -> Option<&[usize]> {
        if self.locked { Some(&self.steps) } else { None }
    }

    /// The structure this one was derived from, if any.
    pub fn parent(&self) -> Option<&Rc<Structure>> { self.parent.as_ref() }

    pub fn entries(&self) -> &[AxisEntry] { &self.entries }

    pub fn entry(&self, spec: impl Into<AxisSpec>) -> Option<&AxisEntry> {
        self.resolve(&spec.into()).map(|p| &self.entries[p])
    }

    pub fn axis(&self, spec: impl Into<AxisSpec>) -> Option<&Axis> {
        self.entry(spec).map(AxisEntry::axis)
    }

    pub fn axis_index(&self, spec: impl Into<AxisSpec>) -> Option<usize> {
        self.entry(spec).map(AxisEntry::position)
    }

    pub fn axis_name(&self, spec: impl Into<AxisSpec>) -> Option<&str> {
        self.entry(spec).and_then(AxisEntry::name)
    }

    pub(crate) fn resolve(&self, spec: &AxisSpec) -> Option<usize> {
        match spec {
            AxisSpec::Position(p) => if *p < self.entries.len() { Some(*p) } else { None },
            AxisSpec::Name(n) => self.entries.iter().position(|e| e.name() == Some(n.as_str())),
        }
    }

    /// The offset into the flat buffer of the cell at `coords`, or `None` if
    /// there is no such cell.
    ///
    /// Axes that `coords` does not mention are taken at index `0`. Fails if
    /// this structure is not locked.
    pub fn offset(&self, coords: &Coordinates) -> Result<Option<usize>> {
        if !self.locked { return Err(Error::StructureNotLocked); }
        Ok(self.vector(coords).map(|v| self.vector_offset(&v)))
    }

    /// Like [`offset()`], but returns a [`Position`].
    ///
    /// [`offset()`]: Self::offset()
    pub fn position(self: &Rc<Self>, coords: &Coordinates) -> Result<Option<Position>> {
        if !self.locked { return Err(Error::StructureNotLocked); }
        Ok(self.vector(coords).map(|v| Position::new(self.clone(), v)))
    }

    /// Resolves `coords` to a vector of 0-based indices, one per axis.
    pub(crate) fn vector(&self, coords: &Coordinates) -> Option<Vec<usize>> {
        if self.is_empty() { return None; }
        let mut vector = vec![0; self.dim()];
        for (spec, label) in coords.pairs() {
            let p = self.resolve(&spec)?;
            vector[p] = self.entries[p].axis.index_of(label)?;
        }
        Some(vector)
    }

    /// `Σ vector[i] * steps[i]`.
    pub(crate) fn vector_offset(&self, vector: &[usize]) -> usize {
        debug_assert!(self.locked);
        vector.iter().zip(&self.steps).map(|(v, s)| v * s).sum()
    }

    /// The labels at `vector`, one per axis. An index that an axis can't
    /// label stays a `Label::Index`.
    pub(crate) fn vector_labels(&self, vector: &[usize]) -> Vec<Label> {
        vector.iter()
            .zip(&self.entries)
            .map(|(&i, e)| e.axis.label_of(i).unwrap_or(Label::Index(i)))
            .collect()
    }

    /// The vector whose [`vector_offset()`] is `offset`, if any.
    ///
    /// [`vector_offset()`]: Self::vector_offset()
    pub(crate) fn offset_vector(&self, offset: usize) -> Option<Vec<usize>> {
        debug_assert!(self.locked);
        if self.is_empty() { return None; }
        let mut order: Vec<usize> = (0..self.dim()).collect();
        order.sort_by(|&a, &b| self.steps[b].cmp(&self.steps[a]));
        let mut vector = vec![0; self.dim()];
        let mut rest = offset;
        for p in order {
            let step = self.steps[p];
            vector[p] = if step == 0 { 0 } else { rest / step };
            if vector[p] >= self.entries[p].axis.size() { return None; }
            rest -= vector[p] * step;
        }
        if rest == 0 { Some(vector) } else { None }
    }

    /// Steps `vector` to the next cell in row-major order. Returns `false`
    /// (leaving `vector` at the first cell) if it was at the last cell.
    pub(crate) fn advance(&self, vector: &mut [usize]) -> bool {
        for (i, entry) in self.entries.iter().enumerate().rev() {
            vector[i] += 1;
            if vector[i] < entry.axis.size() { return true; }
            vector[i] = 0;
        }
        false
    }

    /// Steps `vector` to the previous cell in row-major order. Returns
    /// `false` (leaving `vector` at the last cell) if it was at the first cell.
    pub(crate) fn retreat(&self, vector: &mut [usize]) -> bool {
        for (i, entry) in self.entries.iter().enumerate().rev() {
            if vector[i] > 0 {
                vector[i] -= 1;
                return true;
            }
            vector[i] = entry.axis.size().saturating_sub(1);
        }
        false
    }

    /// Returns a locked structure made of only the axes selected by `specs`,
    /// in their original order, which shares this structure's steps.
    pub fn substructure_including(self: &Rc<Self>, specs: &[AxisSpec]) -> Result<Structure> {
        let selected = self.resolve_all(specs)?;
        self.derive(|p| selected.contains(&p))
    }

    /// Returns a locked structure made of only the axes not selected by
    /// `specs`, in their original order, which shares this structure's steps.
    ///
    /// ```
    /// use std::rc::{Rc};
    /// use ntable::{Axis, Structure};
    /// let mut s = Structure::new();
    /// s.add_named(Axis::indexed(3), "row")?.add_named(Axis::indexed(4), "col")?.lock();
    /// let s = Rc::new(s);
    /// let column = s.substructure_omitting(&["row".into()])?;
    /// assert_eq!(column.dim(), 1);
    /// assert_eq!(column.axis_name(0), Some("col"));
    /// assert_eq!(column.steps(), Some(&[1][..]));
    /// let row = s.substructure_omitting(&["col".into()])?;
    /// assert_eq!(row.steps(), Some(&[4][..]));
    /// assert!(row.parent().is_some());
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn substructure_omitting(self: &Rc<Self>, specs: &[AxisSpec]) -> Result<Structure> {
        let selected = self.resolve_all(specs)?;
        self.derive(|p| !selected.contains(&p))
    }

    fn resolve_all(&self, specs: &[AxisSpec]) -> Result<Vec<usize>> {
        specs.iter()
            .map(|spec| self.resolve(spec).ok_or_else(|| Error::UnknownAxis(spec.clone())))
            .collect()
    }

    pub(crate) fn derive(self: &Rc<Self>, keep: impl Fn(usize) -> bool) -> Result<Structure> {
        if !self.locked { return Err(Error::StructureNotLocked); }
        let mut entries = Vec::new();
        let mut steps = Vec::new();
        for (entry, &step) in self.entries.iter().zip(&self.steps) {
            if keep(entry.position) {
                entries.push(AxisEntry {position: entries.len(), ..entry.clone()});
                steps.push(step);
            }
        }
        tracing::trace!(from = self.dim(), to = entries.len(), "derived substructure");
        Ok(Structure {entries, locked: true, steps, parent: Some(self.clone())})
    }

    /// Returns an open structure with the same axes and names, and no parent.
    pub fn unlocked_copy(&self) -> Structure {
        let entries = self.entries.iter()
            .enumerate()
            .map(|(position, e)| AxisEntry {position, ..e.clone()})
            .collect();
        Structure {entries, locked: false, steps: Vec::new(), parent: None}
    }

    /// A locked structure with the same axes and names, and steps for a
    /// buffer of its own.
    pub(crate) fn compacted(&self) -> Structure {
        let mut s = self.unlocked_copy();
        s.lock();
        s
    }

    /// `true` if the structures have the same axes, names and steps, and were
    /// derived from the same structure (or neither was derived).
    ///
    /// Compare `==`, which ignores steps and parents.
    pub fn eql(&self, other: &Structure) -> bool {
        self == other && self.locked == other.locked && self.steps == other.steps && match (&self.parent, &other.parent) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b) || a.eql(b),
            _ => false,
        }
    }

    /// The records for all axes, in order. Fails if any axis is an object
    /// axis.
    pub fn to_records(&self) -> Result<Vec<AxisRecord>> {
        self.entries.iter()
            .map(|e| Ok(AxisRecord {name: e.name.clone(), config: e.axis.to_config()?}))
            .collect()
    }

    /// Constructs an open structure from axis records. Fails with
    /// [`Error::InvalidRecord`] if a record doesn't describe a valid axis.
    pub fn from_records(records: &[AxisRecord]) -> Result<Structure> {
        let mut s = Structure::new();
        for record in records {
            let axis = Axis::try_from(record.config.clone())?;
            match &record.name {
                Some(name) => s.add_named(axis, name.as_str())?,
                None => s.add(axis)?,
            };
        }
        Ok(s)
    }
}

/// Fails if the product of the nonzero sizes of `axes` overflows. That
/// bounds the size and every step computed by `lock()`.
fn check_size<'a>(axes: impl IntoIterator<Item=&'a Axis>) -> Result<()> {
    axes.into_iter()
        .try_fold(1usize, |n, axis| n.checked_mul(axis.size().max(1)))
        .map(|_| ())
        .ok_or_else(|| Error::Overflow("more than usize::MAX cells".into()))
}

/// Compares axes and names only.
impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool { self.entries == other.entries }
}

impl Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let axes = self.entries.iter().format_with(", ", |e, f| match e.name() {
            Some(name) => f(&format_args!("{}: {}({})", name, e.axis.kind(), e.axis.size())),
            None => f(&format_args!("{}({})", e.axis.kind(), e.axis.size())),
        });
        write!(f, "[{}]", axes)
    }
}

// ----------------------------------------------------------------------------

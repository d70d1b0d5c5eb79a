use std::cell::{RefCell};
use std::fmt::{self, Debug};
use std::rc::{Rc};

use serde::de::{DeserializeOwned};
use serde::{Serialize};

use super::{Coordinates, Position, Structure, Error, Result};
use super::iter::{Cursor, Iter, IterWithPosition};
use super::record::{TableRecord};

/// How to fill the buffer of a new [`Table`].
#[derive(Debug, Clone)]
pub enum Init<T> {
    /// Every cell gets a clone of the value.
    Fill(T),
    /// Cells get the given values in row-major order. Extra values are
    /// dropped, and missing values are clones of the second field.
    Load(Vec<T>, T),
    /// Use the given buffer, which must have exactly one value per cell.
    Adopt(Vec<T>),
}

/// A dense table of `T`s laid out by a [`Structure`].
///
/// Every `Table` is either an owned table, with a buffer of its own, or a
/// view, which reads the buffer of a parent table. Views are made by
/// [`shared_slice()`] and [`decompose()`]. A view sees later changes to its
/// parent, but cannot itself be modified: every mutating method of a view
/// fails with [`Error::TableLocked`].
///
/// Cloning an owned table copies its buffer. Cloning a view gives another
/// view of the same buffer.
///
/// ```
/// use ntable::{coords, Axis, Error, Structure, Table};
/// let mut s = Structure::new();
/// s.add_named(Axis::indexed(2), "row")?.add_named(Axis::labeled(["one", "two"]), "col")?;
/// let mut t = Table::loaded(s, vec![1, 2, 3, 4]);
/// assert_eq!(t.get(coords![0, "one"])?, 1);
/// assert_eq!(t.get(coords![1, "two"])?, 4);
/// let row = t.shared_slice(coords!{"row" => 1})?;
/// assert_eq!(row.to_vec(), [3, 4]);
/// t.set(coords![1, "one"], 30)?;
/// assert_eq!(row.to_vec(), [30, 4]);
/// let mut row = row;
/// assert!(matches!(row.set(coords!["one"], 0), Err(Error::TableLocked)));
/// assert!(matches!(t.get(coords![2, "one"]), Err(Error::NoSuchCell)));
/// # Ok::<(), ntable::Error>(())
/// ```
///
/// [`shared_slice()`]: Self::shared_slice()
/// [`decompose()`]: Self::decompose()
pub struct Table<T> {
    structure: Rc<Structure>,
    values: Rc<RefCell<Vec<T>>>,
    offset: usize,
    parent: Option<Rc<Table<T>>>,
}

impl<T> Table<T> {
    /// Constructs an owned `Table`, locking `structure` if necessary.
    ///
    /// A structure derived from another (see [`Structure::parent()`]) is
    /// replaced by a fresh copy laid out for a buffer of its own.
    ///
    /// Fails if `init` is [`Init::Adopt`] with the wrong number of values,
    /// or with [`Error::Overflow`] if the buffer would exceed `isize::MAX`
    /// bytes.
    pub fn new(structure: impl Into<Rc<Structure>>, init: Init<T>) -> Result<Self> where T: Clone {
        let structure = owned_structure(structure.into());
        let size = structure.size();
        let bytes = size.checked_mul(std::mem::size_of::<T>()).filter(|&b| isize::try_from(b).is_ok());
        if bytes.is_none() {
            return Err(Error::Overflow(format!("buffer of {} cells", size)));
        }
        let values = match init {
            Init::Fill(value) => vec![value; size],
            Init::Load(mut values, pad) => {
                values.resize(size, pad);
                values
            },
            Init::Adopt(values) => {
                if values.len() != size {
                    return Err(Error::StructureMismatch(
                        format!("buffer of length {} for structure of size {}", values.len(), size)
                    ));
                }
                values
            },
        };
        Ok(Self::adopt(structure, values))
    }

    /// Constructs an owned `Table` with every cell set to `value`.
    pub fn filled(structure: impl Into<Rc<Structure>>, value: T) -> Self where T: Clone {
        let structure = owned_structure(structure.into());
        let values = vec![value; structure.size()];
        Self::adopt(structure, values)
    }

    /// Constructs an owned `Table` from `values` in row-major order. Missing
    /// values are `T::default()`.
    pub fn loaded(structure: impl Into<Rc<Structure>>, mut values: Vec<T>) -> Self where T: Clone + Default {
        let structure = owned_structure(structure.into());
        values.resize(structure.size(), T::default());
        Self::adopt(structure, values)
    }

    /// `structure` must be compact and `values` must have one value per cell.
    pub(crate) fn adopt(structure: Rc<Structure>, values: Vec<T>) -> Self {
        assert_eq!(structure.size(), values.len());
        Self {structure, values: Rc::new(RefCell::new(values)), offset: 0, parent: None}
    }

    /// A view of the buffer of `self` laid out by `structure`, which must be
    /// derived from `self.structure()`.
    pub(crate) fn view(&self, structure: Rc<Structure>, offset: usize, parent: &Rc<Table<T>>) -> Self {
        Self {
            structure,
            values: self.values.clone(),
            offset: self.offset + offset,
            parent: Some(parent.clone()),
        }
    }

    /// A shallow copy of `self`, sharing its buffer, for use as the parent of
    /// views.
    pub(crate) fn handle(&self) -> Rc<Table<T>> {
        Rc::new(Self {
            structure: self.structure.clone(),
            values: self.values.clone(),
            offset: self.offset,
            parent: self.parent.clone(),
        })
    }

    pub fn structure(&self) -> &Rc<Structure> { &self.structure }

    /// The number of axes.
    pub fn dim(&self) -> usize { self.structure.dim() }

    /// The number of cells.
    pub fn size(&self) -> usize { self.structure.size() }

    /// `true` if this table is a view of another table's buffer.
    pub fn is_view(&self) -> bool { self.parent.is_some() }

    /// The table this one is a view of, if any.
    pub fn parent(&self) -> Option<&Table<T>> { self.parent.as_deref() }

    pub(crate) fn cursor(&self) -> Cursor { Cursor::new(self.structure.clone(), self.offset) }

    pub(crate) fn at(&self, i: usize) -> T where T: Clone { self.values.borrow()[i].clone() }

    fn check_mutable(&self) -> Result<()> {
        if self.is_view() { Err(Error::TableLocked) } else { Ok(()) }
    }

    fn index(&self, coords: &Coordinates) -> Result<Option<usize>> {
        Ok(self.structure.offset(coords)?.map(|o| self.offset + o))
    }

    fn index_or_fail(&self, coords: &Coordinates) -> Result<usize> {
        self.index(coords)?.ok_or(Error::NoSuchCell)
    }

    /// Returns the value at `coords`.
    pub fn get(&self, coords: impl Into<Coordinates>) -> Result<T> where T: Clone {
        let i = self.index_or_fail(&coords.into())?;
        Ok(self.at(i))
    }

    /// `true` if `coords` identify a cell of this table.
    ///
    /// ```
    /// use ntable::{coords, Axis, Structure, Table};
    /// let mut s = Structure::new();
    /// s.add(Axis::indexed(10))?.add(Axis::labeled(["red", "white", "blue"]))?;
    /// let t = Table::filled(s, 0);
    /// assert!(t.include(coords![9, "blue"]));
    /// assert!(!t.include(coords![10, "red"]));
    /// assert!(!t.include(coords![0, "black"]));
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn include(&self, coords: impl Into<Coordinates>) -> bool {
        matches!(self.index(&coords.into()), Ok(Some(_)))
    }

    /// Replaces the value at `coords`.
    pub fn set(&mut self, coords: impl Into<Coordinates>, value: T) -> Result<()> {
        self.check_mutable()?;
        let i = self.index_or_fail(&coords.into())?;
        self.values.borrow_mut()[i] = value;
        Ok(())
    }

    /// Replaces the value at `coords` with a function of its old value.
    pub fn update(&mut self, coords: impl Into<Coordinates>, f: impl FnOnce(&T) -> T) -> Result<()> {
        self.check_mutable()?;
        let i = self.index_or_fail(&coords.into())?;
        let value = f(&self.values.borrow()[i]);
        self.values.borrow_mut()[i] = value;
        Ok(())
    }

    /// Replaces the first `values.len()` values in row-major order. Extra
    /// values are dropped, and the remaining cells keep their old values.
    pub fn load(&mut self, values: impl IntoIterator<Item=T>) -> Result<()> {
        self.check_mutable()?;
        // `values` may read this buffer, e.g. through a view.
        let cells: Vec<(usize, T)> = self.cursor().zip(values).collect();
        let mut buffer = self.values.borrow_mut();
        for (i, value) in cells { buffer[i] = value; }
        Ok(())
    }

    /// Replaces every value with a clone of `value`.
    pub fn fill(&mut self, value: T) -> Result<()> where T: Clone {
        self.check_mutable()?;
        let mut buffer = self.values.borrow_mut();
        for i in self.cursor() { buffer[i] = value.clone(); }
        Ok(())
    }

    /// The values in row-major order: the last axis varies fastest.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(self) }

    /// The values in row-major order, each with its [`Position`].
    pub fn iter_with_position(&self) -> IterWithPosition<'_, T> { IterWithPosition::new(self) }

    /// The values in row-major order.
    pub fn to_vec(&self) -> Vec<T> where T: Clone { self.iter().collect() }

    /// An owned copy of this table, with a buffer of its own.
    pub fn compact(&self) -> Table<T> where T: Clone {
        let structure = if self.is_view() { Rc::new(self.structure.compacted()) } else { self.structure.clone() };
        Table::adopt(structure, self.to_vec())
    }

    /// The structure of a new table with the shape of `self`.
    fn result_structure(&self) -> Rc<Structure> {
        if self.is_view() { Rc::new(self.structure.compacted()) } else { self.structure.clone() }
    }

    /// Applies `f` to every value, giving an owned table of the same shape.
    ///
    /// ```
    /// use ntable::{coords, Axis, Structure, Table};
    /// let mut s = Structure::new();
    /// s.add(Axis::indexed_from(10, 1))?.add(Axis::labeled(["one", "two"]))?;
    /// let t = Table::loaded(s, (2..22).collect());
    /// let doubled = t.map(|v| v * 2);
    /// assert_eq!(doubled.get(coords![1, "two"])?, 6);
    /// assert_eq!(doubled.get(coords![10, "two"])?, 42);
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Table<U> where T: Clone {
        Table::adopt(self.result_structure(), self.iter().map(f).collect())
    }

    /// Like [`map()`], but `f` also gets the [`Position`] of each value.
    ///
    /// [`map()`]: Self::map()
    pub fn map_with_position<U>(&self, mut f: impl FnMut(T, &Position) -> U) -> Table<U> where T: Clone {
        let values = self.iter_with_position().map(|(v, p)| f(v, &p)).collect();
        Table::adopt(self.result_structure(), values)
    }

    /// Replaces every value with `f` of that value.
    pub fn map_in_place(&mut self, mut f: impl FnMut(&T) -> T) -> Result<()> {
        self.check_mutable()?;
        for i in self.cursor() {
            let value = f(&self.values.borrow()[i]);
            self.values.borrow_mut()[i] = value;
        }
        Ok(())
    }

    /// Like [`map_in_place()`], but `f` also gets the [`Position`] of each
    /// value.
    ///
    /// [`map_in_place()`]: Self::map_in_place()
    pub fn map_with_position_in_place(&mut self, mut f: impl FnMut(&T, &Position) -> T) -> Result<()> {
        self.check_mutable()?;
        let mut cursor = self.cursor();
        while let Some(i) = cursor.next() {
            let value = f(&self.values.borrow()[i], &cursor.position());
            self.values.borrow_mut()[i] = value;
        }
        Ok(())
    }

    /// Combines the values in row-major order, starting with the first.
    /// Returns `None` if the table has no cells.
    pub fn reduce(&self, f: impl FnMut(T, T) -> T) -> Option<T> where T: Clone {
        self.iter().reduce(f)
    }

    /// Combines the values in row-major order, starting with `init`.
    pub fn fold<A>(&self, init: A, f: impl FnMut(A, T) -> A) -> A where T: Clone {
        self.iter().fold(init, f)
    }

    /// Like [`reduce()`], but `f` also gets the [`Position`] of each value
    /// after the first.
    ///
    /// [`reduce()`]: Self::reduce()
    pub fn reduce_with_position(&self, mut f: impl FnMut(T, T, &Position) -> T) -> Option<T> where T: Clone {
        let mut iter = self.iter_with_position();
        let (first, _) = iter.next()?;
        Some(iter.fold(first, |a, (v, p)| f(a, v, &p)))
    }

    /// Like [`fold()`], but `f` also gets the [`Position`] of each value.
    ///
    /// [`fold()`]: Self::fold()
    pub fn fold_with_position<A>(&self, init: A, mut f: impl FnMut(A, T, &Position) -> A) -> A where T: Clone {
        self.iter_with_position().fold(init, |a, (v, p)| f(a, v, &p))
    }

    /// The record form of this table. Fails if any axis is an object axis.
    pub fn to_record(&self) -> Result<TableRecord<T>> where T: Clone {
        Ok(TableRecord {axes: self.structure.to_records()?, values: self.to_vec()})
    }

    /// Constructs an owned table from its record form. Missing values are
    /// `T::default()`.
    pub fn from_record(record: TableRecord<T>) -> Result<Self> where T: Clone + Default {
        let structure = Structure::from_records(&record.axes)?;
        tracing::debug!(dim = structure.dim(), values = record.values.len(), "table from record");
        Table::new(structure, Init::Load(record.values, T::default()))
    }

    /// Serializes the record form of this table as JSON.
    ///
    /// ```
    /// use ntable::{Axis, Structure, Table};
    /// let mut s = Structure::new();
    /// s.add_named(Axis::indexed_from(2, 1), "row")?.add(Axis::labeled(["a", "b"]))?;
    /// let t = Table::loaded(s, vec![1, 2, 3, 4]);
    /// let json = t.to_json()?;
    /// assert_eq!(json, concat!(
    ///     r#"{"type":"table","axes":[{"type":"indexed","name":"row","size":2,"start":1},"#,
    ///     r#"{"type":"labeled","labels":["a","b"]}],"values":[1,2,3,4]}"#,
    /// ));
    /// assert_eq!(Table::<i32>::parse_json(&json)?, t);
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn to_json(&self) -> Result<String> where T: Clone + Serialize {
        Ok(serde_json::to_string(&self.to_record()?)?)
    }

    /// Parses a table from the JSON form of its record.
    pub fn parse_json(json: &str) -> Result<Self> where T: Clone + Default + DeserializeOwned {
        let record: TableRecord<T> = serde_json::from_str(json)?;
        Self::from_record(record)
    }
}

/// Locks `structure`, first replacing it with a compact copy if it is
/// derived from another structure.
fn owned_structure(mut structure: Rc<Structure>) -> Rc<Structure> {
    if structure.parent().is_some() {
        structure = Rc::new(structure.compacted());
    }
    if !structure.is_locked() {
        Rc::make_mut(&mut structure).lock();
    }
    structure
}

impl<T: Clone> Clone for Table<T> {
    fn clone(&self) -> Self {
        if self.is_view() {
            Self {
                structure: self.structure.clone(),
                values: self.values.clone(),
                offset: self.offset,
                parent: self.parent.clone(),
            }
        } else {
            self.compact()
        }
    }
}

/// Tables are equal if their structures are `==` and their values are equal
/// in row-major order. Views and owned tables can be equal.
impl<T: PartialEq> PartialEq for Table<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.structure != other.structure { return false; }
        let a = self.values.borrow();
        let b = other.values.borrow();
        self.cursor().zip(other.cursor()).all(|(i, j)| a[i] == b[j])
    }
}

impl<T: Debug> Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let buffer = self.values.borrow();
        let values: Vec<&T> = self.cursor().map(|i| &buffer[i]).collect();
        f.debug_struct("Table")
            .field("structure", &format_args!("{}", self.structure))
            .field("view", &self.is_view())
            .field("values", &values)
            .finish()
    }
}

// ----------------------------------------------------------------------------

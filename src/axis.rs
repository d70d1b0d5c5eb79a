//! Axes, which give each dimension of a table its size and labeling scheme.
//!
//! An [`Axis`] maps between 0-based indices and [`Label`]s. There are four
//! kinds:
//!
//! - [`Axis::Empty`] has no rows at all.
//! - [`IndexedAxis`] labels its rows with a contiguous range of integers.
//! - [`LabeledAxis`] labels its rows with distinct strings.
//! - [`ObjectAxis`] labels its rows with distinct [`Label`]s compared exactly.
//!   Unlike the others it has no record form.

use std::collections::{HashMap};
use std::hash::{Hash, Hasher};

use super::{Label, Error, Result};
use super::record::{AxisConfig};

/// One dimension of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Empty,
    Indexed(IndexedAxis),
    Labeled(LabeledAxis),
    Object(ObjectAxis),
}

impl Axis {
    /// An [`IndexedAxis`] with labels `0..size`.
    pub fn indexed(size: usize) -> Self { Axis::Indexed(IndexedAxis::new(size, 0)) }

    /// An [`IndexedAxis`] with labels `start..start + size`.
    ///
    /// # Panics
    ///
    /// Panics if the last label doesn't fit in an `i64`.
    pub fn indexed_from(size: usize, start: i64) -> Self { Axis::Indexed(IndexedAxis::new(size, start)) }

    /// A [`LabeledAxis`] with the given labels, in order.
    ///
    /// # Panics
    ///
    /// Panics if two labels have the same string form.
    pub fn labeled<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Self {
        Axis::Labeled(LabeledAxis::new(labels))
    }

    /// An [`ObjectAxis`] with the given labels, in order.
    ///
    /// # Panics
    ///
    /// Panics if two labels are equal.
    pub fn object<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Self {
        Axis::Object(ObjectAxis::new(labels))
    }

    /// Like [`labeled()`], but fails with [`Error::DuplicateLabel`] instead
    /// of panicking.
    ///
    /// ```
    /// use ntable::{Axis, Error};
    /// assert_eq!(Axis::try_labeled(["a", "b"])?, Axis::labeled(["a", "b"]));
    /// assert!(matches!(Axis::try_labeled(["a", " a"]), Err(Error::DuplicateLabel(_))));
    /// # Ok::<(), ntable::Error>(())
    /// ```
    ///
    /// [`labeled()`]: Self::labeled()
    pub fn try_labeled<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Result<Self> {
        Ok(Axis::Labeled(LabeledAxis::try_new(labels)?))
    }

    /// Like [`object()`], but fails with [`Error::DuplicateLabel`] instead
    /// of panicking.
    ///
    /// [`object()`]: Self::object()
    pub fn try_object<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Result<Self> {
        Ok(Axis::Object(ObjectAxis::try_new(labels)?))
    }

    /// The number of rows.
    pub fn size(&self) -> usize {
        match self {
            Axis::Empty => 0,
            Axis::Indexed(a) => a.size,
            Axis::Labeled(a) => a.labels.len(),
            Axis::Object(a) => a.labels.len(),
        }
    }

    /// Returns the 0-based index of the row labeled `label`, if any.
    ///
    /// A `Label::Index` is accepted by every kind of axis as long as it is in
    /// range.
    ///
    /// ```
    /// use ntable::{Axis, Label};
    /// let axis = Axis::labeled(["red", "white", "blue"]);
    /// assert_eq!(axis.index_of(&Label::from("white")), Some(1));
    /// assert_eq!(axis.index_of(&Label::from("black")), None);
    /// assert_eq!(axis.index_of(&ntable::index(2)), Some(2));
    /// ```
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        if let Label::Index(i) = label {
            return if *i < self.size() { Some(*i) } else { None };
        }
        match self {
            Axis::Empty => None,
            Axis::Indexed(a) => a.index_of(label),
            Axis::Labeled(a) => a.index_of(label),
            Axis::Object(a) => a.lookup.get(label).copied(),
        }
    }

    /// Returns the label of the row at 0-based `index`, if in range.
    pub fn label_of(&self, index: usize) -> Option<Label> {
        match self {
            Axis::Empty => None,
            Axis::Indexed(a) => a.label_of(index).map(Label::Int),
            Axis::Labeled(a) => a.labels.get(index).cloned().map(Label::Str),
            Axis::Object(a) => a.labels.get(index).cloned(),
        }
    }

    /// All labels, in index order.
    pub fn labels(&self) -> impl Iterator<Item=Label> + '_ {
        (0..self.size()).filter_map(move |i| self.label_of(i))
    }

    /// Returns an axis whose rows are those of `self` followed by those of
    /// `other`, if the two can be joined.
    ///
    /// Indexed axes join, keeping the start of `self`, as long as the labels
    /// still fit in an `i64`. Labeled axes
    /// and object axes join if they have no label in common. Axes of
    /// different kinds never join.
    ///
    /// ```
    /// use ntable::{Axis};
    /// assert_eq!(Axis::indexed_from(10, 1).concat(&Axis::indexed(2)), Some(Axis::indexed_from(12, 1)));
    /// assert_eq!(
    ///     Axis::labeled(["one", "two"]).concat(&Axis::labeled(["red"])),
    ///     Some(Axis::labeled(["one", "two", "red"])),
    /// );
    /// assert_eq!(Axis::labeled(["one"]).concat(&Axis::labeled(["one"])), None);
    /// assert_eq!(Axis::labeled(["one"]).concat(&Axis::indexed(1)), None);
    /// ```
    pub fn concat(&self, other: &Axis) -> Option<Axis> {
        match (self, other) {
            (Axis::Empty, Axis::Empty) => Some(Axis::Empty),
            (Axis::Indexed(a), Axis::Indexed(b)) => {
                IndexedAxis::try_new(a.size.checked_add(b.size)?, a.start).ok().map(Axis::Indexed)
            },
            (Axis::Labeled(a), Axis::Labeled(b)) => {
                if b.labels.iter().any(|l| a.lookup.contains_key(l)) { return None; }
                Some(Axis::labeled(a.labels.iter().chain(&b.labels)))
            },
            (Axis::Object(a), Axis::Object(b)) => {
                if b.labels.iter().any(|l| a.lookup.contains_key(l)) { return None; }
                Some(Axis::object(a.labels.iter().chain(&b.labels).cloned()))
            },
            _ => None,
        }
    }

    /// The name of this kind of axis, as used in axis records.
    pub fn kind(&self) -> &'static str {
        match self {
            Axis::Empty => "empty",
            Axis::Indexed(_) => "indexed",
            Axis::Labeled(_) => "labeled",
            Axis::Object(_) => "object",
        }
    }

    /// The record form of this axis. Fails for object axes.
    pub fn to_config(&self) -> Result<AxisConfig> {
        Ok(match self {
            Axis::Empty => AxisConfig::Empty,
            Axis::Indexed(a) => AxisConfig::Indexed {size: a.size, start: a.start},
            Axis::Labeled(a) => AxisConfig::Labeled {labels: a.labels.clone()},
            Axis::Object(_) => return Err(Error::Unsupported("object axes have no record form".into())),
        })
    }
}

impl From<IndexedAxis> for Axis {
    fn from(a: IndexedAxis) -> Self { Axis::Indexed(a) }
}

impl From<LabeledAxis> for Axis {
    fn from(a: LabeledAxis) -> Self { Axis::Labeled(a) }
}

impl From<ObjectAxis> for Axis {
    fn from(a: ObjectAxis) -> Self { Axis::Object(a) }
}

/// Fails with [`Error::InvalidRecord`] if the labels of an indexed axis
/// don't fit in an `i64`, or two labels of a labeled axis collide.
impl TryFrom<AxisConfig> for Axis {
    type Error = Error;

    fn try_from(config: AxisConfig) -> Result<Self> {
        let axis = match config {
            AxisConfig::Empty => Ok(Axis::Empty),
            AxisConfig::Indexed {size, start} => IndexedAxis::try_new(size, start).map(Axis::Indexed),
            AxisConfig::Labeled {labels} => Axis::try_labeled(labels),
        };
        axis.map_err(|e| Error::InvalidRecord(e.to_string()))
    }
}

// ----------------------------------------------------------------------------

/// An axis labeled by the integers `start..start + size`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct IndexedAxis {
    size: usize,
    start: i64,
}

impl IndexedAxis {
    /// # Panics
    ///
    /// Panics if the last label doesn't fit in an `i64`.
    pub fn new(size: usize, start: i64) -> Self {
        match Self::try_new(size, start) {
            Ok(axis) => axis,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fails with [`Error::Overflow`] if the last label doesn't fit in an
    /// `i64`.
    pub fn try_new(size: usize, start: i64) -> Result<Self> {
        let fits = size == 0 || i64::try_from(size - 1).ok().and_then(|n| start.checked_add(n)).is_some();
        if !fits {
            return Err(Error::Overflow(format!("indexed axis of size {} starting at {}", size, start)));
        }
        Ok(Self {size, start})
    }

    pub fn size(&self) -> usize { self.size }

    pub fn start(&self) -> i64 { self.start }

    fn index_of(&self, label: &Label) -> Option<usize> {
        let n = label.as_int()?;
        let i = usize::try_from(n.checked_sub(self.start)?).ok()?;
        if i < self.size { Some(i) } else { None }
    }

    fn label_of(&self, index: usize) -> Option<i64> {
        if index >= self.size { return None; }
        self.start.checked_add(i64::try_from(index).ok()?)
    }
}

// ----------------------------------------------------------------------------

/// An axis labeled by distinct strings.
///
/// Labels are compared by their trimmed string form, so `Label::Int(3)` finds
/// the row labeled `"3"`.
#[derive(Debug, Clone)]
pub struct LabeledAxis {
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl LabeledAxis {
    /// # Panics
    ///
    /// Panics if two labels have the same string form.
    pub fn new<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Self {
        match Self::try_new(labels) {
            Ok(axis) => axis,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fails with [`Error::DuplicateLabel`] if two labels have the same
    /// string form.
    pub fn try_new<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Result<Self> {
        let mut lookup = HashMap::new();
        let labels: Vec<String> = labels.into_iter()
            .map(|l| {
                let l: Label = l.into();
                l.key().unwrap_or_else(|| l.to_string())
            })
            .collect();
        for (i, l) in labels.iter().enumerate() {
            if lookup.insert(l.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(l.clone()));
            }
        }
        Ok(Self {labels, lookup})
    }

    pub fn labels(&self) -> &[String] { &self.labels }

    fn index_of(&self, label: &Label) -> Option<usize> {
        self.lookup.get(&label.key()?).copied()
    }
}

impl PartialEq for LabeledAxis {
    fn eq(&self, other: &Self) -> bool { self.labels == other.labels }
}

impl Eq for LabeledAxis {}

impl Hash for LabeledAxis {
    fn hash<H: Hasher>(&self, state: &mut H) { self.labels.hash(state) }
}

// ----------------------------------------------------------------------------

/// An axis labeled by distinct [`Label`]s, compared exactly.
///
/// `Label::Int(3)` and `Label::Str("3")` are different labels on an
/// `ObjectAxis`.
#[derive(Debug, Clone)]
pub struct ObjectAxis {
    labels: Vec<Label>,
    lookup: HashMap<Label, usize>,
}

impl ObjectAxis {
    /// # Panics
    ///
    /// Panics if two labels are equal.
    pub fn new<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Self {
        match Self::try_new(labels) {
            Ok(axis) => axis,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fails with [`Error::DuplicateLabel`] if two labels are equal.
    pub fn try_new<L: Into<Label>>(labels: impl IntoIterator<Item=L>) -> Result<Self> {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        let mut lookup = HashMap::new();
        for (i, l) in labels.iter().enumerate() {
            if lookup.insert(l.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(l.to_string()));
            }
        }
        Ok(Self {labels, lookup})
    }

    pub fn labels(&self) -> &[Label] { &self.labels }
}

impl PartialEq for ObjectAxis {
    fn eq(&self, other: &Self) -> bool { self.labels == other.labels }
}

impl Eq for ObjectAxis {}

impl Hash for ObjectAxis {
    fn hash<H: Hasher>(&self, state: &mut H) { self.labels.hash(state) }
}

// ----------------------------------------------------------------------------

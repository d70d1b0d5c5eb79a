use std::fmt::{self, Display};

/// A label identifying one row of an [`Axis`].
///
/// What a label means depends on the axis that interprets it. An indexed
/// axis reads `Label::Int` as a number in its range; a labeled axis compares
/// the trimmed string form of `Int` and `Str` labels; an object axis compares
/// labels exactly. Every axis reads `Label::Index` as a raw 0-based index.
///
/// [`Axis`]: super::Axis
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Str(String),
    /// A raw 0-based index, bypassing the axis' labeling scheme.
    Index(usize),
}

impl Label {
    /// The integer value, if this is a `Label::Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self { Label::Int(n) => Some(*n), _ => None }
    }

    /// The string value, if this is a `Label::Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self { Label::Str(s) => Some(s), _ => None }
    }

    /// The form used by labeled axes to compare labels.
    ///
    /// Returns `None` for `Label::Index`, which is never compared by value.
    ///
    /// ```
    /// use ntable::Label;
    /// assert_eq!(Label::from(" one ").key().as_deref(), Some("one"));
    /// assert_eq!(Label::from(12).key().as_deref(), Some("12"));
    /// assert_eq!(ntable::index(3).key(), None);
    /// ```
    pub fn key(&self) -> Option<String> {
        match self {
            Label::Int(n) => Some(n.to_string()),
            Label::Str(s) => Some(s.trim().to_string()),
            Label::Index(_) => None,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Int(n) => write!(f, "{}", n),
            Label::Str(s) => write!(f, "{}", s),
            Label::Index(i) => write!(f, "#{}", i),
        }
    }
}

impl From<i64> for Label {
    fn from(n: i64) -> Self { Label::Int(n) }
}

impl From<i32> for Label {
    fn from(n: i32) -> Self { Label::Int(n.into()) }
}

impl From<u32> for Label {
    fn from(n: u32) -> Self { Label::Int(n.into()) }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self { Label::Str(s.to_string()) }
}

impl From<String> for Label {
    fn from(s: String) -> Self { Label::Str(s) }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self { Label::Str(s.clone()) }
}

impl From<IndexWrapper> for Label {
    fn from(i: IndexWrapper) -> Self { Label::Index(i.0) }
}

// ----------------------------------------------------------------------------

/// Forces a coordinate to be interpreted as a raw 0-based index, even on an
/// axis whose labels could be confused with integers.
///
/// ```
/// use ntable::{Axis, IndexWrapper, Label};
/// let axis = Axis::indexed_from(10, 1);
/// assert_eq!(axis.index_of(&Label::from(5)), Some(4));
/// assert_eq!(axis.index_of(&IndexWrapper(5).into()), Some(5));
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexWrapper(pub usize);

impl IndexWrapper {
    pub fn value(self) -> usize { self.0 }
}

// ----------------------------------------------------------------------------

/// Identifies one axis of a [`Structure`], either by its 0-based position or
/// by its name.
///
/// [`Structure`]: super::Structure
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum AxisSpec {
    Position(usize),
    Name(String),
}

impl Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AxisSpec::Position(p) => write!(f, "{}", p),
            AxisSpec::Name(n) => write!(f, "`{}`", n),
        }
    }
}

impl From<usize> for AxisSpec {
    fn from(p: usize) -> Self { AxisSpec::Position(p) }
}

/// Negative positions never resolve.
impl From<i32> for AxisSpec {
    fn from(p: i32) -> Self { AxisSpec::Position(usize::try_from(p).unwrap_or(usize::MAX)) }
}

impl From<&str> for AxisSpec {
    fn from(n: &str) -> Self { AxisSpec::Name(n.to_string()) }
}

impl From<String> for AxisSpec {
    fn from(n: String) -> Self { AxisSpec::Name(n) }
}

impl From<&AxisSpec> for AxisSpec {
    fn from(spec: &AxisSpec) -> Self { spec.clone() }
}

// ----------------------------------------------------------------------------

/// The coordinates of a cell, as passed to [`Table::get()`] and friends.
///
/// Positional coordinates give one label per axis in declared axis order.
/// Keyed coordinates pair an [`AxisSpec`] with a label. In both forms, axes
/// that are not mentioned are addressed at index `0`.
///
/// The [`coords!`] macro builds either form.
///
/// ```
/// use ntable::{coords, AxisSpec, Coordinates, Label};
/// assert_eq!(coords![1, "two"], Coordinates::ByPosition(vec![Label::from(1), Label::from("two")]));
/// assert_eq!(coords!{"row" => 1}, Coordinates::ByName(vec![(AxisSpec::from("row"), Label::from(1))]));
/// ```
///
/// [`Table::get()`]: super::Table::get()
/// [`coords!`]: crate::coords
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coordinates {
    ByPosition(Vec<Label>),
    ByName(Vec<(AxisSpec, Label)>),
}

impl Coordinates {
    /// No coordinates at all. This addresses the only cell of a
    /// 0-dimensional table.
    pub fn none() -> Self { Coordinates::ByPosition(Vec::new()) }

    pub fn len(&self) -> usize {
        match self {
            Coordinates::ByPosition(labels) => labels.len(),
            Coordinates::ByName(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The `(axis, label)` pairs, with positional coordinates numbered in
    /// order.
    pub fn pairs(&self) -> Vec<(AxisSpec, &Label)> {
        match self {
            Coordinates::ByPosition(labels) => labels.iter()
                .enumerate()
                .map(|(i, label)| (AxisSpec::Position(i), label))
                .collect(),
            Coordinates::ByName(pairs) => pairs.iter()
                .map(|(spec, label)| (spec.clone(), label))
                .collect(),
        }
    }
}

impl Default for Coordinates {
    fn default() -> Self { Self::none() }
}

impl From<()> for Coordinates {
    fn from((): ()) -> Self { Self::none() }
}

impl From<Vec<Label>> for Coordinates {
    fn from(labels: Vec<Label>) -> Self { Coordinates::ByPosition(labels) }
}

impl From<Vec<(AxisSpec, Label)>> for Coordinates {
    fn from(pairs: Vec<(AxisSpec, Label)>) -> Self { Coordinates::ByName(pairs) }
}

impl<L: Into<Label>, const N: usize> From<[L; N]> for Coordinates {
    fn from(labels: [L; N]) -> Self {
        Coordinates::ByPosition(labels.into_iter().map(Into::into).collect())
    }
}

impl From<&Coordinates> for Coordinates {
    fn from(coords: &Coordinates) -> Self { coords.clone() }
}

/// Construct [`Coordinates`].
///
/// `coords![a, b, c]` gives positional coordinates; `coords!{x => a, y => b}`
/// gives keyed coordinates, where each key is anything that converts into an
/// [`AxisSpec`].
///
/// ```
/// use ntable::{coords, index, Axis, Structure, Table};
/// let mut s = Structure::new();
/// s.add_named(Axis::indexed(2), "row")?.add_named(Axis::labeled(["one", "two"]), "col")?;
/// let t = Table::loaded(s, vec![1, 2, 3, 4]);
/// assert_eq!(t.get(coords![1, "one"])?, 3);
/// assert_eq!(t.get(coords!{"col" => "two", "row" => 0})?, 2);
/// assert_eq!(t.get(coords![index(1), index(1)])?, 4);
/// # Ok::<(), ntable::Error>(())
/// ```
#[macro_export]
macro_rules! coords {
    ($($key:expr => $label:expr),+ $(,)?) => {
        $crate::Coordinates::ByName(vec![
            $(($crate::AxisSpec::from($key), $crate::Label::from($label))),+
        ])
    };
    ($($label:expr),* $(,)?) => {
        $crate::Coordinates::ByPosition(vec![$($crate::Label::from($label)),*])
    };
}

// ----------------------------------------------------------------------------

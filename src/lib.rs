//! A pure-Rust library providing dense, N-dimensional tables with labeled
//! axes.
//!
//! A [`Table<T>`] stores one `T` for every cell of a [`Structure`]. The `T`
//! values are internally stored in a single flat buffer, in row-major order.
//! The purpose of the `Structure` is to make the buffer look like a
//! multi-dimensional collection. It is an ordered list of [`Axis`]es, each
//! optionally named, and each with its own labeling scheme: a contiguous range
//! of integers, a list of strings, or a list of arbitrary [`Label`]s. Cells
//! are addressed by [`Coordinates`], which give a label for some or all of
//! the axes, either in order or by axis name. The [`coords!`] macro builds
//! them.
//!
//! A `Structure` is open while it is being built, and is locked when a
//! `Table` is made from it. Locking fixes the step of each axis, i.e. how far
//! apart in the flat buffer consecutive rows of that axis are.
//!
//! Some `Table`s are views: they read the buffer of another table through a
//! structure derived from that table's structure, which keeps its steps. Use
//! [`Table::shared_slice()`] to fix some axes at particular labels, and
//! [`Table::decompose()`] to make a table of tables. Views see later changes
//! to their parent table, but cannot be modified themselves. Use
//! [`Table::slice()`] or [`Table::compact()`] to make an independent copy.
//!
//! Tables can be joined along an axis with [`Table::concat()`] or `+`, and
//! converted to and from a JSON record with [`Table::to_json()`] and
//! [`Table::parse_json()`], or to and from nested JSON objects and arrays
//! with [`Table::from_nested()`] and [`Table::to_nested()`].
//!
//! ```
//! use ntable::{coords, Axis, Structure, Table};
//! let mut s = Structure::new();
//! s.add_named(Axis::indexed(2), "row")?.add_named(Axis::labeled(["one", "two"]), "col")?;
//! let t = Table::loaded(s, vec![1, 2, 3, 4]);
//! assert_eq!(t.get(coords![0, "one"])?, 1);
//! assert_eq!(t.get(coords![1, "two"])?, 4);
//! let row = t.slice(coords!{"row" => 1})?;
//! assert_eq!(row.dim(), 1);
//! assert_eq!(row.to_vec(), [3, 4]);
//! assert_eq!(t.reduce(|a, b| a + b), Some(10));
//! # Ok::<(), ntable::Error>(())
//! ```

mod error;
pub use error::{Error, Result};

mod index;
pub use index::{Label, IndexWrapper, AxisSpec, Coordinates};

pub mod axis;
pub use axis::{Axis, IndexedAxis, LabeledAxis, ObjectAxis};

pub mod record;
pub use record::{AxisConfig, AxisRecord, TableRecord};

mod structure;
pub use structure::{AxisEntry, Structure};

mod position;
pub use position::{Position};

mod iter;
pub use iter::{Iter, IterWithPosition};

mod table;
pub use table::{Init, Table};

mod view;

mod ops;

pub mod nested;
pub use nested::{FieldOptions, NestedOptions, SortStrategy};

/// Forces a coordinate to be read as a raw 0-based index. See
/// [`IndexWrapper`].
///
/// ```
/// use ntable::{coords, index, Axis, Structure, Table};
/// let mut s = Structure::new();
/// s.add(Axis::indexed_from(10, 1))?;
/// let t = Table::loaded(s, (0..10).collect());
/// assert_eq!(t.get(coords![5])?, 4);
/// assert_eq!(t.get(coords![index(5)])?, 5);
/// # Ok::<(), ntable::Error>(())
/// ```
pub fn index(n: usize) -> Label { IndexWrapper(n).into() }

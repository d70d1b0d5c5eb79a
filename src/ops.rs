use std::ops::{Add};
use std::rc::{Rc};

use itertools::{izip};

use super::{AxisSpec, Structure, Table, Error, Result};

fn mismatch(reason: impl Into<String>) -> Error { Error::StructureMismatch(reason.into()) }

/// Finds the axis along which `a` and `b` can be concatenated.
///
/// Prefers an axis that differs between `a` and `b` and can be joined while
/// every other axis is equal. Failing that, takes the first axis that can be
/// joined at all.
fn find_concat_axis(a: &Structure, b: &Structure) -> Option<usize> {
    let joinable = |i: usize| a.entries()[i].axis().concat(b.entries()[i].axis()).is_some();
    let others_equal = |i: usize| izip!(0.., a.entries(), b.entries())
        .all(|(j, x, y)| j == i || x.axis() == y.axis());
    (0..a.dim())
        .find(|&i| a.entries()[i].axis() != b.entries()[i].axis() && joinable(i) && others_equal(i))
        .or_else(|| (0..a.dim()).find(|&i| joinable(i)))
}

impl<T: Clone> Table<T> {
    /// Joins two tables along one axis.
    ///
    /// The tables must have the same number of axes, with the same names. The
    /// axes at `axis` must be joinable by [`Axis::concat()`], and all other
    /// axes must be equal. If `axis` is `None`, a suitable axis is found.
    ///
    /// The result is an owned table whose values along the joined axis are
    /// those of `self` followed by those of `other`.
    ///
    /// ```
    /// use ntable::{coords, Axis, Structure, Table};
    /// let mut s1 = Structure::new();
    /// s1.add_named(Axis::indexed(2), "row")?.add_named(Axis::labeled(["one", "two"]), "col")?;
    /// let t1 = Table::loaded(s1, vec![1, 2, 3, 4]);
    /// let mut s2 = Structure::new();
    /// s2.add_named(Axis::indexed(2), "row")?.add_named(Axis::labeled(["red", "white", "blue"]), "col")?;
    /// let t2 = Table::loaded(s2, vec![11, 12, 13, 14, 15, 16]);
    /// let t3 = t1.concat(&t2, Some("col".into()))?;
    /// assert_eq!(t3.to_vec(), [1, 2, 11, 12, 13, 3, 4, 14, 15, 16]);
    /// assert_eq!(t3.get(coords![1, "white"])?, 15);
    /// assert_eq!((&t1 + &t2)?, t3);
    /// # Ok::<(), ntable::Error>(())
    /// ```
    ///
    /// [`Axis::concat()`]: super::Axis::concat()
    pub fn concat(&self, other: &Table<T>, axis: Option<AxisSpec>) -> Result<Table<T>> {
        let (a, b) = (self.structure(), other.structure());
        if a.dim() != b.dim() {
            return Err(mismatch(format!("cannot join {} axes to {} axes", a.dim(), b.dim())));
        }
        let position = match axis {
            Some(spec) => a.resolve(&spec).ok_or(Error::UnknownAxis(spec))?,
            None => find_concat_axis(a, b).ok_or_else(|| mismatch("unable to find a concatenation axis"))?,
        };
        for (i, x, y) in izip!(0.., a.entries(), b.entries()) {
            if x.name() != y.name() {
                return Err(mismatch(format!("axis {} is named {:?} and {:?}", i, x.name(), y.name())));
            }
            if i != position && x.axis() != y.axis() {
                return Err(mismatch(format!("axis {} differs", i)));
            }
        }
        let joined = a.entries()[position].axis()
            .concat(b.entries()[position].axis())
            .ok_or_else(|| mismatch(format!("axis {} cannot be joined", position)))?;
        tracing::debug!(position, size = joined.size(), "concatenating tables");
        let mut structure = a.unlocked_copy();
        structure.replace(position, joined)?.lock();

        // Row-major order: each repetition of the axes before `position`
        // holds one block of `self` then one block of `other`.
        let repetitions: usize = a.entries()[..position].iter().map(|e| e.axis().size()).product();
        let block = |s: &Structure| -> usize { s.entries()[position..].iter().map(|e| e.axis().size()).product() };
        let (xs, ys) = (self.to_vec(), other.to_vec());
        let (bx, by) = (block(a), block(b));
        let mut values = Vec::with_capacity(structure.size());
        for r in 0..repetitions {
            values.extend_from_slice(&xs[r * bx..(r + 1) * bx]);
            values.extend_from_slice(&ys[r * by..(r + 1) * by]);
        }
        Ok(Table::adopt(Rc::new(structure), values))
    }
}

/// `&a + &b` is `a.concat(&b, None)`.
impl<'a, T: Clone> Add<&'a Table<T>> for &'a Table<T> {
    type Output = Result<Table<T>>;

    fn add(self, other: &'a Table<T>) -> Self::Output { self.concat(other, None) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{coords, Axis, Error, Structure, Table};

    fn one_axis(axis: Axis) -> Structure {
        let mut s = Structure::new();
        s.add(axis).unwrap();
        s
    }

    fn rows_and_columns(rows: Axis, columns: Axis) -> Structure {
        let mut s = Structure::new();
        s.add_named(rows, "row").unwrap().add_named(columns, "col").unwrap();
        s
    }

    fn labeled2() -> Axis { Axis::labeled(["one", "two"]) }
    fn labeled3() -> Axis { Axis::labeled(["red", "white", "blue"]) }
    fn labeled5() -> Axis { Axis::labeled(["one", "two", "red", "white", "blue"]) }

    #[test]
    fn concat_1d_indexed() {
        let t1 = Table::loaded(one_axis(Axis::indexed(2)), vec![1, 2]);
        let t2 = Table::loaded(one_axis(Axis::indexed(10)), (10..20).collect());
        let t3 = Table::loaded(one_axis(Axis::indexed(12)), (10..20).chain([1, 2]).collect());
        assert_eq!((&t2 + &t1).unwrap(), t3);
        assert_eq!(t2.concat(&t1, Some(0.into())).unwrap(), t3);
    }

    #[test]
    fn concat_1d_labeled() {
        let t1 = Table::loaded(one_axis(labeled2()), vec![1, 2]);
        let t2 = Table::loaded(one_axis(labeled3()), vec![11, 12, 13]);
        let t3 = Table::loaded(one_axis(labeled5()), vec![1, 2, 11, 12, 13]);
        assert_eq!((&t1 + &t2).unwrap(), t3);
        assert_eq!(t1.concat(&t2, Some(0.into())).unwrap(), t3);
    }

    #[test]
    fn concat_2d_outer() {
        let t1 = Table::loaded(rows_and_columns(Axis::indexed(2), labeled2()), vec![1, 2, 3, 4]);
        let t2 = Table::loaded(rows_and_columns(Axis::indexed(3), labeled2()), vec![11, 12, 13, 14, 15, 16]);
        let t3 = Table::loaded(
            rows_and_columns(Axis::indexed(5), labeled2()),
            vec![11, 12, 13, 14, 15, 16, 1, 2, 3, 4],
        );
        assert_eq!((&t2 + &t1).unwrap(), t3);
        assert_eq!(t2.concat(&t1, Some("row".into())).unwrap(), t3);
    }

    #[test]
    fn concat_2d_inner() {
        let t1 = Table::loaded(rows_and_columns(Axis::indexed(2), labeled2()), vec![1, 2, 3, 4]);
        let t2 = Table::loaded(rows_and_columns(Axis::indexed(2), labeled3()), vec![11, 12, 13, 14, 15, 16]);
        let t3 = Table::loaded(
            rows_and_columns(Axis::indexed(2), labeled5()),
            vec![1, 2, 11, 12, 13, 3, 4, 14, 15, 16],
        );
        assert_eq!((&t1 + &t2).unwrap(), t3);
        assert_eq!(t1.concat(&t2, Some("col".into())).unwrap(), t3);
    }

    #[test]
    fn concat_identical_structures() {
        let t = Table::loaded(rows_and_columns(Axis::indexed(2), labeled2()), vec![1, 2, 3, 4]);
        let t2 = (&t + &t).unwrap();
        assert_eq!(t2.structure().axis("row"), Some(&Axis::indexed(4)));
        assert_eq!(t2.to_vec(), [1, 2, 3, 4, 1, 2, 3, 4]);
        assert!(matches!(t.concat(&t, Some("col".into())), Err(Error::StructureMismatch(_))));
    }

    #[test]
    fn concat_views() {
        let t = Table::loaded(rows_and_columns(Axis::indexed(3), labeled3()), (0..9).collect());
        let left = t.shared_slice(coords!{"col" => "red"}).unwrap();
        let right = t.shared_slice(coords!{"col" => "blue"}).unwrap();
        let joined = left.concat(&right, None).unwrap();
        assert_eq!(joined.to_vec(), [0, 3, 6, 2, 5, 8]);
        assert!(!joined.is_view());
    }

    #[test]
    fn concat_mismatches() {
        let t1 = Table::loaded(rows_and_columns(Axis::indexed(2), labeled2()), vec![1, 2, 3, 4]);
        let t2 = Table::loaded(one_axis(Axis::indexed(2)), vec![1, 2]);
        assert!(matches!(&t1 + &t2, Err(Error::StructureMismatch(_))));
        let t3 = Table::loaded(rows_and_columns(Axis::indexed(3), labeled3()), (0..9).collect());
        assert!(matches!(&t1 + &t3, Err(Error::StructureMismatch(_))));
        let mut s = Structure::new();
        s.add_named(Axis::indexed(2), "r").unwrap().add_named(labeled2(), "col").unwrap();
        let t4 = Table::loaded(s, vec![1, 2, 3, 4]);
        assert!(matches!(t1.concat(&t4, Some(0.into())), Err(Error::StructureMismatch(_))));
        let t5 = Table::loaded(one_axis(labeled2()), vec![1, 2]);
        assert!(matches!(&t5 + &t5, Err(Error::StructureMismatch(_))));
        assert!(matches!(t1.concat(&t1, Some("depth".into())), Err(Error::UnknownAxis(_))));
        let scalar = Table::loaded(Structure::new(), vec![1]);
        assert!(matches!(&scalar + &scalar, Err(Error::StructureMismatch(_))));
    }
}

//! Tables that read the buffer of another table.

use std::rc::{Rc};

use super::{AxisSpec, Coordinates, Table, Result};
use super::iter::{Cursor};

impl<T> Table<T> {
    /// Fixes some axes at particular labels, giving a view of the remaining
    /// axes that shares the buffer of `self`.
    ///
    /// If `coords` mention an axis more than once, the first usable mention
    /// wins. Axes that don't exist, and labels that an axis doesn't have, are
    /// ignored.
    ///
    /// ```
    /// use ntable::{coords, Axis, Structure, Table};
    /// let mut s = Structure::new();
    /// s.add_named(Axis::indexed(10), "row")?;
    /// let mut t = Table::loaded(s, (2..12).collect());
    /// let cell = t.shared_slice(coords!{"row" => 3})?;
    /// assert_eq!(cell.dim(), 0);
    /// assert_eq!(cell.get(())?, 5);
    /// t.set(coords![3], 100)?;
    /// assert_eq!(cell.get(())?, 100);
    /// assert_eq!(t.shared_slice(coords!{"column" => 3})?.dim(), 1);
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn shared_slice(&self, coords: impl Into<Coordinates>) -> Result<Table<T>> {
        let coords = coords.into();
        let entries = self.structure().entries();
        let mut fixed = Vec::new();
        let mut steps = Vec::new();
        let mut indices = Vec::new();
        for (spec, label) in coords.pairs() {
            let Some(p) = self.structure().resolve(&spec) else { continue };
            if fixed.contains(&p) { continue; }
            let Some(i) = entries[p].axis().index_of(label) else { continue };
            fixed.push(p);
            indices.push(i);
        }
        if let Some(all) = self.structure().steps() {
            steps.extend(fixed.iter().map(|&p| all[p]));
        }
        let offset = indices.iter().zip(&steps).map(|(i, s)| i * s).sum();
        let structure = self.structure().derive(|p| !fixed.contains(&p))?;
        Ok(self.view(Rc::new(structure), offset, &self.handle()))
    }

    /// Like [`shared_slice()`], but returns an owned table with a copy of the
    /// values.
    ///
    /// [`shared_slice()`]: Self::shared_slice()
    pub fn slice(&self, coords: impl Into<Coordinates>) -> Result<Table<T>> where T: Clone {
        Ok(self.shared_slice(coords)?.compact())
    }

    /// Splits the axes of `self` into the `inner` axes and the rest.
    ///
    /// Returns an owned table over the outer axes whose cells are views over
    /// the inner axes. Each view shares the buffer of `self`.
    ///
    /// ```
    /// use ntable::{coords, Axis, Structure, Table};
    /// let mut s = Structure::new();
    /// s.add_named(Axis::indexed_from(10, 1), "row")?.add_named(Axis::labeled(["one", "two"]), "col")?;
    /// let t = Table::loaded(s, (2..22).collect());
    /// let rows = t.decompose(&["col".into()])?;
    /// assert_eq!(rows.dim(), 1);
    /// assert_eq!(rows.get(coords![2])?.to_vec(), [4, 5]);
    /// let columns = t.decompose(&["row".into()])?;
    /// assert_eq!(columns.get(coords!["two"])?.get(coords![3])?, 7);
    /// # Ok::<(), ntable::Error>(())
    /// ```
    pub fn decompose(&self, inner: &[AxisSpec]) -> Result<Table<Table<T>>> {
        let inner_structure = Rc::new(self.structure().substructure_including(inner)?);
        let outer = Rc::new(self.structure().substructure_omitting(inner)?);
        let parent = self.handle();
        let views: Vec<Table<T>> = Cursor::new(outer.clone(), 0)
            .map(|offset| self.view(inner_structure.clone(), offset, &parent))
            .collect();
        tracing::debug!(inner = inner_structure.dim(), outer = outer.dim(), cells = views.len(), "decomposed table");
        Ok(Table::adopt(Rc::new(outer.compacted()), views))
    }

    /// Decomposes `self` and [`reduce()`]s each inner table.
    ///
    /// [`reduce()`]: Self::reduce()
    pub fn decompose_reduce(&self, inner: &[AxisSpec], mut f: impl FnMut(T, T) -> T) -> Result<Table<Option<T>>> where T: Clone {
        Ok(self.decompose(inner)?.map(|t| t.reduce(&mut f)))
    }

    /// Decomposes `self` and [`fold()`]s each inner table, starting from a
    /// clone of `init`.
    ///
    /// [`fold()`]: Self::fold()
    pub fn decompose_fold<A: Clone>(&self, inner: &[AxisSpec], init: A, mut f: impl FnMut(A, T) -> A) -> Result<Table<A>> where T: Clone {
        Ok(self.decompose(inner)?.map(|t| t.fold(init.clone(), &mut f)))
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{coords, Axis, Error, Structure, Table};

    fn labeled2() -> Axis { Axis::labeled(["one", "two"]) }
    fn labeled3() -> Axis { Axis::labeled(["red", "white", "blue"]) }
    fn indexed10() -> Axis { Axis::indexed_from(10, 1) }

    fn rows_and_columns() -> Structure {
        let mut s = Structure::new();
        s.add_named(indexed10(), "row").unwrap().add_named(labeled3(), "col").unwrap();
        s
    }

    fn one_axis(axis: Axis, name: &str) -> Structure {
        let mut s = Structure::new();
        s.add_named(axis, name).unwrap();
        s
    }

    #[test]
    fn slice_of_no_axes() {
        let t = Table::loaded(Structure::new(), vec![0]);
        assert_eq!(t.slice(coords![]).unwrap(), t);
    }

    #[test]
    fn nop_slices() {
        let mut s = Structure::new();
        s.add(labeled2()).unwrap();
        let t = Table::filled(s, 1);
        assert_eq!(t.slice(coords![]).unwrap(), t);
        let t = Table::filled(rows_and_columns(), 1);
        let sl = t.slice(coords![]).unwrap();
        assert_eq!(sl, t);
        assert!(!sl.is_view());
    }

    #[test]
    fn slice_1_to_0() {
        let t = Table::loaded(one_axis(indexed10(), "row"), (2..12).collect());
        assert_eq!(t.slice(coords!{"row" => 3}).unwrap().get(()).unwrap(), 4);
        let t = Table::loaded(one_axis(labeled3(), "col"), vec![2, 3, 4]);
        assert_eq!(t.slice(coords!{"col" => "white"}).unwrap().get(()).unwrap(), 3);
    }

    #[test]
    fn slice_2_to_0() {
        let t = Table::loaded(rows_and_columns(), (2..32).collect());
        assert_eq!(t.slice(coords!{"row" => 2, "col" => "white"}).unwrap().get(()).unwrap(), 6);
    }

    #[test]
    fn slice_2_to_1_major() {
        let t = Table::loaded(rows_and_columns(), (2..32).collect());
        let expected = Table::loaded(one_axis(labeled3(), "col"), vec![5, 6, 7]);
        assert_eq!(t.slice(coords!{"row" => 2}).unwrap(), expected);
    }

    #[test]
    fn slice_2_to_1_minor() {
        let t = Table::loaded(rows_and_columns(), (2..32).collect());
        let expected = Table::loaded(one_axis(indexed10(), "row"), vec![3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
        let sl = t.shared_slice(coords!{"col" => "white"}).unwrap();
        assert_eq!(sl, expected);
        assert!(sl.is_view());
        assert_eq!(sl.structure().steps(), Some(&[3][..]));
        assert_eq!(t.slice(coords!{"col" => "white"}).unwrap(), expected);
    }

    #[test]
    fn unknown_slice_keys_are_ignored() {
        let t = Table::loaded(rows_and_columns(), (2..32).collect());
        let sl = t.shared_slice(coords!{"depth" => 1, "col" => "black", "row" => 2}).unwrap();
        assert_eq!(sl.dim(), 1);
        assert_eq!(sl.to_vec(), [5, 6, 7]);
        let sl = t.shared_slice(coords!{"row" => 2, "row" => 3}).unwrap();
        assert_eq!(sl.to_vec(), [5, 6, 7]);
    }

    #[test]
    fn shared_slice_aliases_parent() {
        let mut t = Table::loaded(one_axis(indexed10(), "row"), (2..12).map(Some).collect());
        let sl = t.shared_slice(coords!{"row" => 3}).unwrap();
        assert_eq!(sl.get(()).unwrap(), Some(4));
        assert_eq!(sl, Table::loaded(Structure::new(), vec![Some(4)]));
        let copy = t.slice(coords!{"row" => 3}).unwrap();
        t.set(coords![3], None).unwrap();
        assert_eq!(sl.get(()).unwrap(), None);
        assert_eq!(copy.get(()).unwrap(), Some(4));
        assert!(sl.parent().is_some());
        assert!(copy.parent().is_none());
    }

    #[test]
    fn views_are_locked() {
        let t = Table::loaded(rows_and_columns(), (2..32).collect());
        let mut sl = t.shared_slice(coords!{"row" => 1}).unwrap();
        assert!(matches!(sl.set(coords!["red"], 0), Err(Error::TableLocked)));
        assert!(matches!(sl.update(coords!["red"], |v| *v), Err(Error::TableLocked)));
        assert!(matches!(sl.load(vec![0]), Err(Error::TableLocked)));
        assert!(matches!(sl.fill(0), Err(Error::TableLocked)));
        assert!(matches!(sl.map_in_place(|v| *v), Err(Error::TableLocked)));
        assert!(matches!(sl.map_with_position_in_place(|v, _| *v), Err(Error::TableLocked)));
        let mut owned = sl.map(|v| v + 1);
        assert!(!owned.is_view());
        owned.set(coords!["red"], 0).unwrap();
        assert_eq!(owned.to_vec(), [0, 4, 5]);
        assert_eq!(owned.structure().steps(), Some(&[1][..]));
    }

    #[test]
    fn slices_of_views() {
        let mut t = Table::loaded(rows_and_columns(), (2..32).collect());
        let column = t.shared_slice(coords!{"col" => "blue"}).unwrap();
        let cell = column.shared_slice(coords!{"row" => 4}).unwrap();
        assert_eq!(cell.get(()).unwrap(), 13);
        t.set(coords![4, "blue"], 0).unwrap();
        assert_eq!(cell.get(()).unwrap(), 0);
        assert!(cell.parent().is_some_and(|p| p.is_view()));
    }

    #[test]
    fn scalar_decompose() {
        let t = Table::loaded(Structure::new(), vec!["foo"]);
        let d = t.decompose(&[]).unwrap();
        assert_eq!(d.dim(), 0);
        assert_eq!(d.size(), 1);
        assert_eq!(d.get(()).unwrap(), t);
    }

    #[test]
    fn decompose_1d() {
        let t = Table::loaded(one_axis(indexed10(), "n"), (2..12).collect());
        let d = t.decompose(&[0.into()]).unwrap();
        assert_eq!(d.dim(), 0);
        assert_eq!(d.size(), 1);
        assert_eq!(d.get(()).unwrap(), t);
        let d = t.decompose(&[]).unwrap();
        assert_eq!(d.get(coords![1]).unwrap(), Table::loaded(Structure::new(), vec![2]));
        assert_eq!(d.get(coords![2]).unwrap(), Table::loaded(Structure::new(), vec![3]));
    }

    #[test]
    fn decompose_2d() {
        let mut s = Structure::new();
        s.add(indexed10()).unwrap().add(labeled2()).unwrap();
        let mut t = Table::loaded(s, (2..22).collect());
        let mut row = Structure::new();
        row.add(labeled2()).unwrap();
        let d = t.decompose(&[1.into()]).unwrap();
        assert_eq!(d.get(coords![1]).unwrap(), Table::loaded(row.clone(), vec![2, 3]));
        assert_eq!(d.get(coords![2]).unwrap(), Table::loaded(row.clone(), vec![4, 5]));
        assert!(!d.is_view());
        assert!(d.get(coords![1]).unwrap().is_view());
        t.set(coords![2, "one"], 0).unwrap();
        assert_eq!(d.get(coords![2]).unwrap().to_vec(), [0, 5]);
        assert!(matches!(t.decompose(&["nope".into()]), Err(Error::UnknownAxis(_))));
    }

    #[test]
    fn decompose_reduce() {
        let mut s = Structure::new();
        s.add(indexed10()).unwrap().add(labeled2()).unwrap();
        let t = Table::loaded(s, (2..22).collect());
        let d = t.decompose_reduce(&[1.into()], |a, v| a * v).unwrap();
        assert_eq!(d.get(coords![1]).unwrap(), Some(6));
        assert_eq!(d.get(coords![2]).unwrap(), Some(20));
        let d = t.decompose_fold(&[0.into()], 0, |a, v| a + v).unwrap();
        assert_eq!(d.get(coords!["one"]).unwrap(), 110);
        assert_eq!(d.get(coords!["two"]).unwrap(), 120);
    }

    #[test]
    fn decompose_empty() {
        let mut s = Structure::new();
        s.add(Axis::indexed(3)).unwrap().add(Axis::indexed(0)).unwrap();
        let t: Table<i32> = Table::loaded(s, vec![]);
        let d = t.decompose(&[1.into()]).unwrap();
        assert_eq!(d.size(), 3);
        assert!(d.iter().all(|inner| inner.size() == 0));
        assert_eq!(t.decompose_reduce(&[1.into()], |a, v| a + v).unwrap().to_vec(), [None, None, None]);
        assert_eq!(t.decompose(&[0.into()]).unwrap().size(), 0);
    }
}

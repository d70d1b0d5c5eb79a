//! Conversion between tables and nested JSON objects and arrays.
//!
//! A nested value has one level of nesting per axis. An array level becomes
//! an [`IndexedAxis`] that starts at the first index holding a non-null
//! value and ends at the length of the longest array. An object level becomes
//! a [`LabeledAxis`] (or, if requested, an [`ObjectAxis`]) over all the keys
//! seen at that level. Cells that the nested value does not mention get
//! [`NestedOptions::fill`].
//!
//! ```
//! use serde_json::{json};
//! use ntable::{coords, FieldOptions, NestedOptions, SortStrategy, Table};
//! let value = json!([{"red": 1, "white": 2, "blue": 3}, {"red": 4, "white": 5}]);
//! let fields = [FieldOptions::new().named("row"), FieldOptions::new().named("col").sorted(SortStrategy::Natural)];
//! let t = Table::from_nested(&value, &fields, &NestedOptions::default())?;
//! assert_eq!(t.to_vec(), [json!(3), json!(1), json!(2), json!(null), json!(4), json!(5)]);
//! assert_eq!(t.get(coords!{"row" => 1, "col" => "white"})?, json!(5));
//! assert_eq!(t.to_nested(Some(&json!(null)))?, value);
//! # Ok::<(), ntable::Error>(())
//! ```
//!
//! [`IndexedAxis`]: super::IndexedAxis
//! [`LabeledAxis`]: super::LabeledAxis
//! [`ObjectAxis`]: super::ObjectAxis

use std::cmp::{Ordering};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use std::ops::{Range};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Axis, Coordinates, IndexedAxis, Label, Structure, Table, Error, Result};

/// How to order the labels of an axis made from object keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// The natural order of [`Label`]s.
    Natural,
    /// Lexicographic order of the string forms.
    String,
    /// Numeric order of the string forms read as integers. Unreadable
    /// labels count as `0`.
    Integer,
    /// Numeric order of the string forms read as floating-point numbers.
    /// Unreadable labels count as `0`.
    Numeric,
}

impl SortStrategy {
    pub fn compare(self, a: &Label, b: &Label) -> Ordering {
        fn integer(l: &Label) -> i64 { l.as_int().unwrap_or_else(|| l.to_string().trim().parse().unwrap_or(0)) }
        fn numeric(l: &Label) -> f64 { l.to_string().trim().parse().unwrap_or(0.0) }
        match self {
            SortStrategy::Natural => a.cmp(b),
            SortStrategy::String => a.to_string().cmp(&b.to_string()),
            SortStrategy::Integer => integer(a).cmp(&integer(b)),
            SortStrategy::Numeric => numeric(a).total_cmp(&numeric(b)),
        }
    }
}

// ----------------------------------------------------------------------------

/// Options for one axis of [`Table::from_nested()`].
#[derive(Default)]
pub struct FieldOptions {
    pub name: Option<String>,
    pub sort: Option<SortStrategy>,
    /// `Some(true)` makes an [`ObjectAxis`] and `Some(false)` a
    /// [`LabeledAxis`]. If `None`, [`NestedOptions::objectify_by_default`]
    /// decides, unless there is a `stringify` function.
    ///
    /// [`ObjectAxis`]: super::ObjectAxis
    /// [`LabeledAxis`]: super::LabeledAxis
    pub objectify: Option<bool>,
    stringify: Option<Box<dyn Fn(&str) -> String>>,
    objectify_with: Option<Box<dyn Fn(&str) -> Label>>,
    postprocess_labels: Option<Box<dyn Fn(Vec<Label>) -> Vec<Label>>>,
    postprocess_range: Option<Box<dyn Fn(Range<i64>) -> Range<i64>>>,
}

impl FieldOptions {
    pub fn new() -> Self { Self::default() }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sorted(mut self, sort: SortStrategy) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn objectify(mut self, objectify: bool) -> Self {
        self.objectify = Some(objectify);
        self
    }

    /// Transforms each key into the label of a [`LabeledAxis`].
    ///
    /// [`LabeledAxis`]: super::LabeledAxis
    pub fn stringify_with(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.stringify = Some(Box::new(f));
        self
    }

    /// Transforms each key into the label of an [`ObjectAxis`].
    ///
    /// [`ObjectAxis`]: super::ObjectAxis
    pub fn objectify_with(mut self, f: impl Fn(&str) -> Label + 'static) -> Self {
        self.objectify = Some(true);
        self.objectify_with = Some(Box::new(f));
        self
    }

    /// Rewrites the labels of an object level after sorting, e.g. to add
    /// labels that the data doesn't mention.
    pub fn postprocess_labels(mut self, f: impl Fn(Vec<Label>) -> Vec<Label> + 'static) -> Self {
        self.postprocess_labels = Some(Box::new(f));
        self
    }

    /// Rewrites the range of labels of an array level.
    pub fn postprocess_range(mut self, f: impl Fn(Range<i64>) -> Range<i64> + 'static) -> Self {
        self.postprocess_range = Some(Box::new(f));
        self
    }

    fn label(&self, key: &str, objectify: bool) -> Label {
        if objectify {
            match &self.objectify_with {
                Some(f) => f(key),
                None => Label::from(key),
            }
        } else {
            match &self.stringify {
                Some(f) => Label::from(f(key)),
                None => Label::from(key),
            }
        }
    }
}

impl Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("name", &self.name)
            .field("sort", &self.sort)
            .field("objectify", &self.objectify)
            .field("stringify", &self.stringify.is_some())
            .field("objectify_with", &self.objectify_with.is_some())
            .field("postprocess_labels", &self.postprocess_labels.is_some())
            .field("postprocess_range", &self.postprocess_range.is_some())
            .finish()
    }
}

/// Options for [`Table::from_nested()`] that apply to all axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedOptions {
    /// The value of cells that the nested value doesn't mention.
    pub fill: Value,
    /// Make object levels into [`ObjectAxis`]es unless their
    /// [`FieldOptions`] say otherwise.
    ///
    /// [`ObjectAxis`]: super::ObjectAxis
    pub objectify_by_default: bool,
}

// ----------------------------------------------------------------------------

/// What has been seen at one level of nesting.
#[derive(Debug)]
enum Level {
    Keys {keys: Vec<String>, seen: HashSet<String>},
    Range {start: Option<usize>, end: Option<usize>},
}

impl Level {
    fn keys() -> Self { Level::Keys {keys: Vec::new(), seen: HashSet::new()} }

    fn insert(&mut self, key: &str) {
        if let Level::Keys {keys, seen} = self {
            if seen.insert(key.to_string()) { keys.push(key.to_string()); }
        }
    }

    /// Turns a `Range` into the equivalent `Keys`.
    fn make_keys(&mut self) {
        if let Level::Range {start, end} = *self {
            let mut level = Level::keys();
            if let (Some(start), Some(end)) = (start, end) {
                for i in start..end { level.insert(&i.to_string()); }
            }
            *self = level;
        }
    }
}

fn scan(levels: &mut Vec<Level>, depth: usize, value: &Value) {
    match value {
        Value::Object(map) => {
            if levels.len() == depth { levels.push(Level::keys()); }
            levels[depth].make_keys();
            for (k, v) in map {
                levels[depth].insert(k);
                scan(levels, depth + 1, v);
            }
        },
        Value::Array(items) => {
            let n = items.len();
            match levels.get_mut(depth) {
                Some(level @ Level::Keys {..}) => {
                    for i in 0..n { level.insert(&i.to_string()); }
                },
                Some(Level::Range {start, end}) => {
                    if n > 0 {
                        if end.map_or(true, |e| n > e) { *end = Some(n); }
                        if start.is_none() { *start = Some(n); }
                    }
                },
                None => {
                    let bound = if n == 0 { None } else { Some(n) };
                    levels.push(Level::Range {start: bound, end: bound});
                },
            }
            for (i, v) in items.iter().enumerate() {
                if let Some(Level::Range {start: Some(start), ..}) = levels.get_mut(depth) {
                    if *start > i && !v.is_null() { *start = i; }
                }
                scan(levels, depth + 1, v);
            }
        },
        _ => {},
    }
}

/// How to label the children of a container at one level.
enum Labels {
    Keys(HashMap<String, Label>),
    Range,
}

impl Labels {
    fn for_key(&self, key: &str) -> Option<Label> {
        match self {
            Labels::Keys(map) => map.get(key).cloned(),
            Labels::Range => None,
        }
    }

    fn for_index(&self, i: usize) -> Option<Label> {
        match self {
            Labels::Keys(map) => map.get(&i.to_string()).cloned(),
            Labels::Range => i64::try_from(i).ok().map(Label::Int),
        }
    }
}

fn populate(table: &mut Table<Value>, path: &mut Vec<Label>, labels: &[Labels], value: &Value) -> Result<()> {
    let depth = path.len();
    if depth == table.dim() {
        return match table.set(Coordinates::ByPosition(path.clone()), value.clone()) {
            Ok(()) | Err(Error::NoSuchCell) => Ok(()),
            Err(e) => Err(e),
        };
    }
    let mut visit = |label: Option<Label>, v: &Value| -> Result<()> {
        let Some(label) = label else { return Ok(()) };
        path.push(label);
        let result = populate(table, path, labels, v);
        path.pop();
        result
    };
    match value {
        Value::Object(map) => {
            for (k, v) in map { visit(labels[depth].for_key(k), v)?; }
        },
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                if !v.is_null() { visit(labels[depth].for_index(i), v)?; }
            }
        },
        _ => {},
    }
    Ok(())
}

impl Table<Value> {
    /// Constructs a table from nested JSON objects and arrays, with one axis
    /// per level of nesting. `fields` gives options for the axes in order;
    /// missing entries mean default options.
    pub fn from_nested(value: &Value, fields: &[FieldOptions], options: &NestedOptions) -> Result<Self> {
        let mut levels = Vec::new();
        scan(&mut levels, 0, value);
        let default_field = FieldOptions::default();
        let mut structure = Structure::new();
        let mut labels = Vec::with_capacity(levels.len());
        for (i, level) in levels.into_iter().enumerate() {
            let field = fields.get(i).unwrap_or(&default_field);
            let axis = match level {
                Level::Keys {keys, ..} => {
                    let objectify = field.objectify
                        .unwrap_or(field.stringify.is_none() && options.objectify_by_default);
                    let mut map = HashMap::new();
                    let mut axis_labels = Vec::new();
                    let mut seen = HashSet::new();
                    for key in keys {
                        let label = field.label(&key, objectify);
                        let unique = if objectify { label.clone() } else { Label::from(label.key().unwrap_or_default()) };
                        if seen.insert(unique.clone()) { axis_labels.push(unique.clone()); }
                        map.insert(key, unique);
                    }
                    if let Some(sort) = field.sort {
                        axis_labels.sort_by(|a, b| sort.compare(a, b));
                    }
                    if let Some(f) = &field.postprocess_labels {
                        axis_labels = f(axis_labels);
                    }
                    labels.push(Labels::Keys(map));
                    if objectify { Axis::try_object(axis_labels)? } else { Axis::try_labeled(axis_labels)? }
                },
                Level::Range {start, end} => {
                    let start = start.unwrap_or(0);
                    let end = end.unwrap_or(0).max(start);
                    let mut range = to_i64(start)?..to_i64(end)?;
                    if let Some(f) = &field.postprocess_range { range = f(range); }
                    let size = usize::try_from(range.end.saturating_sub(range.start)).unwrap_or(0);
                    labels.push(Labels::Range);
                    Axis::Indexed(IndexedAxis::try_new(size, range.start)?)
                },
            };
            match &field.name {
                Some(name) => structure.add_named(axis, name.as_str())?,
                None => structure.add(axis)?,
            };
        }
        tracing::debug!(structure = %structure, "table from nested value");
        let mut table = Table::filled(structure, options.fill.clone());
        populate(&mut table, &mut Vec::new(), &labels, value)?;
        Ok(table)
    }
}

fn to_i64(n: usize) -> Result<i64> {
    i64::try_from(n).map_err(|_| Error::Unsupported(format!("array of length {}", n)))
}

impl<T: Clone + Serialize> Table<T> {
    /// Converts this table to nested JSON objects and arrays.
    ///
    /// An indexed axis becomes an array, padded with `null`s before its first
    /// label if that is positive. Labeled and object axes become objects keyed
    /// by the string forms of their labels. Object entries whose value equals
    /// `exclude` are left out.
    pub fn to_nested(&self, exclude: Option<&Value>) -> Result<Value> {
        let mut values = self.iter();
        nest(self.structure(), 0, &mut values, exclude)
    }
}

fn nest<T: Serialize>(
    structure: &Structure,
    depth: usize,
    values: &mut impl Iterator<Item=T>,
    exclude: Option<&Value>,
) -> Result<Value> {
    let Some(entry) = structure.entries().get(depth) else {
        let value = values.next().ok_or(Error::NoSuchCell)?;
        return Ok(serde_json::to_value(value)?);
    };
    let axis = entry.axis();
    Ok(match axis {
        Axis::Empty => Value::Array(Vec::new()),
        Axis::Indexed(a) => {
            let padding = usize::try_from(a.start()).unwrap_or(0);
            let mut items = vec![Value::Null; padding];
            for _ in 0..a.size() { items.push(nest(structure, depth + 1, values, exclude)?); }
            Value::Array(items)
        },
        Axis::Labeled(_) | Axis::Object(_) => {
            let mut map = Map::new();
            for label in axis.labels() {
                let value = nest(structure, depth + 1, values, exclude)?;
                if exclude != Some(&value) { map.insert(label.to_string(), value); }
            }
            Value::Object(map)
        },
    })
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::{json};

    use super::*;
    use crate::{coords};

    fn from(value: Value, fields: &[FieldOptions]) -> Table<Value> {
        Table::from_nested(&value, fields, &NestedOptions::default()).unwrap()
    }

    fn one_axis(axis: Axis) -> Structure {
        let mut s = Structure::new();
        s.add(axis).unwrap();
        s
    }

    fn two_axes(a: Axis, b: Axis) -> Structure {
        let mut s = Structure::new();
        s.add(a).unwrap().add(b).unwrap();
        s
    }

    fn sorted() -> FieldOptions { FieldOptions::new().sorted(SortStrategy::Natural) }

    #[test]
    fn empty_labeled() {
        let t = from(json!({}), &[]);
        assert_eq!(t, Table::loaded(one_axis(Axis::labeled(Vec::<String>::new())), vec![]));
        assert_eq!(t.to_nested(None).unwrap(), json!({}));
    }

    #[test]
    fn level_1_labeled() {
        let t = from(json!({"one": 1, "two": 2}), &[sorted()]);
        let expected = Table::loaded(one_axis(Axis::labeled(["one", "two"])), vec![json!(1), json!(2)]);
        assert_eq!(t, expected);
        assert_eq!(expected.to_nested(None).unwrap(), json!({"one": 1, "two": 2}));
    }

    #[test]
    fn level_2_labeled() {
        let value = json!({"one": {"red": 1, "white": 2}, "two": {"white": 3, "blue": 4}});
        let s = two_axes(Axis::labeled(["one", "two"]), Axis::labeled(["blue", "red", "white"]));
        let t = from(value.clone(), &[sorted(), sorted()]);
        let expected = Table::loaded(s.clone(), vec![json!(null), json!(1), json!(2), json!(4), json!(null), json!(3)]);
        assert_eq!(t, expected);
        let options = NestedOptions {fill: json!("foo"), ..NestedOptions::default()};
        let t = Table::from_nested(&value, &[sorted(), sorted()], &options).unwrap();
        assert_eq!(t.to_vec(), [json!("foo"), json!(1), json!(2), json!(4), json!("foo"), json!(3)]);
        assert_eq!(
            expected.to_nested(Some(&Value::Null)).unwrap(),
            json!({"one": {"red": 1, "white": 2}, "two": {"white": 3, "blue": 4}}),
        );
        assert_eq!(
            expected.to_nested(None).unwrap(),
            json!({"one": {"blue": null, "red": 1, "white": 2}, "two": {"blue": 4, "red": null, "white": 3}}),
        );
    }

    #[test]
    fn empty_indexed() {
        let t = from(json!([]), &[]);
        assert_eq!(t, Table::loaded(one_axis(Axis::indexed(0)), vec![]));
        assert_eq!(t.to_nested(None).unwrap(), json!([]));
    }

    #[test]
    fn level_1_indexed() {
        let t = from(json!([2, 3]), &[]);
        assert_eq!(t, Table::loaded(one_axis(Axis::indexed(2)), vec![json!(2), json!(3)]));
        assert_eq!(t.to_nested(None).unwrap(), json!([2, 3]));
    }

    #[test]
    fn level_1_indexed_from_1() {
        let value = json!([null, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        let t = from(value.clone(), &[]);
        let expected = Table::loaded(one_axis(Axis::indexed_from(10, 1)), (2..12).map(Value::from).collect());
        assert_eq!(t, expected);
        assert_eq!(expected.to_nested(None).unwrap(), value);
    }

    #[test]
    fn postprocess_range() {
        let value = Value::from((1..13).collect::<Vec<i32>>());
        let t = from(value, &[FieldOptions::new().postprocess_range(|_| 1..11)]);
        let expected = Table::loaded(one_axis(Axis::indexed_from(10, 1)), (2..12).map(Value::from).collect());
        assert_eq!(t, expected);
    }

    #[test]
    fn level_2_indexed() {
        let t = from(json!([[null, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], []]), &[]);
        let s = two_axes(Axis::indexed(2), Axis::indexed_from(10, 1));
        let expected = Table::loaded(s.clone(), (2..12).map(Value::from).collect());
        assert_eq!(t, expected);
        let full = Table::loaded(s, (2..22).map(Value::from).collect());
        assert_eq!(
            full.to_nested(None).unwrap(),
            json!([[null, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], [null, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21]]),
        );
    }

    #[test]
    fn labeled_within_indexed() {
        let value = json!([{"red": 1, "white": 2, "blue": 3}, {"red": 4, "white": 5}]);
        let t = from(value, &[FieldOptions::new().named("row"), sorted().named("col")]);
        let mut s = Structure::new();
        s.add_named(Axis::indexed(2), "row").unwrap().add_named(Axis::labeled(["blue", "red", "white"]), "col").unwrap();
        assert_eq!(t, Table::loaded(s.clone(), vec![json!(3), json!(1), json!(2), json!(null), json!(4), json!(5)]));
        let full = Table::loaded(s, (1..7).map(Value::from).collect());
        assert_eq!(
            full.to_nested(None).unwrap(),
            json!([{"blue": 1, "red": 2, "white": 3}, {"blue": 4, "red": 5, "white": 6}]),
        );
    }

    #[test]
    fn indexed_within_labeled() {
        let value = json!({"red": [1, 2], "white": [3], "blue": [4, 5]});
        let t = from(value, &[sorted().named("row"), FieldOptions::new().named("col")]);
        let mut s = Structure::new();
        s.add_named(Axis::labeled(["blue", "red", "white"]), "row").unwrap().add_named(Axis::indexed(2), "col").unwrap();
        let expected = Table::loaded(s, vec![json!(4), json!(5), json!(1), json!(2), json!(3), json!(null)]);
        assert_eq!(t, expected);
        assert_eq!(
            expected.to_nested(Some(&Value::Null)).unwrap(),
            json!({"blue": [4, 5], "red": [1, 2], "white": [3, null]}),
        );
    }

    #[test]
    fn arrays_at_an_object_level() {
        let t = from(json!([{"a": 1}, {"0": 2}]), &[]);
        assert_eq!(t.structure().axis(0), Some(&Axis::indexed(2)));
        let t = from(json!({"x": {"a": 1}, "y": [5, 6]}), &[]);
        assert_eq!(t.structure().axis(1), Some(&Axis::labeled(["a", "0", "1"])));
        assert_eq!(t.get(coords!["y", "1"]).unwrap(), json!(6));
        let t = from(json!({"x": [5, 6], "y": {"a": 1}}), &[]);
        assert_eq!(t.structure().axis(1), Some(&Axis::labeled(["0", "1", "a"])));
        assert_eq!(t.get(coords!["x", "0"]).unwrap(), json!(5));
        assert_eq!(t.get(coords!["y", "a"]).unwrap(), json!(1));
    }

    #[test]
    fn objectify() {
        let t = from(json!({"one": 1, "two": 2}), &[sorted().objectify(true)]);
        let expected = Table::loaded(one_axis(Axis::object(["one", "two"])), vec![json!(1), json!(2)]);
        assert_eq!(t, expected);
        assert_eq!(expected.to_nested(None).unwrap(), json!({"one": 1, "two": 2}));
        let options = NestedOptions {objectify_by_default: true, ..NestedOptions::default()};
        let t = Table::from_nested(&json!({"one": 1}), &[], &options).unwrap();
        assert_eq!(t.structure().axis(0), Some(&Axis::object(["one"])));
        let t = Table::from_nested(&json!({"one": 1}), &[FieldOptions::new().objectify(false)], &options).unwrap();
        assert_eq!(t.structure().axis(0), Some(&Axis::labeled(["one"])));
    }

    #[test]
    fn objectify_conversion() {
        let field = sorted().objectify_with(|k| Label::from(k.len() as i64));
        let t = from(json!({"three": 3, "two": 2}), &[field]);
        assert_eq!(t, Table::loaded(one_axis(Axis::object([3, 5])), vec![json!(2), json!(3)]));
    }

    #[test]
    fn stringify_conversion() {
        let field = sorted().stringify_with(|k| k.chars().filter(|c| !c.is_ascii_digit()).collect());
        let t = from(json!({"one1": 1, "two22": 2}), &[field]);
        assert_eq!(t, Table::loaded(one_axis(Axis::labeled(["one", "two"])), vec![json!(1), json!(2)]));
    }

    #[test]
    fn stringify_merges_keys() {
        let field = FieldOptions::new().stringify_with(|k| k.to_lowercase());
        let t = from(json!({"A": 1, "a": 2, "b": 3}), &[field]);
        assert_eq!(t.structure().axis(0), Some(&Axis::labeled(["a", "b"])));
        assert_eq!(t.to_vec(), [json!(2), json!(3)]);
    }

    #[test]
    fn postprocess_labels() {
        let field = sorted().objectify(true).postprocess_labels(|mut labels| {
            labels.push(Label::from("three"));
            labels
        });
        let options = NestedOptions {fill: json!(0), ..NestedOptions::default()};
        let t = Table::from_nested(&json!({"one": 1, "two": 2}), &[field], &options).unwrap();
        let expected = Table::loaded(one_axis(Axis::object(["one", "two", "three"])), vec![json!(1), json!(2), json!(0)]);
        assert_eq!(t, expected);
    }

    #[test]
    fn postprocess_labels_duplicates() {
        let twice = |field: FieldOptions| field.postprocess_labels(|mut labels| {
            labels.push(Label::from("one"));
            labels
        });
        let value = json!({"one": 1, "two": 2});
        let options = NestedOptions::default();
        let result = Table::from_nested(&value, &[twice(FieldOptions::new())], &options);
        assert!(matches!(result, Err(Error::DuplicateLabel(l)) if l == "one"));
        let result = Table::from_nested(&value, &[twice(FieldOptions::new().objectify(true))], &options);
        assert!(matches!(result, Err(Error::DuplicateLabel(_))));
    }

    #[test]
    fn scalar() {
        let t = from(json!("hello"), &[]);
        assert_eq!(t.dim(), 0);
        assert_eq!(t.get(()).unwrap(), json!("hello"));
        assert_eq!(t.to_nested(None).unwrap(), json!("hello"));
    }

    #[test]
    fn sort_strategies() {
        let mut labels = vec![Label::from("10"), Label::from("9"), Label::from("x"), Label::from("-1.5")];
        labels.sort_by(|a, b| SortStrategy::String.compare(a, b));
        assert_eq!(labels, [Label::from("-1.5"), "10".into(), "9".into(), "x".into()]);
        labels.sort_by(|a, b| SortStrategy::Integer.compare(a, b));
        assert_eq!(labels, [Label::from("-1.5"), "x".into(), "9".into(), "10".into()]);
        labels.sort_by(|a, b| SortStrategy::Numeric.compare(a, b));
        assert_eq!(labels, [Label::from("-1.5"), "x".into(), "9".into(), "10".into()]);
        assert_eq!(SortStrategy::Natural.compare(&Label::from(2), &Label::from(10)), Ordering::Less);
        assert_eq!(serde_json::to_value(SortStrategy::Numeric).unwrap(), json!("numeric"));
    }

    #[test]
    fn options_from_json() {
        let options: NestedOptions = serde_json::from_value(json!({"fill": 0})).unwrap();
        assert_eq!(options, NestedOptions {fill: json!(0), objectify_by_default: false});
    }
}

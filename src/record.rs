//! Plain-record forms of axes and tables, for serialization.
//!
//! A table serializes to
//!
//! ```text
//! {"type": "table", "axes": [<axis record>...], "values": [<cell>...]}
//! ```
//!
//! with values in row-major order. An axis record is
//! `{"type": "empty"|"indexed"|"labeled", "name"?: ..., ...}`, where an
//! indexed axis adds `"size"` and `"start"` (omitted when `0`), and a labeled
//! axis adds `"labels"`.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::{Error};

/// The variant-specific part of an [`AxisRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisConfig {
    Empty,
    Indexed {size: usize, start: i64},
    Labeled {labels: Vec<String>},
}

/// The record form of one axis of a [`Structure`].
///
/// ```
/// use ntable::{AxisConfig, AxisRecord};
/// let record = AxisRecord {name: Some("row".into()), config: AxisConfig::Indexed {size: 10, start: 1}};
/// assert_eq!(
///     serde_json::to_string(&record)?,
///     r#"{"type":"indexed","name":"row","size":10,"start":1}"#,
/// );
/// let back: AxisRecord = serde_json::from_str(r#"{"type":"indexed","size":2}"#)?;
/// assert_eq!(back.config, AxisConfig::Indexed {size: 2, start: 0});
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// [`Structure`]: super::Structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisRecord {
    pub name: Option<String>,
    pub config: AxisConfig,
}

impl Serialize for AxisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let kind = match self.config {
            AxisConfig::Empty => "empty",
            AxisConfig::Indexed {..} => "indexed",
            AxisConfig::Labeled {..} => "labeled",
        };
        map.serialize_entry("type", kind)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        match &self.config {
            AxisConfig::Empty => {},
            AxisConfig::Indexed {size, start} => {
                map.serialize_entry("size", size)?;
                if *start != 0 { map.serialize_entry("start", start)?; }
            },
            AxisConfig::Labeled {labels} => {
                map.serialize_entry("labels", labels)?;
            },
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawAxisRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<usize>,
    #[serde(default)]
    start: Option<i64>,
    #[serde(default)]
    labels: Option<Vec<String>>,
}

impl TryFrom<RawAxisRecord> for AxisRecord {
    type Error = Error;

    fn try_from(raw: RawAxisRecord) -> Result<Self, Error> {
        let config = match raw.kind.as_deref().unwrap_or("empty") {
            "empty" => AxisConfig::Empty,
            "indexed" => AxisConfig::Indexed {
                size: raw.size.ok_or_else(|| Error::InvalidRecord("indexed axis without `size`".into()))?,
                start: raw.start.unwrap_or(0),
            },
            "labeled" => AxisConfig::Labeled {
                labels: raw.labels.ok_or_else(|| Error::InvalidRecord("labeled axis without `labels`".into()))?,
            },
            other => return Err(Error::InvalidRecord(format!("unknown axis type `{}`", other))),
        };
        Ok(Self {name: raw.name, config})
    }
}

impl<'de> Deserialize<'de> for AxisRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAxisRecord::deserialize(deserializer)?;
        AxisRecord::try_from(raw).map_err(de::Error::custom)
    }
}

// ----------------------------------------------------------------------------

/// The record form of a [`Table`].
///
/// [`Table`]: super::Table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord<T> {
    pub axes: Vec<AxisRecord>,
    pub values: Vec<T>,
}

impl<T: Serialize> TableRecord<T> {
    /// Converts this record to a JSON value.
    pub fn to_json_value(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T: Serialize> Serialize for TableRecord<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "table")?;
        map.serialize_entry("axes", &self.axes)?;
        map.serialize_entry("values", &self.values)?;
        map.end()
    }
}

#[derive(Deserialize)]
struct RawTableRecord<T> {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    axes: Vec<AxisRecord>,
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TableRecord<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTableRecord::<T>::deserialize(deserializer)?;
        match raw.kind.as_deref() {
            None | Some("table") => Ok(Self {axes: raw.axes, values: raw.values}),
            Some(other) => Err(de::Error::custom(format!("expected a table record, found `{}`", other))),
        }
    }
}

// ----------------------------------------------------------------------------

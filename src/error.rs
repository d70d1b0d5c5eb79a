use super::{AxisSpec};

/// Everything that can go wrong in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Axes can only be added, removed or replaced before the structure is
    /// locked.
    #[error("structure locked")]
    StructureLocked,

    /// Offsets and positions need steps, which exist only once locked.
    #[error("structure not locked")]
    StructureNotLocked,

    #[error("unknown axis {0}")]
    UnknownAxis(AxisSpec),

    #[error("duplicate axis name `{0}`")]
    DuplicateAxisName(String),

    /// Two labels of one axis are the same.
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    /// The tables can't be joined. The string says why.
    #[error("structure mismatch: {0}")]
    StructureMismatch(String),

    /// The table is a view into another table, and must be modified through
    /// that table instead.
    #[error("table locked")]
    TableLocked,

    /// The coordinates don't resolve to a cell.
    #[error("no such cell")]
    NoSuchCell,

    /// E.g. the record form of an object axis.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A size, or the labels of an indexed axis, don't fit in the integer
    /// type that holds them.
    #[error("overflow: {0}")]
    Overflow(String),

    /// An axis or table record that doesn't describe a valid axis or table.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

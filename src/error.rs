//! Crate error type.

use std::fmt;

/// A type alias for results produced by this crate.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors raised while building inputs or running a zone search.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Required input data is missing or empty.
    DataUnavailable(String),

    /// A location id does not fit the cost matrix.
    IndexOutOfRange {
        /// The offending location id.
        index: usize,
        /// Matrix dimension.
        size: usize,
    },

    /// A row of a cost grid has the wrong length.
    NotSquare {
        /// Number of rows in the grid.
        rows: usize,
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// A cost entry is negative or not finite.
    InvalidCost {
        /// Row of the entry.
        from: usize,
        /// Column of the entry.
        to: usize,
        /// The rejected value.
        value: f64,
    },

    /// Two matrices that must be combined have different dimensions.
    DimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// A location row carries unusable data.
    InvalidLocation {
        /// Position of the row in the table.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A location category label is not recognised.
    UnknownLocationKind(String),

    /// Run parameters are out of their valid domain.
    InvalidConfig(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable(what) => write!(f, "data unavailable: {what}"),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "location id {index} out of range for cost matrix of size {size}")
            }
            Self::NotSquare { rows, row, len } => {
                write!(f, "cost grid is not square: row {row} has {len} entries, expected {rows}")
            }
            Self::InvalidCost { from, to, value } => {
                write!(f, "invalid cost {value} at ({from}, {to})")
            }
            Self::DimensionMismatch { left, right } => {
                write!(f, "cannot combine matrices of size {left} and {right}")
            }
            Self::InvalidLocation { index, reason } => {
                write!(f, "invalid location at row {index}: {reason}")
            }
            Self::UnknownLocationKind(label) => write!(f, "unknown location kind '{label}'"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for RouteError {}

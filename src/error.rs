use ndarray::ShapeError;
use ndarray_stats::errors::{MinMaxError, MultiInputError};
use thiserror::Error;

/// Errors raised while measuring distances, classifying or loading a dataset.
#[derive(Debug, Error)]
pub enum Error {
    /// Two feature vectors of different length were compared.
    #[error("dimension mismatch: {left} != {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// An operation that needs at least one sample was given none.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Shape error reported by the deviation routines.
    #[error("invalid input shape: {0}")]
    Shape(#[from] MultiInputError),

    /// A feature column has no well defined minimum or maximum.
    #[error("cannot determine feature range: {0}")]
    FeatureRange(#[from] MinMaxError),

    /// Parsed values could not be arranged into a feature matrix.
    #[error(transparent)]
    Layout(#[from] ShapeError),

    /// Reading a dataset failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A numeric field could not be parsed.
    #[error("line {line}: cannot parse `{value}` as a number")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },

    /// A numeric field parsed to NaN or infinity.
    #[error("line {line}: `{value}` is not a finite number")]
    NonFinite {
        /// One-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },

    /// A sample factory received the wrong number of features.
    #[error("expected {expected} features, found {found}")]
    FieldCount {
        /// Number of features the factory accepts.
        expected: usize,
        /// Number of features it was given.
        found: usize,
    },

    /// A row has a different field count than the first row.
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Field count of the first row.
        expected: usize,
        /// Field count of this row.
        found: usize,
    },

    /// A label is not part of the category set.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// A metric name did not match any known metric.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

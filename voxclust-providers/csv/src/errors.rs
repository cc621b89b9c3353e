use std::{io, num::ParseIntError, path::PathBuf, str::Utf8Error};

use thiserror::Error;

/// Errors raised while reading or writing point clouds.
#[derive(Debug, Error)]
pub enum CsvProviderError {
    /// A file could not be opened or created.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a line from the input failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The input held no valid record.
    #[error("`{name}` contains no valid point records")]
    EmptyInput {
        /// Name of the source.
        name: String,
    },
    /// A point carried a cluster id no labelling of the written points can
    /// produce.
    #[error("cluster id {id} is out of range for {points} points")]
    ClusterIdOutOfRange {
        /// Offending cluster id.
        id: u64,
        /// Number of points being written.
        points: usize,
    },
    /// Writing clustered records failed.
    #[error("failed to write clusters: {0}")]
    Write(#[from] io::Error),
}

/// Reason a single input record was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The record had fewer than three fields.
    #[error("expected 3 coordinates, found {found}")]
    MissingField {
        /// Number of fields present.
        found: usize,
    },
    /// A coordinate field was not a 32-bit integer.
    #[error("coordinate {index} (`{value}`) is not an integer: {source}")]
    InvalidCoordinate {
        /// Zero-based field position.
        index: usize,
        /// Offending text.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The record was not valid UTF-8.
    #[error("record is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Decode failure.
        #[source]
        source: Utf8Error,
    },
}

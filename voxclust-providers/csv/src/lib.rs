//! Comma-separated point cloud ingestion and cluster serialization.
//!
//! Input records carry three integer coordinates per line; an optional
//! leading header is skipped and malformed records are dropped with a
//! warning. Output records have the form `cluster,c0,c1,c2`, grouped by
//! ascending cluster label.

mod errors;
mod reader;
mod writer;

pub use errors::{CsvProviderError, RecordError};
pub use reader::{DroppedRecord, PointCloud, ReadOptions, parse_record};
pub use writer::{WriteSummary, write_partition, write_partition_to_path, write_points};

#[cfg(test)]
mod tests;

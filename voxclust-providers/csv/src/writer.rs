//! Serialization of clustered points.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{Span, field, info, instrument};
use voxclust_core::{ClusterPartition, Point, UNASSIGNED_LABEL};

use crate::errors::CsvProviderError;

/// Record counts per output group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Points written under the unassigned label `-1`.
    pub unassigned: usize,
    /// Points written per cluster id, indexed by id.
    pub cluster_sizes: Vec<usize>,
}

impl WriteSummary {
    /// Total number of records written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.unassigned + self.cluster_sizes.iter().sum::<usize>()
    }

    /// `(label, size)` pairs from `-1` through the largest cluster id.
    pub fn groups(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        std::iter::once((UNASSIGNED_LABEL, self.unassigned)).chain(
            self.cluster_sizes
                .iter()
                .enumerate()
                .map(|(id, &size)| (i64::try_from(id).unwrap_or(i64::MAX), size)),
        )
    }
}

/// Writes `points` as `cluster,c0,c1,c2` records grouped by ascending label,
/// unassigned points first. Within a group, records keep input order.
///
/// Cluster ids must be smaller than `points.len()`, the bound any labelling
/// of these points respects.
///
/// # Errors
/// Returns [`CsvProviderError::ClusterIdOutOfRange`] before writing anything
/// when a point carries a larger id, and [`CsvProviderError::Write`] when the
/// writer fails.
///
/// # Examples
/// ```
/// use voxclust_core::{ClusterId, Point};
/// use voxclust_providers_csv::write_points;
///
/// let mut a = Point::new(5, 5, 5);
/// let mut b = Point::new(0, 0, 0);
/// a.assign(ClusterId::new(1));
/// b.assign(ClusterId::new(0));
/// let mut out = Vec::new();
/// let summary = write_points(&[a, b, Point::new(7, 7, 7)], &mut out)?;
/// assert_eq!(String::from_utf8_lossy(&out), "-1,7,7,7\n0,0,0,0\n1,5,5,5\n");
/// assert_eq!(summary.total(), 3);
/// # Ok::<(), voxclust_providers_csv::CsvProviderError>(())
/// ```
#[instrument(
    name = "csv.write",
    err,
    skip_all,
    fields(points = points.len(), clusters = field::Empty),
)]
pub fn write_points<W>(points: &[Point], mut writer: W) -> Result<WriteSummary, CsvProviderError>
where
    W: Write,
{
    if let Some(id) = points
        .iter()
        .filter_map(Point::cluster)
        .find(|id| !usize::try_from(id.get()).is_ok_and(|index| index < points.len()))
    {
        return Err(CsvProviderError::ClusterIdOutOfRange {
            id: id.get(),
            points: points.len(),
        });
    }

    let mut order: Vec<&Point> = points.iter().collect();
    order.sort_by_key(|point| point.cluster_label());

    let mut summary = WriteSummary::default();
    for point in order {
        let [x, y, z] = point.coordinate();
        let label = point.cluster_label();
        writeln!(writer, "{label},{x},{y},{z}")?;
        match usize::try_from(label) {
            Ok(id) => {
                if summary.cluster_sizes.len() <= id {
                    summary.cluster_sizes.resize(id + 1, 0);
                }
                summary.cluster_sizes[id] += 1;
            }
            Err(_) => summary.unassigned += 1,
        }
    }
    writer.flush()?;

    Span::current().record("clusters", summary.cluster_sizes.len());
    info!(records = summary.total(), "clusters written");
    Ok(summary)
}

/// Writes every point of `partition`; see [`write_points`].
///
/// # Errors
/// Returns [`CsvProviderError::Write`] when the writer fails.
pub fn write_partition<W>(
    partition: &ClusterPartition,
    writer: W,
) -> Result<WriteSummary, CsvProviderError>
where
    W: Write,
{
    write_points(partition.points(), writer)
}

/// Creates (or truncates) `path` and writes `partition` into it.
///
/// # Errors
/// Returns [`CsvProviderError::Io`] when the file cannot be created and
/// [`CsvProviderError::Write`] when writing fails.
pub fn write_partition_to_path(
    partition: &ClusterPartition,
    path: impl AsRef<Path>,
) -> Result<WriteSummary, CsvProviderError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CsvProviderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_partition(partition, BufWriter::new(file))
}

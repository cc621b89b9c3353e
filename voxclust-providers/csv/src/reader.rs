//! Point cloud ingestion.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{Span, field, info, instrument, warn};
use voxclust_core::{Coordinate, Point};

use crate::errors::{CsvProviderError, RecordError};

/// Ingestion options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the first line.
    pub header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { header: true }
    }
}

/// A record that was dropped during ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedRecord {
    /// One-based line number.
    pub line: usize,
    /// Why the record was rejected.
    pub reason: RecordError,
}

/// Points parsed from a comma-separated source, in input order.
#[derive(Clone, Debug)]
pub struct PointCloud {
    name: String,
    points: Vec<Point>,
    dropped: Vec<DroppedRecord>,
}

impl PointCloud {
    /// Parses every line of `reader`.
    ///
    /// Blank lines are skipped. Records that are not UTF-8 or fail
    /// [`parse_record`] are logged and listed in
    /// [`PointCloud::dropped_records`].
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Read`] when the underlying reader fails and
    /// [`CsvProviderError::EmptyInput`] when no record parses.
    ///
    /// # Examples
    /// ```
    /// use voxclust_providers_csv::{PointCloud, ReadOptions};
    ///
    /// let input = "x,y,z\n0,0,0\n1,2,3\nbad,1,1\n";
    /// let cloud = PointCloud::try_from_reader("demo", input.as_bytes(), ReadOptions::default())?;
    /// assert_eq!(cloud.len(), 2);
    /// assert_eq!(cloud.points()[1].coordinate(), [1, 2, 3]);
    /// assert_eq!(cloud.dropped_records()[0].line, 4);
    /// # Ok::<(), voxclust_providers_csv::CsvProviderError>(())
    /// ```
    #[instrument(
        name = "csv.read",
        err,
        skip_all,
        fields(source = field::Empty, header = options.header, points = field::Empty, dropped = field::Empty),
    )]
    pub fn try_from_reader<R>(
        name: impl Into<String>,
        reader: R,
        options: ReadOptions,
    ) -> Result<Self, CsvProviderError>
    where
        R: BufRead,
    {
        let name = name.into();
        let span = Span::current();
        span.record("source", field::display(&name));

        let mut points = Vec::new();
        let mut dropped = Vec::new();
        for (index, raw) in reader.split(b'\n').enumerate() {
            let number = index + 1;
            let mut raw = raw.map_err(|source| CsvProviderError::Read {
                line: number,
                source,
            })?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let parsed = String::from_utf8(raw)
                .map_err(|err| RecordError::InvalidUtf8 {
                    source: err.utf8_error(),
                })
                .and_then(|line| parse_record(&line).map(|record| (line, record)));
            if index == 0 && options.header {
                skip_header(&parsed);
                continue;
            }
            match parsed {
                Ok((_, Some(coordinate))) => points.push(Point::from_coordinate(coordinate)),
                Ok((_, None)) => {}
                Err(reason) => {
                    warn!(line = number, reason = %reason, "dropping malformed record");
                    dropped.push(DroppedRecord {
                        line: number,
                        reason,
                    });
                }
            }
        }

        span.record("points", points.len());
        span.record("dropped", dropped.len());
        if points.is_empty() {
            return Err(CsvProviderError::EmptyInput { name });
        }
        info!(source = name.as_str(), points = points.len(), "point cloud loaded");
        Ok(Self {
            name,
            points,
            dropped,
        })
    }

    /// Opens and parses the file at `path`, named after its file name.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Io`] when the file cannot be opened, and
    /// the errors of [`PointCloud::try_from_reader`] otherwise.
    pub fn try_from_path(
        path: impl AsRef<Path>,
        options: ReadOptions,
    ) -> Result<Self, CsvProviderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CsvProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Self::try_from_reader(name, BufReader::new(file), options)
    }

    /// Name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of parsed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a successfully parsed cloud.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Parsed points in input order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the cloud, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Records rejected during ingestion.
    #[must_use]
    pub fn dropped_records(&self) -> &[DroppedRecord] {
        &self.dropped
    }
}

/// Logs the skipped header, loudly when it would have been a valid point.
fn skip_header(parsed: &Result<(String, Option<Coordinate>), RecordError>) {
    match parsed {
        Ok((line, Some(coordinate))) => warn!(
            header = line.as_str(),
            ?coordinate,
            "skipping header that parses as a point record"
        ),
        Ok((line, None)) => info!(header = line.as_str(), "skipping header"),
        Err(reason) => info!(reason = %reason, "skipping header"),
    }
}

/// Parses one comma-separated record into a coordinate.
///
/// Returns `Ok(None)` for blank lines. Surrounding whitespace is ignored and
/// fields beyond the third are not inspected.
///
/// # Errors
/// Returns [`RecordError`] when fewer than three fields are present or a
/// coordinate is not an `i32`.
///
/// # Examples
/// ```
/// use voxclust_providers_csv::{RecordError, parse_record};
///
/// assert_eq!(parse_record(" 1, -2 ,3,extra"), Ok(Some([1, -2, 3])));
/// assert_eq!(parse_record("   "), Ok(None));
/// assert_eq!(parse_record("1,2"), Err(RecordError::MissingField { found: 2 }));
/// ```
pub fn parse_record(line: &str) -> Result<Option<Coordinate>, RecordError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split(',').take(3).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(RecordError::MissingField {
            found: fields.len(),
        });
    }
    let mut coordinate = [0_i32; 3];
    for (index, (slot, value)) in coordinate.iter_mut().zip(fields).enumerate() {
        *slot = value
            .parse()
            .map_err(|source| RecordError::InvalidCoordinate {
                index,
                value: value.to_owned(),
                source,
            })?;
    }
    Ok(Some(coordinate))
}

pub(crate) use super::{
    CsvProviderError, PointCloud, ReadOptions, RecordError, parse_record, write_partition,
    write_partition_to_path, write_points,
};

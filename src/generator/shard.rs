//! Directory sharding for generated documents.
//!
//! Large document counts are spread over three nested directory levels so no
//! single directory grows past a bounded number of entries. Each level index
//! is computed independently from the 1-based file number.
use std::path::PathBuf;

pub const OUTER_BUCKET_SIZE: usize = 1000;
pub const MIDDLE_BUCKET_SIZE: usize = 100;
pub const INNER_BUCKET_SIZE: usize = 25;

/// 1-based bucket number of a 1-based `index` for buckets of `bucket_size`.
///
/// # Panics
/// Panics if `bucket_size` is zero.
#[must_use]
pub fn bucket(index: usize, bucket_size: usize) -> usize {
    index.saturating_sub(1) / bucket_size + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardPath {
    pub outer: usize,
    pub middle: usize,
    pub inner: usize,
}

impl ShardPath {
    #[must_use]
    pub fn for_file(file_number: usize) -> Self {
        Self {
            outer: bucket(file_number, OUTER_BUCKET_SIZE),
            middle: bucket(file_number, MIDDLE_BUCKET_SIZE),
            inner: bucket(file_number, INNER_BUCKET_SIZE),
        }
    }

    /// Relative directory path, e.g. `3/25/100`.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        [self.outer, self.middle, self.inner].iter().map(ToString::to_string).collect()
    }
}

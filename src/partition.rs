use std::ops::RangeInclusive;

/// A partition to be used when processing a subset of data
#[derive(Hash, Debug, Clone, PartialEq, Copy)]
pub struct Partition {
    start: usize,
    end: usize
}

impl Partition {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end);
        Self { start, end }
    }

    pub fn get_start(&self) -> usize { self.start }
    pub fn get_end(&self) -> usize { self.end }

    /// Returns size of the partition.
    pub fn get_size(&self) -> usize { self.end - self.start + 1 }

    /// Creates a range to work with when processing data for the partition.
    pub fn get_range(&self) -> RangeInclusive<usize> { self.start..=self.end }
}

use std::{num::NonZeroUsize, ops::Index, thread};

use crate::partition::Partition;

/// Number of worker threads to fan out to, falls back to 1 when the platform can't tell.
pub fn available_threads() -> usize {
    thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

/// Partions data to be operated on, and provides for multi-threading.
#[derive(Hash, Debug, Clone, PartialEq, Default)]
pub struct Partitioner {
    partitions: Vec<Partition>
}

impl Index<usize> for Partitioner {
    type Output = Partition;

    fn index(&self, index: usize) -> &Self::Output {
        &self.partitions[index]
    }
}

impl Partitioner {
    pub fn new(partitions: Vec<Partition>) -> Self { Partitioner { partitions } }

    /// Creates a partitioner with partitions that are mostly equal in size, with no more than a difference of 1.
    /// A count of zero yields no partitions at all.
    pub fn with_partitions(count: usize, partition_count: usize) -> Self {
        assert!(partition_count > 0, "Need at least one partition.");

        if count == 0 {
            return Partitioner::default();
        }

        let partition_size = count / partition_count;

        let mut partitions: Vec<Partition>;
        if partition_size < 1 {
        // Count is not large enough to split into partitions
            partitions = vec![Partition::new(0, count - 1)];

            return Partitioner { partitions };
        } else {
            partitions = Vec::with_capacity(partition_count);
        }

        // Calculates left over items and distributes remainder
        let spread = count % partition_count;
        let mut cursor = 0;
        let mut end: usize;
        for partition_index in 0..partition_count {
            let adjusted_partition_size = partition_size + if partition_index < spread { 1 } else { 0 };
            let start = cursor;
            cursor = start + adjusted_partition_size;
            end = cursor - 1;

            partitions.push(Partition::new(start, end));
        }

        Partitioner { partitions }
    }

    /// Splits count across every available core.
    pub fn for_available_threads(count: usize) -> Self {
        Partitioner::with_partitions(count, available_threads())
    }

    pub fn len(&self) -> usize { self.partitions.len() }

    pub fn is_empty(&self) -> bool { self.partitions.is_empty() }

    /// Parallelizes work among partitions as evenly as possible.
    /// Ensures result is aggregated in correct order.
    pub fn parallelized<T, F>(&self, function: F) -> Vec<T>
    where
        F: FnOnce(&Partition) -> Vec<T> + Send + Copy,
        T : Send
    {
        match self.partitions.len() {
            0 => return Vec::new(),
            // Since only 1 partition, do not use threading.
            1 => return function(&self.partitions[0]),
            _ => {}
        }

        let mut values: Vec<T> = Vec::new();
        thread::scope(|s| {
            let mut scope_join_handles = Vec::with_capacity(self.partitions.len());

            for partition in &self.partitions[..] {
                scope_join_handles.push(s.spawn(move || {
                    function(partition)
                }));
            }

            for scope_join_handle in scope_join_handles {
                match scope_join_handle.join() {
                    Ok(result) => {
                        values.extend(result);
                    },
                    Err(err) => std::panic::resume_unwind(err)
                }
            }
        });

        values
    }
}

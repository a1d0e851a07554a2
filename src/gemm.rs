use clap::ValueEnum;
use tracing::trace;

use crate::{
    geoalg::f64_math::{matrix::Matrix, optimized_functions::dot_product_of_vector_slices},
    partition::Partition,
    partitioner::{available_threads, Partitioner},
};

/// Borrowed row-major matrix with an explicit leading dimension (distance between row starts).
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    values: &'a [f64],
    rows: usize,
    columns: usize,
    leading_dimension: usize,
}

impl<'a> MatrixView<'a> {
    pub fn new(values: &'a [f64], rows: usize, columns: usize, leading_dimension: usize) -> Self {
        assert!(leading_dimension >= columns, "Leading dimension can't be smaller than the column count.");
        if rows > 0 {
            assert!(
                values.len() >= (rows - 1) * leading_dimension + columns,
                "Buffer too short for {rows} rows with leading dimension {leading_dimension}."
            );
        }

        Self { values, rows, columns, leading_dimension }
    }

    /// Tightly packed view, leading dimension equals the column count.
    pub fn packed(values: &'a [f64], rows: usize, columns: usize) -> Self {
        Self::new(values, rows, columns, columns)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }
    pub fn leading_dimension(&self) -> usize { self.leading_dimension }

    pub fn row(&self, row: usize) -> &'a [f64] {
        assert!(row < self.rows, "Tried to get a row that was out of bounds.");

        let start = row * self.leading_dimension;
        &self.values[start..start + self.columns]
    }
}

impl Matrix {
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView::packed(&self.values, self.rows, self.columns)
    }
}

/// General matrix multiply with the rhs transposed, the only product the im2col path needs.
/// Anything implementing it can be plugged into convolve_gemm, including a plain function.
/// Returns lhs.rows x rhs.rows values, row-major and tightly packed,
/// where result[i * rhs.rows + j] = row i of lhs · row j of rhs.
pub trait Gemm {
    fn multiply_transposed(&self, lhs: MatrixView<'_>, rhs: MatrixView<'_>) -> Vec<f64>;
}

impl<F> Gemm for F
where
    F: Fn(MatrixView<'_>, MatrixView<'_>) -> Vec<f64>,
{
    fn multiply_transposed(&self, lhs: MatrixView<'_>, rhs: MatrixView<'_>) -> Vec<f64> {
        self(lhs, rhs)
    }
}

fn check_inner_dimensions(lhs: &MatrixView<'_>, rhs: &MatrixView<'_>) {
    assert_eq!(
        lhs.columns, rhs.columns,
        "When multiplying by a transpose, lhs columns must equal rhs columns."
    );
}

/// Multiplies rows first..=last of lhs against every row of rhs.
fn multiply_rows(lhs: &MatrixView<'_>, rhs: &MatrixView<'_>, partition: &Partition) -> Vec<f64> {
    let mut values = Vec::with_capacity(partition.get_size() * rhs.rows);

    for row in partition.get_range() {
        let ls = lhs.row(row);
        for r_row in 0..rhs.rows {
            values.push(dot_product_of_vector_slices(ls, rhs.row(r_row)));
        }
    }

    values
}

/// Single threaded reference multiply, one dot product per output element.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveGemm;

impl Gemm for NaiveGemm {
    fn multiply_transposed(&self, lhs: MatrixView<'_>, rhs: MatrixView<'_>) -> Vec<f64> {
        check_inner_dimensions(&lhs, &rhs);

        if lhs.rows == 0 {
            return Vec::new();
        }

        multiply_rows(&lhs, &rhs, &Partition::new(0, lhs.rows - 1))
    }
}

/// Splits lhs rows into partitions and multiplies them on separate threads.
#[derive(Debug, Clone, Copy)]
pub struct PartitionedGemm {
    partition_count: usize,
}

impl PartitionedGemm {
    pub fn new(partition_count: usize) -> Self {
        assert!(partition_count > 0, "Need at least one partition.");
        Self { partition_count }
    }

    pub fn partition_count(&self) -> usize { self.partition_count }
}

impl Default for PartitionedGemm {
    fn default() -> Self {
        Self::new(available_threads())
    }
}

impl Gemm for PartitionedGemm {
    fn multiply_transposed(&self, lhs: MatrixView<'_>, rhs: MatrixView<'_>) -> Vec<f64> {
        check_inner_dimensions(&lhs, &rhs);
        trace!(m = lhs.rows, n = rhs.rows, k = lhs.columns, partitions = self.partition_count, "gemm");

        let partitioner = Partitioner::with_partitions(lhs.rows, self.partition_count);
        let (lhs, rhs) = (&lhs, &rhs);

        partitioner.parallelized(|partition: &Partition| multiply_rows(lhs, rhs, partition))
    }
}

/// Multiply implementations selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GemmKind {
    /// Single threaded reference multiply
    Naive,
    /// Rows split across all available cores
    #[default]
    Partitioned,
}

impl Gemm for GemmKind {
    fn multiply_transposed(&self, lhs: MatrixView<'_>, rhs: MatrixView<'_>) -> Vec<f64> {
        match self {
            GemmKind::Naive => NaiveGemm.multiply_transposed(lhs, rhs),
            GemmKind::Partitioned => PartitionedGemm::default().multiply_transposed(lhs, rhs),
        }
    }
}

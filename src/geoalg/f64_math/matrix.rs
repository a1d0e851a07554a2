use super::optimized_functions::dot_product_of_vector_slices;

/// Matrix is implemented as a single dimensional vector of f64s.
/// This implementation of Matrix is row-major.
/// Row-major is specified so rows can be handed out as slices and split across threads.
#[derive(PartialEq, Debug, Clone)]
pub struct Matrix {
    pub rows: usize,
    pub columns: usize,
    pub values: Vec<f64>
}

impl Matrix {
    /// Create a matrix from a vector.
    pub fn from_vec(values: Vec<f64>, rows: usize, columns: usize) -> Self {
        assert_eq!(rows * columns, values.len(), "Matrix values don't match rows x columns.");

        Matrix {
            rows,
            columns,
            values
        }
    }

    /// Returns index in vec given row and column.
    fn index_for(&self, row: usize, column: usize) -> usize {
        assert!(row < self.rows);
        assert!(column < self.columns);

        row * self.columns + column
    }

    /// Gets reference to value at specified row and column.
    pub fn get(&self, row: usize, column: usize) -> Option<&f64> {
        self.values.get(self.index_for(row, column))
    }

    /// Returns slice of matrix that is a row of the matrix
    pub fn get_row_vector_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "Tried to get a row that was out of bounds.");

        let start = row * self.columns;
        let end = start + self.columns;
        &self.values[start..end]
    }

    /// Returns a newly allocated matrix that is the transpose of the matrix operated on.
    pub fn get_transpose(&self) -> Matrix {
        let capacity = self.rows * self.columns;
        let mut transposed = Vec::with_capacity(capacity);

        for i in 0..capacity {
            let index_to_push = self.columns * (i % self.rows) + i / self.rows;
            transposed.push(self.values[index_to_push]);
        }

        Matrix {
            columns: self.rows,
            rows: self.columns,
            values: transposed
        }
    }

    /// Multiplies two matrices using transpose operation for efficiency.
    pub fn mul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.columns, rhs.rows, "When multiplying matrices, lhs columns must equal rhs rows.");

        let r_size = rhs.columns * self.rows;
        let mut floats = Vec::with_capacity(r_size);

        let t = rhs.get_transpose();

        for row in 0..self.rows {
            let ls = self.get_row_vector_slice(row);
            for t_row in 0..t.rows {
                let rs = t.get_row_vector_slice(t_row);
                floats.push(dot_product_of_vector_slices(ls, rs));
            }
        }

        Matrix {
            columns: rhs.columns,
            rows: self.rows,
            values: floats
        }
    }

    pub fn shape(&self) -> String {
        let rows = self.rows;
        let columns = self.columns;
        format!("{rows} x {columns}")
    }
}

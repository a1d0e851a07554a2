use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::shape::Shape;

/// Fills a buffer of count values drawn uniformly from [0, 1).
/// Draw order equals index order, so two identically seeded generators produce identical buffers.
pub fn random_unit_values<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f64> {
    Uniform::new(0.0f64, 1.0f64)
        .sample_iter(rng)
        .take(count)
        .collect()
}

/// Tensor is implemented as a single dimensional vector of f64s, row-major with width varying fastest.
#[derive(PartialEq, Debug, Clone)]
pub struct Tensor {
    pub values: Vec<f64>,
    pub shape: Shape
}

/// Kernels share the tensor layout, read as (output channels, input channels, height, width).
pub type Kernel = Tensor;

impl Tensor {
    pub fn new(values: Vec<f64>, shape: Shape) -> Tensor {
        assert_eq!(values.len(), shape.size(), "The length of tensor doesn't match its shape.");

        Tensor {
            values,
            shape
        }
    }

    /// Creates a tensor where every element is zero.
    pub fn new_zeroed(shape: Shape) -> Tensor {
        Tensor {
            values: vec![0.0f64; shape.size()],
            shape
        }
    }

    /// Returns a tensor filled with values drawn from rng, see random_unit_values.
    pub fn new_randomized<R: Rng + ?Sized>(shape: Shape, rng: &mut R) -> Tensor {
        Tensor {
            values: random_unit_values(shape.size(), rng),
            shape
        }
    }

    /// Gets a specific value inside tensor.
    pub fn get_at(&self, coordinate: [usize; 4]) -> f64 {
        self.values[self.shape.index_at(coordinate)]
    }

    /// Returns size of underlying vector.
    pub fn get_element_count(&self) -> usize {
        self.values.len()
    }
}

use std::fmt;

/// Shape of a 4-dimensional row-major tensor, outermost axis first.
/// For activations the axes read (batch, channel, height, width),
/// for kernels (output channel, input channel, kernel height, kernel width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    dimensions: [usize; 4],

    // Calculated on creation, and only privately accessible
    strides: [usize; 4],
    size: usize,
}

impl Shape {
    /// Creates an NCHW shape.
    pub fn nchw(batches: usize, channels: usize, height: usize, width: usize) -> Self {
        Self::new([batches, channels, height, width])
    }

    /// Generalized shape creation
    pub fn new(dimensions: [usize; 4]) -> Self {
        let (strides, size) = Shape::compute_strides(&dimensions);

        Self { dimensions, strides, size }
    }

    /// Helper function to pre-compute strides and size of shape.
    fn compute_strides(dimensions: &[usize; 4]) -> ([usize; 4], usize) {
        let mut strides = [0; 4];
        let mut stride = 1;
        for axis in (0..dimensions.len()).rev() {
            strides[axis] = stride;
            stride *= dimensions[axis];
        }

        (strides, stride)
    }

    /// Gets total size of shape.
    pub fn size(&self) -> usize { self.size }

    pub fn batches(&self) -> usize { self.dimensions[0] }
    pub fn channels(&self) -> usize { self.dimensions[1] }
    pub fn height(&self) -> usize { self.dimensions[2] }
    pub fn width(&self) -> usize { self.dimensions[3] }

    pub fn dimensions(&self) -> [usize; 4] { self.dimensions }

    /// Flat index of a coordinate inside this shape.
    pub fn index_at(&self, coordinate: [usize; 4]) -> usize {
        let mut index = 0;
        for axis in 0..self.dimensions.len() {
            assert!(self.dimensions[axis] > coordinate[axis], "Coordinate outside of shape bounds.");
            index += self.strides[axis] * coordinate[axis];
        }

        index
    }

    /// Output shape of a valid cross correlation of self (N, C, H, W) with kernel (K, C, KH, KW).
    /// Assumes stride of 1 and no padding.
    pub fn valid_cross_correlation(&self, kernel: &Shape) -> Shape {
        assert_eq!(self.channels(), kernel.channels(), "Kernel channels must match input channels.");
        assert!(self.height() >= kernel.height(), "Input must have same or more rows than kernel.");
        assert!(self.width() >= kernel.width(), "Input must have same or more columns than kernel.");

        Shape::nchw(
            self.batches(),
            kernel.batches(),
            self.height() - kernel.height() + 1,
            self.width() - kernel.width() + 1)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [n, c, h, w] = self.dimensions;
        write!(f, "{n} x {c} x {h} x {w}")
    }
}

use std::{fmt, ops::RangeInclusive};

use clap::ValueEnum;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{error::ConfigError, geoalg::f64_math::shape::Shape};

/// Sizes batch size and input channels are picked from.
pub const DEFAULT_COMMON_SIZES: [usize; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

/// Distributions the random convolution parameters are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRanges {
    pub common_sizes: Vec<usize>,
    pub out_channels: RangeInclusive<usize>,
    pub spatial: RangeInclusive<usize>,
    pub kernel: RangeInclusive<usize>,
}

impl Default for ShapeRanges {
    fn default() -> Self {
        Self {
            common_sizes: DEFAULT_COMMON_SIZES.to_vec(),
            out_channels: 1..=8,
            spatial: 8..=64,
            kernel: 2..=5,
        }
    }
}

fn check_range(name: &'static str, range: &RangeInclusive<usize>) -> Result<(), ConfigError> {
    let (low, high) = (*range.start(), *range.end());
    if low > high {
        return Err(ConfigError::EmptyRange { name, low, high });
    }
    if low == 0 {
        return Err(ConfigError::ZeroDimension { name });
    }

    Ok(())
}

impl ShapeRanges {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.common_sizes.is_empty() {
            return Err(ConfigError::EmptyCommonSizes);
        }
        if self.common_sizes.contains(&0) {
            return Err(ConfigError::ZeroDimension { name: "common size" });
        }

        check_range("output channels", &self.out_channels)?;
        check_range("spatial", &self.spatial)?;
        check_range("kernel", &self.kernel)
    }
}

/// What to do with a kernel that is larger than the input it slides over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KernelFitPolicy {
    /// Shrink the kernel to the input size
    #[default]
    Clamp,
    /// Refuse the configuration
    Reject,
}

/// Parameters of one convolution run.
/// Input is (batch_size, in_channels, in_height, in_width), kernel is (out_channels, in_channels, kernel_height, kernel_width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolutionConfig {
    pub batch_size: usize,
    pub in_channels: usize,
    pub in_height: usize,
    pub in_width: usize,
    pub out_channels: usize,
    pub kernel_height: usize,
    pub kernel_width: usize,
}

impl ConvolutionConfig {
    /// Draws a configuration from rng in a fixed order:
    /// batch size, input channels, input height, input width, output channels, kernel height, kernel width.
    /// The kernel is not fitted to the input yet, see fit_kernel.
    pub fn random<R: Rng + ?Sized>(ranges: &ShapeRanges, rng: &mut R) -> Result<Self, ConfigError> {
        ranges.validate()?;

        let common_index = Uniform::new_inclusive(0, ranges.common_sizes.len() - 1);
        let out_channels = Uniform::new_inclusive(*ranges.out_channels.start(), *ranges.out_channels.end());
        let spatial = Uniform::new_inclusive(*ranges.spatial.start(), *ranges.spatial.end());
        let kernel = Uniform::new_inclusive(*ranges.kernel.start(), *ranges.kernel.end());

        let batch_size = ranges.common_sizes[common_index.sample(rng)];
        let in_channels = ranges.common_sizes[common_index.sample(rng)];
        let in_height = spatial.sample(rng);
        let in_width = spatial.sample(rng);
        let out_channels = out_channels.sample(rng);
        let kernel_height = kernel.sample(rng);
        let kernel_width = kernel.sample(rng);

        Ok(Self {
            batch_size,
            in_channels,
            in_height,
            in_width,
            out_channels,
            kernel_height,
            kernel_width,
        })
    }

    /// Makes sure the kernel fits inside the input so the output is at least 1x1.
    pub fn fit_kernel(self, policy: KernelFitPolicy) -> Result<Self, ConfigError> {
        let fits = self.kernel_height <= self.in_height && self.kernel_width <= self.in_width;

        let fitted = match (fits, policy) {
            (true, _) => self,
            (false, KernelFitPolicy::Clamp) => Self {
                kernel_height: self.kernel_height.min(self.in_height),
                kernel_width: self.kernel_width.min(self.in_width),
                ..self
            },
            (false, KernelFitPolicy::Reject) => {
                return Err(ConfigError::KernelExceedsInput {
                    kernel_height: self.kernel_height,
                    kernel_width: self.kernel_width,
                    input_height: self.in_height,
                    input_width: self.in_width,
                })
            }
        };

        fitted.validate()?;
        Ok(fitted)
    }

    /// Every dimension is non-zero and the kernel fits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("batch size", self.batch_size),
            ("input channels", self.in_channels),
            ("input height", self.in_height),
            ("input width", self.in_width),
            ("output channels", self.out_channels),
            ("kernel height", self.kernel_height),
            ("kernel width", self.kernel_width),
        ];
        if let Some(&(name, _)) = dimensions.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroDimension { name });
        }

        if self.kernel_height > self.in_height || self.kernel_width > self.in_width {
            return Err(ConfigError::KernelExceedsInput {
                kernel_height: self.kernel_height,
                kernel_width: self.kernel_width,
                input_height: self.in_height,
                input_width: self.in_width,
            });
        }

        Ok(())
    }

    pub fn output_height(&self) -> usize { self.in_height - self.kernel_height + 1 }
    pub fn output_width(&self) -> usize { self.in_width - self.kernel_width + 1 }

    pub fn input_shape(&self) -> Shape {
        Shape::nchw(self.batch_size, self.in_channels, self.in_height, self.in_width)
    }

    pub fn kernel_shape(&self) -> Shape {
        Shape::nchw(self.out_channels, self.in_channels, self.kernel_height, self.kernel_width)
    }

    pub fn output_shape(&self) -> Shape {
        Shape::nchw(self.batch_size, self.out_channels, self.output_height(), self.output_width())
    }
}

/// Status line announcing the run, part of the result stream so both runs can be compared on it.
impl fmt::Display for ConvolutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "batchsize={}, ic={}, ih={}, iw={}, kc={}, kh={}, kw={} -> oh={}, ow={}",
            self.batch_size,
            self.in_channels,
            self.in_height,
            self.in_width,
            self.out_channels,
            self.kernel_height,
            self.kernel_width,
            self.output_height(),
            self.output_width()
        )
    }
}

use tracing::debug;

use crate::{
    gemm::{Gemm, MatrixView},
    geoalg::f64_math::{
        im2col::{im2col, nhwc_to_nchw},
        tensor::{Kernel, Tensor},
    },
};

/// Simple and naive valid cross correlation with no optimizations, used as ground truth.
/// Input is (N, C, H, W), kernel is (K, C, KH, KW), result is (N, K, H - KH + 1, W - KW + 1).
/// Assumes stride of 1, no padding and no kernel flip.
/// Each output sums over input channel, then kernel row, then kernel column, in that order.
pub fn convolve_direct(input: &Tensor, kernel: &Kernel) -> Tensor {
    let output_shape = input.shape.valid_cross_correlation(&kernel.shape);
    let [batches, channels, image_height, image_width] = input.shape.dimensions();
    let [kernel_count, _, kernel_height, kernel_width] = kernel.shape.dimensions();
    let feature_height = output_shape.height();
    let feature_width = output_shape.width();
    let kernel_size = channels * kernel_height * kernel_width;

    let mut value_stream = Vec::with_capacity(output_shape.size());

    for batch in 0..batches {
        for filter in 0..kernel_count {
            // Sliding row window
            for row in 0..feature_height {
                // Sliding column window
                for column in 0..feature_width {
                    let mut c_accum = 0.;
                    for channel in 0..channels {
                        for kernel_row in 0..kernel_height {
                            for kernel_column in 0..kernel_width {
                                let x = input.values[((batch * channels + channel) * image_height + row + kernel_row) * image_width + column + kernel_column];
                                let y = kernel.values[filter * kernel_size + (channel * kernel_height + kernel_row) * kernel_width + kernel_column];

                                c_accum += x * y;
                            }
                        }
                    }

                    value_stream.push(c_accum);
                }
            }
        }
    }

    Tensor::new(value_stream, output_shape)
}

/// Valid cross correlation through im2col and a single matrix multiply.
/// The patch matrix (N * OH * OW rows, C * KH * KW columns) is multiplied by the transposed
/// kernel matrix (K rows, C * KH * KW columns), giving an (N, OH, OW, K) result that is
/// converted back to (N, K, OH, OW).
pub fn convolve_gemm<G: Gemm + ?Sized>(input: &Tensor, kernel: &Kernel, gemm: &G) -> Tensor {
    let output_shape = input.shape.valid_cross_correlation(&kernel.shape);
    let [kernel_count, channels, kernel_height, kernel_width] = kernel.shape.dimensions();
    let kernel_size = channels * kernel_height * kernel_width;

    let patches = im2col(input, kernel_height, kernel_width);
    debug!(patch_matrix = %patches.shape(), "unrolled input");

    let kernels = MatrixView::packed(&kernel.values, kernel_count, kernel_size);
    let nhwc = gemm.multiply_transposed(patches.view(), kernels);
    assert_eq!(nhwc.len(), output_shape.size(), "Matrix multiply returned the wrong number of values.");
    debug!(values = nhwc.len(), "multiplied patches by kernels");

    nhwc_to_nchw(
        &nhwc,
        output_shape.batches(),
        output_shape.channels(),
        output_shape.height(),
        output_shape.width())
}

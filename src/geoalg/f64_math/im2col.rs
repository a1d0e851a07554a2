use tracing::trace;

use crate::{partition::Partition, partitioner::{available_threads, Partitioner}};

use super::{matrix::Matrix, shape::Shape, tensor::Tensor};

/// Unrolls every receptive field of input into a row of a patch matrix.
/// Row (b * oh + h) * ow + w holds the patch of output location (b, h, w),
/// column (c * kh + kernel_row) * kw + kernel_column holds input[b, c, h + kernel_row, w + kernel_column].
/// Assumes stride of 1 and no padding.
pub fn im2col(input: &Tensor, kernel_height: usize, kernel_width: usize) -> Matrix {
    im2col_partitioned(input, kernel_height, kernel_width, available_threads())
}

/// Same as im2col with an explicit number of partitions, rows are split across threads.
pub fn im2col_partitioned(input: &Tensor, kernel_height: usize, kernel_width: usize, partition_count: usize) -> Matrix {
    let [batches, channels, image_height, image_width] = input.shape.dimensions();
    assert!(kernel_height >= 1 && kernel_height <= image_height, "Kernel height must fit inside the input.");
    assert!(kernel_width >= 1 && kernel_width <= image_width, "Kernel width must fit inside the input.");

    let feature_height = image_height - kernel_height + 1;
    let feature_width = image_width - kernel_width + 1;
    let feature_size = feature_height * feature_width;
    let rows = batches * feature_size;
    let columns = channels * kernel_height * kernel_width;
    let images = &input.values[..];

    trace!(rows, columns, partition_count, "im2col");

    let inner = |partition: &Partition| {
        let mut patches = Vec::with_capacity(partition.get_size() * columns);

        for row in partition.get_range() {
            let batch = row / feature_size;
            let feature_row = (row % feature_size) / feature_width;
            let feature_column = row % feature_width;

            for channel in 0..channels {
                let channel_offset = (batch * channels + channel) * image_height;
                for kernel_row in 0..kernel_height {
                    // Kernel columns of one kernel row are contiguous in the input.
                    let offset = (channel_offset + feature_row + kernel_row) * image_width + feature_column;
                    patches.extend_from_slice(&images[offset..offset + kernel_width]);
                }
            }
        }

        patches
    };

    let values = Partitioner::with_partitions(rows, partition_count).parallelized(inner);

    Matrix::from_vec(values, rows, columns)
}

/// Converts a (batch, height, width, channel) buffer into a canonical NCHW tensor.
/// dest[((b * k + c) * oh + h) * ow + w] = src[((b * oh + h) * ow + w) * k + c]
pub fn nhwc_to_nchw(values: &[f64], batches: usize, channels: usize, height: usize, width: usize) -> Tensor {
    let shape = Shape::nchw(batches, channels, height, width);
    assert_eq!(values.len(), shape.size(), "NHWC buffer doesn't match requested shape.");

    let plane = height * width;
    let inner = |partition: &Partition| {
        partition.get_range()
            .map(|index| {
                let batch = index / (channels * plane);
                let channel = (index / plane) % channels;
                let row = (index % plane) / width;
                let column = index % width;

                values[((batch * height + row) * width + column) * channels + channel]
            })
            .collect::<Vec<f64>>()
    };

    let permuted = Partitioner::for_available_threads(shape.size()).parallelized(inner);

    Tensor::new(permuted, shape)
}

/// Converts a canonical NCHW tensor into a (batch, height, width, channel) buffer, the inverse of nhwc_to_nchw.
pub fn nchw_to_nhwc(tensor: &Tensor) -> Vec<f64> {
    let [batches, channels, height, width] = tensor.shape.dimensions();
    let plane = height * width;
    let values = &tensor.values[..];

    let inner = |partition: &Partition| {
        partition.get_range()
            .map(|index| {
                let channel = index % channels;
                let pixel = index / channels;
                let batch = pixel / plane;
                let spatial = pixel % plane;

                values[(batch * channels + channel) * plane + spatial]
            })
            .collect::<Vec<f64>>()
    };

    Partitioner::for_available_threads(batches * plane * channels).parallelized(inner)
}

use convcheck::comparator::within_tolerance;
use convcheck::convolution::{convolve_direct, convolve_gemm};
use convcheck::gemm::{NaiveGemm, PartitionedGemm};
use convcheck::geoalg::f64_math::im2col::im2col;
use convcheck::geoalg::f64_math::shape::Shape;
use convcheck::geoalg::f64_math::tensor::Tensor;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// (input shape, kernel shape) pairs whose kernels always fit.
fn problem_shapes() -> impl Strategy<Value = (Shape, Shape)> {
    (1usize..=3, 1usize..=4, 1usize..=8, 1usize..=8, 1usize..=4)
        .prop_flat_map(|(batches, channels, height, width, kernels)| {
            (1..=height, 1..=width).prop_map(move |(kernel_height, kernel_width)| {
                (
                    Shape::nchw(batches, channels, height, width),
                    Shape::nchw(kernels, channels, kernel_height, kernel_width),
                )
            })
        })
}

fn assert_close(expected: &Tensor, actual: &Tensor) {
    assert_eq!(expected.shape, actual.shape);
    for (index, (&a, &b)) in expected.values.iter().zip(&actual.values).enumerate() {
        assert!(within_tolerance(a, b, 1e-12), "Values differ at {index}: {a} vs {b}");
    }
}

proptest! {
    #[test]
    fn gemm_matches_direct((input_shape, kernel_shape) in problem_shapes(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let input = Tensor::new_randomized(input_shape, &mut rng);
        let kernel = Tensor::new_randomized(kernel_shape, &mut rng);

        let expected = convolve_direct(&input, &kernel);

        assert_close(&expected, &convolve_gemm(&input, &kernel, &NaiveGemm));
        assert_close(&expected, &convolve_gemm(&input, &kernel, &PartitionedGemm::new(3)));
    }

    #[test]
    fn im2col_references_every_element_as_often_as_direct((input_shape, kernel_shape) in problem_shapes()) {
        // Values are their own indices so patch entries can be traced back to the input.
        let input = Tensor::new((0..input_shape.size()).map(|i| i as f64).collect(), input_shape);
        let [_, _, kernel_height, kernel_width] = kernel_shape.dimensions();
        let [batches, channels, height, width] = input_shape.dimensions();
        let output_height = height - kernel_height + 1;
        let output_width = width - kernel_width + 1;

        let patches = im2col(&input, kernel_height, kernel_width);

        let mut seen = vec![0usize; input_shape.size()];
        for value in &patches.values {
            seen[*value as usize] += 1;
        }

        let mut expected = vec![0usize; input_shape.size()];
        for batch in 0..batches {
            for row in 0..output_height {
                for column in 0..output_width {
                    for channel in 0..channels {
                        for kernel_row in 0..kernel_height {
                            for kernel_column in 0..kernel_width {
                                expected[input_shape.index_at([batch, channel, row + kernel_row, column + kernel_column])] += 1;
                            }
                        }
                    }
                }
            }
        }

        prop_assert_eq!(seen, expected);
    }
}

#[test]
fn test_single_pixel_input_and_kernel() {
    let input = Tensor::new(vec![3.], Shape::nchw(1, 1, 1, 1));
    let kernel = Tensor::new(vec![-2.], Shape::nchw(1, 1, 1, 1));

    assert_eq!(convolve_direct(&input, &kernel).values, vec![-6.]);
    assert_eq!(convolve_gemm(&input, &kernel, &NaiveGemm).values, vec![-6.]);
}

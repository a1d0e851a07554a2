const ROWS_DIFFERENT_LENGTHS: &str = "Cannot take dot product of two &[f64] of unequal length.";

/// Dot product of two slices, accumulated left to right.
/// The accumulation order is part of the contract, reference and GEMM paths both rely on it.
pub fn dot_product_of_vector_slices(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len(), "{}", ROWS_DIFFERENT_LENGTHS);

    let mut sum = 0f64;
    for (x, y) in lhs.iter().zip(rhs) {
        sum += x * y;
    }

    sum
}

/// Largest absolute difference between two equally sized slices, handy when checking two results against each other.
pub fn max_abs_difference(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len(), "{}", ROWS_DIFFERENT_LENGTHS);

    lhs.iter()
        .zip(rhs)
        .map(|(x, y)| (x - y).abs())
        .fold(0., f64::max)
}

use thiserror::Error;

/// Reasons a benchmark configuration can't be run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Kernel extends past the input and the fit policy refuses to shrink it
    #[error("kernel {kernel_height}x{kernel_width} does not fit inside input {input_height}x{input_width}")]
    KernelExceedsInput {
        kernel_height: usize,
        kernel_width: usize,
        input_height: usize,
        input_width: usize,
    },

    /// A dimension that has to be at least one was zero
    #[error("{name} must be at least 1")]
    ZeroDimension {
        name: &'static str,
    },

    /// No candidate sizes to draw batch size and input channels from
    #[error("common size list is empty")]
    EmptyCommonSizes,

    /// Range whose lower bound is above its upper bound
    #[error("{name} range {low}..={high} is empty")]
    EmptyRange {
        name: &'static str,
        low: usize,
        high: usize,
    },
}

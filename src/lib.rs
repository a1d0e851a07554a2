pub mod geoalg;
pub mod partitioner;
pub mod partition;
pub mod gemm;
pub mod convolution;
pub mod config;
pub mod error;
pub mod benchmark;
pub mod cli;
pub mod flat_serializer;
pub mod comparator;
pub mod seed;
pub mod logging;
pub mod timed;
pub mod prettify;

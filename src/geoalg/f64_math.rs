pub mod im2col;
pub mod matrix;
pub mod optimized_functions;
pub mod shape;
pub mod tensor;

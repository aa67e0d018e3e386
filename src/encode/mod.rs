//! Result encoders: two independent JSON wire shapes over a tabular result.

pub mod generic;
pub mod grid;

pub use generic::encode;
pub use grid::encode_grid;

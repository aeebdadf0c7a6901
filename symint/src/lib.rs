mod error;
mod node;
mod normalize;
mod ops;
mod shape_env;
mod sym_float;
mod sym_int;

#[cfg(test)]
mod test_node;

pub use error::SymIntError;
pub use node::{SymFloatNode, SymFloatNodeImpl, SymIntNode, SymIntNodeImpl};
pub use ops::{floor_div, floor_mod};
pub use shape_env::{Guard, ShapeEnv};
pub use sym_float::SymFloat;
pub use sym_int::*;

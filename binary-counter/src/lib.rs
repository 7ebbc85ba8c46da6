mod counter;
pub mod linear;
pub mod min;
pub mod min12;
pub mod pool;

pub use counter::{BinaryCounter, BinaryOperation, RepeatableOperation};
pub use min::find_min;
pub use min12::find_min12;

pub mod counter;
pub mod finders;
pub mod pool;

pub mod dialect;
pub mod generator;
pub mod column;

pub mod entry;
pub mod builder;

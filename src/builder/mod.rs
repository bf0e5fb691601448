pub mod case_style;
pub mod name_builder;

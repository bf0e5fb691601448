pub mod normalizer;
pub mod script;
pub mod ngram;

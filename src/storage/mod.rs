pub mod parser;
pub mod merge_policy;
pub mod merger;
pub mod resources;
pub mod custom;
pub mod validator;
pub mod export;
pub mod repository;

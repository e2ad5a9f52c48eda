pub mod fetch;
pub mod models;
pub mod parse;
pub mod selector;

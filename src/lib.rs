pub mod calendar;
pub mod config;
pub mod cover;
pub mod error;
pub mod output;
pub mod startup;

//! Utility modules: configuration, error types and console printing.

pub mod config;
pub mod errors;
pub mod printer;

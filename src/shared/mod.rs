/// Shared utilities: error types, the result alias, logging setup and file safety checks
pub mod error;
pub mod logger;
mod result;
pub mod security;

pub use result::Result;

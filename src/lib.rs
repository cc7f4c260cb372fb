// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod error;
pub mod player;
pub mod standings;
pub mod trade;
pub mod valuation;

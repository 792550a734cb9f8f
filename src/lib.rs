//! MATKA — bet-pattern engine for matka/starline games
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod cli;
pub mod config;
pub mod types;
pub mod engine;
pub mod rates;
pub mod storage;

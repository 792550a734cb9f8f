//! Integration tests for the MATKA engine.
//!
//! Drive the public library API the way the backend does: validate at
//! stake time, declare a result, then settle.

mod scenarios;
mod settlement_files;

//! Shared utilities

pub mod testing;

//! Backends module - file system operations
//!
//! Provides:
//! - scan: markdown page discovery with the ignore crate

pub mod scan;

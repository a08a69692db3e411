//! Core module - shared data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path normalization utilities
//! - Page file reading
//! - Common utilities

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;

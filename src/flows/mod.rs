//! Flows module - operations that combine discovery, the quiz pipeline and output
//!
//! Provides:
//! - page: run a single page through both stages
//! - build: render a whole docs tree into an output directory

pub mod build;
pub mod page;

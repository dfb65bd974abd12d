//! Localization engine.
//!
//! Leaf modules (`scanner`, `literal`, `classify`, `markup`, `registry`,
//! `fields`, `patterns`) are pure functions over text. `rewrite` turns whole
//! files into new content, and `pipeline` drives a run over a project tree
//! using `file_scanner`, `backup` and `catalog` for disk access.

pub mod backup;
pub mod catalog;
pub mod classify;
pub mod context;
pub mod fields;
pub mod file_scanner;
pub mod literal;
pub mod markup;
pub mod patterns;
pub mod pipeline;
pub mod registry;
pub mod rewrite;
pub mod scanner;

pub use context::RunContext;
pub use pipeline::{ExtractReport, run_extract};

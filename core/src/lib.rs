//! Rewrites `inline` C function definitions into unconditionally-inlining `#define` macros, and
//! rewrites every call site to match.
//!
//! [`driver::rewrite_file`] is the entry point; everything else is organized by pipeline stage.

#[macro_use]
extern crate log;

pub mod ast_build;
pub mod ast_diff;
pub mod classify;
pub mod driver;
pub mod error;
pub mod include_split;
pub mod preprocess;
pub mod printer;
pub mod record;
pub mod rename;
pub mod rewrite;

pub use driver::{rewrite_file, Config};

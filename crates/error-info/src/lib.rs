/*
 * error-info
 * Copyright (c) 2025 Posit, PBC
 */

//! Build-time generator for static error-info tables.
//!
//! A definition file (`*.error.in`) lists one error per line together with
//! a few `KEY=value` directives. This crate parses such files and renders
//! them into a C fragment holding a `static struct err_msg_info` array,
//! which the interpreter's error reporting code includes directly.
//!
//! - [`definition`] - line classification and parsing
//! - [`emit`] - rendering of the banner and the table
//! - [`generate`] - reading inputs and writing outputs
//!
//! # Usage
//!
//! ```ignore
//! use error_info::{generate_all, Mode};
//!
//! let summary = generate_all(["Source/PurC/errors.error.in"], Mode::Write)?;
//! for path in &summary.written {
//!     println!("Wrote {}", path.display());
//! }
//! ```

pub mod definition;
pub mod emit;
pub mod error;
pub mod generate;

pub use definition::{
    Definition, DirectiveKind, ErrorEntry, GenerationDirectives, Line, classify_line,
    parse_definition,
};
pub use emit::{LICENSE_HEADER, RECORD_TYPE, render_fragment, render_table};
pub use error::GenerateError;
pub use generate::{Generated, Mode, Summary, generate, generate_all, input_dir};

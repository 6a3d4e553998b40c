/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::path::PathBuf;
use thiserror::Error;

/// Error type for table generation.
///
/// Every variant is fatal: the driver stops at the first one.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The definition file could not be read
    #[error("Failed to read definition file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generated fragment could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition file has no `OUTPUT=` line
    #[error("{}: missing OUTPUT= directive, no output file to write", .path.display())]
    MissingOutputDirective { path: PathBuf },
}

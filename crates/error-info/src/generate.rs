/*
 * generate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-file generation pipeline.
//!
//! Each definition file is read, parsed and rendered on its own; nothing
//! is carried over from one file to the next. The generated fragment is
//! written next to the definition file, under the name given by its
//! `OUTPUT=` directive.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::definition::{DirectiveKind, parse_definition};
use crate::emit::render_fragment;
use crate::error::GenerateError;

/// A rendered fragment and where it belongs.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The definition file this fragment was generated from.
    pub input: PathBuf,
    /// `<directory of input>/<OUTPUT value>`
    pub output_path: PathBuf,
    pub fragment: String,
    pub entry_count: usize,
}

impl Generated {
    /// Write the fragment, creating or truncating the output file.
    pub fn write(&self) -> Result<(), GenerateError> {
        fs::write(&self.output_path, &self.fragment).map_err(|source| {
            GenerateError::WriteOutput {
                path: self.output_path.clone(),
                source,
            }
        })?;
        info!(
            input = %self.input.display(),
            output = %self.output_path.display(),
            entries = self.entry_count,
            "Wrote error table"
        );
        Ok(())
    }

    /// Whether the output file already holds exactly this fragment.
    pub fn is_up_to_date(&self) -> bool {
        fs::read(&self.output_path).is_ok_and(|existing| existing == self.fragment.as_bytes())
    }
}

/// Directory that output paths of `input` are resolved against.
///
/// A bare file name resolves against the current directory.
pub fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read, parse and render one definition file.
///
/// Nothing is written; see [`Generated::write`].
pub fn generate(input: &Path) -> Result<Generated, GenerateError> {
    let content = fs::read_to_string(input).map_err(|source| GenerateError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let definition = parse_definition(&content);
    let directives = &definition.directives;
    debug!(
        input = %input.display(),
        entries = definition.entries.len(),
        "Parsed definition file"
    );

    let output_file = match directives.output_file.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(GenerateError::MissingOutputDirective {
                path: input.to_path_buf(),
            });
        }
    };

    if let Some(legacy) = directives.legacy_output_file.as_deref() {
        if legacy != output_file {
            warn!(
                input = %input.display(),
                legacy,
                output = output_file,
                "{}= is ignored; writing to the {}= target",
                DirectiveKind::LegacyOutputFile.key(),
                DirectiveKind::Output.key()
            );
        }
    }

    let var_name = directives.output_var.as_deref().unwrap_or_else(|| {
        warn!(
            input = %input.display(),
            "No {}= directive; the table will be declared without a name",
            DirectiveKind::OutputVar.key()
        );
        ""
    });

    Ok(Generated {
        input: input.to_path_buf(),
        output_path: input_dir(input).join(output_file),
        fragment: render_fragment(var_name, &definition.entries),
        entry_count: definition.entries.len(),
    })
}

/// What [`generate_all`] does with each rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write every output file.
    #[default]
    Write,
    /// Compare against the existing output files, writing nothing.
    Check,
}

/// Outcome of a [`generate_all`] run.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub up_to_date: Vec<PathBuf>,
    /// Outputs that are missing or differ from what would be generated.
    pub stale: Vec<PathBuf>,
}

impl Summary {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty()
    }
}

/// Process definition files in order, stopping at the first error.
///
/// Outputs written before the failing file are left in place.
pub fn generate_all<I, P>(inputs: I, mode: Mode) -> Result<Summary, GenerateError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut summary = Summary::default();

    for input in inputs {
        let generated = generate(input.as_ref())?;
        match mode {
            Mode::Write => {
                generated.write()?;
                summary.written.push(generated.output_path);
            }
            Mode::Check => {
                if generated.is_up_to_date() {
                    summary.up_to_date.push(generated.output_path);
                } else {
                    warn!(
                        input = %generated.input.display(),
                        output = %generated.output_path.display(),
                        "Generated error table is out of date"
                    );
                    summary.stale.push(generated.output_path);
                }
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_dir_of_bare_file_name() {
        assert_eq!(input_dir(Path::new("errors.error.in")), PathBuf::from("."));
    }

    #[test]
    fn test_input_dir_of_nested_path() {
        assert_eq!(
            input_dir(Path::new("src/interpreter/errors.error.in")),
            PathBuf::from("src/interpreter")
        );
    }

    #[test]
    fn test_default_mode_writes() {
        assert_eq!(Mode::default(), Mode::Write);
    }
}

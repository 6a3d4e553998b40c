/*
 * definition.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser for error-definition files.
//!
//! A definition file is line oriented. Each line is either a directive
//! (`KEY=value`), an error entry made of three identifiers followed by a
//! free-form message, or something else that is silently dropped:
//!
//! ```text
//! OUTPUT_VAR=purc_errors
//! OUTPUT=purc-errors.inc
//! PURC_ERROR_OUT_OF_MEMORY OutOfMemory 0 "Out of memory"
//! ```
//!
//! Classification is done one line at a time by [`classify_line`], which
//! carries no state. [`parse_definition`] folds the classified lines into a
//! [`Definition`].

use regex::Regex;
use std::sync::LazyLock;

/// `OUTPUT_FILE=<value>`, parsed but never used for the output path.
static LEGACY_OUTPUT_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^OUTPUT_FILE=(.*)$").expect("Invalid regex pattern for OUTPUT_FILE")
});

static OUTPUT_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^OUTPUT_VAR=(.*)$").expect("Invalid regex pattern for OUTPUT_VAR")
});

static OUTPUT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^OUTPUT=(.*)$").expect("Invalid regex pattern for OUTPUT"));

/// Three identifiers and the rest of the line.
///
/// The message group is greedy and keeps any embedded whitespace.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\s+([A-Za-z0-9_]+)\s+([A-Za-z0-9_]+)\s+(.+)$")
        .expect("Invalid regex pattern for error entries")
});

/// One error description, copied verbatim into the generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Symbolic name of the error, echoed as a comment above its record.
    pub code: String,
    /// Exception the error maps to.
    pub exception_name: String,
    /// Secondary classification tag.
    pub flag: String,
    /// Remainder of the line. Usually a string literal or a macro call.
    pub message: String,
}

/// The directive keys understood in a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `OUTPUT_FILE=`
    LegacyOutputFile,
    /// `OUTPUT_VAR=`
    OutputVar,
    /// `OUTPUT=`
    Output,
}

impl DirectiveKind {
    /// The key as written in definition files, without the `=`.
    pub fn key(&self) -> &'static str {
        match self {
            DirectiveKind::LegacyOutputFile => "OUTPUT_FILE",
            DirectiveKind::OutputVar => "OUTPUT_VAR",
            DirectiveKind::Output => "OUTPUT",
        }
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Directive { kind: DirectiveKind, value: String },
    Entry(ErrorEntry),
    /// Blank lines, comments and anything malformed.
    Ignored,
}

/// Directives collected from one definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationDirectives {
    pub legacy_output_file: Option<String>,
    /// Name of the emitted array.
    pub output_var: Option<String>,
    /// Output file name, relative to the directory of the definition file.
    pub output_file: Option<String>,
}

impl GenerationDirectives {
    /// Record a directive. A repeated key replaces the earlier value.
    pub fn apply(&mut self, kind: DirectiveKind, value: String) {
        let slot = match kind {
            DirectiveKind::LegacyOutputFile => &mut self.legacy_output_file,
            DirectiveKind::OutputVar => &mut self.output_var,
            DirectiveKind::Output => &mut self.output_file,
        };
        *slot = Some(value);
    }
}

/// Everything extracted from one definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    pub directives: GenerationDirectives,
    /// Entries in input order.
    pub entries: Vec<ErrorEntry>,
}

/// Classify one line of a definition file.
///
/// Patterns are tried in priority order and the first match wins:
/// `OUTPUT_FILE=`, `OUTPUT_VAR=`, `OUTPUT=`, then the four-field entry.
pub fn classify_line(line: &str) -> Line {
    let line = line.trim();

    let directives: [(&Regex, DirectiveKind); 3] = [
        (&*LEGACY_OUTPUT_FILE_PATTERN, DirectiveKind::LegacyOutputFile),
        (&*OUTPUT_VAR_PATTERN, DirectiveKind::OutputVar),
        (&*OUTPUT_PATTERN, DirectiveKind::Output),
    ];
    for (pattern, kind) in directives {
        if let Some(caps) = pattern.captures(line) {
            return Line::Directive {
                kind,
                value: caps[1].trim().to_string(),
            };
        }
    }

    match ENTRY_PATTERN.captures(line) {
        Some(caps) => Line::Entry(ErrorEntry {
            code: caps[1].to_string(),
            exception_name: caps[2].to_string(),
            flag: caps[3].to_string(),
            message: caps[4].trim().to_string(),
        }),
        None => Line::Ignored,
    }
}

/// Parse the full text of a definition file.
///
/// A leading UTF-8 byte-order mark is skipped.
pub fn parse_definition(content: &str) -> Definition {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut definition = Definition::default();

    for (index, raw) in content.lines().enumerate() {
        match classify_line(raw) {
            Line::Directive { kind, value } => definition.directives.apply(kind, value),
            Line::Entry(entry) => definition.entries.push(entry),
            Line::Ignored => {
                if !raw.trim().is_empty() {
                    tracing::trace!(line = index + 1, "Ignoring unrecognized line");
                }
            }
        }
    }

    definition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, exception_name: &str, flag: &str, message: &str) -> ErrorEntry {
        ErrorEntry {
            code: code.to_string(),
            exception_name: exception_name.to_string(),
            flag: flag.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_classify_directives() {
        assert_eq!(
            classify_line("OUTPUT_VAR=my_table"),
            Line::Directive {
                kind: DirectiveKind::OutputVar,
                value: "my_table".to_string()
            }
        );
        assert_eq!(
            classify_line("  OUTPUT=my_table.inc  "),
            Line::Directive {
                kind: DirectiveKind::Output,
                value: "my_table.inc".to_string()
            }
        );
        assert_eq!(
            classify_line("OUTPUT_FILE=legacy.inc"),
            Line::Directive {
                kind: DirectiveKind::LegacyOutputFile,
                value: "legacy.inc".to_string()
            }
        );
    }

    #[test]
    fn test_output_var_is_not_output() {
        // OUTPUT= must not shadow the longer keys
        let Line::Directive { kind, .. } = classify_line("OUTPUT_VAR=x") else {
            panic!("expected a directive");
        };
        assert_eq!(kind, DirectiveKind::OutputVar);
    }

    #[test]
    fn test_classify_entry_keeps_message_verbatim() {
        assert_eq!(
            classify_line("ERR_FOO EXC_BAR FLAG_BAZ \"some  message\""),
            Line::Entry(entry("ERR_FOO", "EXC_BAR", "FLAG_BAZ", "\"some  message\""))
        );
    }

    #[test]
    fn test_entry_separators_may_be_tabs() {
        assert_eq!(
            classify_line("E1\tX1\t\t0\tMSG(\"a\", 1)"),
            Line::Entry(entry("E1", "X1", "0", "MSG(\"a\", 1)"))
        );
    }

    #[test]
    fn test_fewer_than_four_tokens_is_ignored() {
        assert_eq!(classify_line("ERR_FOO EXC_BAR FLAG_BAZ"), Line::Ignored);
        assert_eq!(classify_line("ERR_FOO EXC_BAR FLAG_BAZ   "), Line::Ignored);
        assert_eq!(classify_line("ERR_FOO EXC_BAR"), Line::Ignored);
    }

    #[test]
    fn test_blank_and_comment_lines_are_ignored() {
        assert_eq!(classify_line(""), Line::Ignored);
        assert_eq!(classify_line("   \t"), Line::Ignored);
        assert_eq!(classify_line("# ERR_FOO EXC_BAR FLAG_BAZ text"), Line::Ignored);
        assert_eq!(classify_line("ERR-FOO EXC_BAR FLAG_BAZ text"), Line::Ignored);
    }

    #[test]
    fn test_parse_definition_preserves_order() {
        let content = "\
OUTPUT_VAR=my_table
# a comment
ERR_B EXC FLAG \"second letter\"

ERR_A EXC FLAG \"first letter\"
OUTPUT=my_table.inc
ERR_C EXC FLAG
";
        let definition = parse_definition(content);
        let codes: Vec<&str> = definition.entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["ERR_B", "ERR_A"]);
        assert_eq!(definition.directives.output_var.as_deref(), Some("my_table"));
        assert_eq!(definition.directives.output_file.as_deref(), Some("my_table.inc"));
        assert_eq!(definition.directives.legacy_output_file, None);
    }

    #[test]
    fn test_output_line_is_not_also_an_entry() {
        let definition = parse_definition("OUTPUT=a b c d\n");
        assert!(definition.entries.is_empty());
        assert_eq!(definition.directives.output_file.as_deref(), Some("a b c d"));
    }

    #[test]
    fn test_legacy_output_file_is_kept_separately() {
        let definition = parse_definition("OUTPUT_FILE=old.inc\nOUTPUT=new.inc\n");
        assert_eq!(
            definition.directives.legacy_output_file.as_deref(),
            Some("old.inc")
        );
        assert_eq!(definition.directives.output_file.as_deref(), Some("new.inc"));
    }

    #[test]
    fn test_repeated_directive_last_wins() {
        let definition = parse_definition(
            "OUTPUT=first.inc\nOUTPUT_VAR=first\nOUTPUT_FILE=first.old\n\
             OUTPUT=second.inc\nOUTPUT_VAR=second\nOUTPUT_FILE=second.old\n",
        );
        assert_eq!(
            definition.directives.output_file.as_deref(),
            Some("second.inc")
        );
        assert_eq!(definition.directives.output_var.as_deref(), Some("second"));
        assert_eq!(
            definition.directives.legacy_output_file.as_deref(),
            Some("second.old")
        );
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let definition = parse_definition("\u{FEFF}OUTPUT=t.inc\nOUTPUT_VAR=t\nE X F \"m\"\n");
        assert_eq!(definition.directives.output_file.as_deref(), Some("t.inc"));
        assert_eq!(definition.directives.output_var.as_deref(), Some("t"));
        assert_eq!(definition.entries, vec![entry("E", "X", "F", "\"m\"")]);

        let definition = parse_definition("\u{FEFF}E1 X F m\n");
        assert_eq!(definition.entries, vec![entry("E1", "X", "F", "m")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let definition = parse_definition("OUTPUT_VAR=t\r\nE X F \"m\"\r\n");
        assert_eq!(definition.directives.output_var.as_deref(), Some("t"));
        assert_eq!(definition.entries, vec![entry("E", "X", "F", "\"m\"")]);
    }

    #[test]
    fn test_parse_is_stateless() {
        let first = parse_definition("OUTPUT_VAR=a\nE1 X F m\n");
        let second = parse_definition("E2 X F m\n");
        assert_eq!(first.entries.len(), 1);
        assert_eq!(second.directives, GenerationDirectives::default());
        assert_eq!(second.entries, vec![entry("E2", "X", "F", "m")]);
    }
}

/*
 * emit.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering of parsed entries into a C table fragment.
//!
//! The fragment is meant to be `#include`d by the interpreter's error
//! reporting code, which declares `struct err_msg_info`. Field values are
//! copied verbatim: the definition file is responsible for producing valid
//! C tokens.

use crate::definition::ErrorEntry;

/// Banner placed at the top of every generated fragment.
///
/// The license text is copied verbatim from the fragments produced by the
/// former `make-error-info.py` script. Only the NOTE lines differ: they name
/// this `make-error-info` tool and spell "manually" correctly, so existing
/// generated files change in those two lines on first regeneration.
pub const LICENSE_HEADER: &str = r#"/*
 * Author: XueShuming
 *
 * Copyright (C) 2021 FMSoft <https://www.fmsoft.cn>
 *
 * This file is a part of PurC (short for Purring Cat), an HVML interpreter.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Lesser General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>
 */

 // NOTE
 // This file is auto-generated by using 'make-error-info'.
 // Please take care when you modify this file manually.

"#;

/// Struct type of the emitted array elements.
pub const RECORD_TYPE: &str = "err_msg_info";

/// Render the array declaration for `entries`, without the banner.
///
/// Each entry becomes a record of `{ message, exception, flag, 0 }` preceded
/// by a comment naming its code. The trailing `0` is a reserved field filled
/// in at runtime.
pub fn render_table(var_name: &str, entries: &[ErrorEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("static struct {} {}[] = {{\n", RECORD_TYPE, var_name));
    for entry in entries {
        out.push_str(&format!("    /* {} */\n", entry.code));
        out.push_str("    {\n");
        out.push_str(&format!("        {},\n", entry.message));
        out.push_str(&format!("        {},\n", entry.exception_name));
        out.push_str(&format!("        {},\n", entry.flag));
        out.push_str("        0\n");
        out.push_str("    },\n");
    }
    out.push_str("};\n");
    out
}

/// Render the complete fragment: banner, a blank line, then the table.
pub fn render_fragment(var_name: &str, entries: &[ErrorEntry]) -> String {
    let table = render_table(var_name, entries);
    let mut out = String::with_capacity(LICENSE_HEADER.len() + 1 + table.len());
    out.push_str(LICENSE_HEADER);
    out.push('\n');
    out.push_str(&table);
    out
}

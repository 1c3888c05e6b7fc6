// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_ast::{Index, SourceLocation};
use std::ops::Range;

/// Anything that can be reported as a diagnostic against a source text.
pub trait ErrorTrait {
    fn message(&self) -> String;

    /// Location of the error, if known.
    fn location(&self) -> Option<&SourceLocation>;
}

/// Character offset of `index` in `source`. Lines and columns are one-based.
/// Positions past the end of a line or of the text are clamped.
fn index_to_offset(index: Index, source: &str) -> usize {
    let line = index.line.max(1) as usize;
    let column = index.column.max(1) as usize;
    let mut offset = 0;
    for (n, text) in source.split_inclusive('\n').enumerate() {
        let len = text.chars().count();
        if n + 1 == line {
            let line_len = text.trim_end_matches('\n').chars().count();
            return offset + (column - 1).min(line_len);
        }
        offset += len;
    }
    offset
}

/// Convert a line/column `SourceLocation` to a span of character offsets as
/// wanted by `ariadne`. The span always has `end > start`.
pub fn location_to_span(location: Option<&SourceLocation>, source: &str) -> Range<usize> {
    let total = source.chars().count();
    let Some(location) = location.filter(|loc| loc.first().line > 0) else {
        return 0..1;
    };
    let start = index_to_offset(location.first(), source).min(total);
    // `last` is inclusive.
    let end = (index_to_offset(location.last(), source) + 1).max(start + 1);
    start..end
}

// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Source locations are attached by the parser and only ever read by the analyzer.
// They are copied onto output nodes and into diagnostics.

use smol_str::SmolStr;
use std::fmt;

const UNKNOWN_FILE_NAME: &str = "<unknown>";

/// A one-based line and column. Zero means "not known".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index {
    pub line: u32,
    pub column: u32,
}

impl Index {
    pub fn new(line: u32, column: u32) -> Index {
        Index { line, column }
    }
}

/// Inclusive range of source positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub first: Index,
    pub last: Index,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file_name: Option<SmolStr>,
    range: Range,
}

impl SourceLocation {
    pub fn new<T: AsRef<str>>(file_name: Option<T>, first: Index, last: Index) -> SourceLocation {
        SourceLocation {
            file_name: file_name.map(|name| SmolStr::new(name.as_ref())),
            range: Range { first, last },
        }
    }

    /// Location spanning `(first_line, first_column)` to `(last_line, last_column)`
    /// with no file name.
    pub fn from_lines(
        first_line: u32,
        first_column: u32,
        last_line: u32,
        last_column: u32,
    ) -> SourceLocation {
        SourceLocation::new(
            None::<&str>,
            Index::new(first_line, first_column),
            Index::new(last_line, last_column),
        )
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn first(&self) -> Index {
        self.range.first
    }

    pub fn last(&self) -> Index {
        self.range.last
    }

    /// Grow the range so that it covers `index`.
    pub fn expand_to_include(&mut self, index: Index) {
        self.range.first = self.range.first.min(index);
        self.range.last = self.range.last.max(index);
    }

    /// Grow the range so that it covers all of `other`.
    pub fn expand_to_cover(&mut self, other: &SourceLocation) {
        self.expand_to_include(other.first());
        self.expand_to_include(other.last());
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { first, last } = self.range;
        write!(f, "{}", self.file_name().unwrap_or(UNKNOWN_FILE_NAME))?;
        if first.line == 0 {
            return Ok(());
        }
        write!(f, ":{}", first.line)?;

        // Only line numbers are known.
        if first.column == 0 {
            if last.line > first.line {
                write!(f, "..{}", last.line)?;
            }
            return Ok(());
        }
        write!(f, ":{}", first.column)?;
        if last.line == first.line {
            if last.column > first.column {
                write!(f, "..{}", last.column)?;
            }
        } else if last.line > first.line {
            write!(f, "..{}:{}", last.line, last.column)?;
        }
        Ok(())
    }
}

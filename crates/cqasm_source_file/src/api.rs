// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use ariadne::Config;
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io;
use std::ops::Range;

use crate::source_file::{location_to_span, ErrorTrait};

fn build_report<'a>(
    message: &str,
    span: &Range<usize>,
    file_path: &'a str,
    color: bool,
) -> Report<'a, (&'a str, Range<usize>)> {
    let mut colors = ColorGenerator::new();
    let a = colors.next();
    // `span` is in characters from the beginning of the source.
    Report::build(ReportKind::Error, (file_path, span.clone()))
        .with_message(message)
        .with_config(Config::default().with_compact(true).with_color(color))
        .with_label(
            Label::new((file_path, span.clone()))
                .with_message("Near this point")
                .with_color(a),
        )
        .finish()
}

/// Print a single diagnostic to stderr.
pub fn report_error(
    message: &str,
    span: &Range<usize>,
    file_path: &str,
    source: &str,
) -> io::Result<()> {
    build_report(message, span, file_path, true).eprint((file_path, Source::from(source)))
}

/// Print compiler errors. Diagnostics include text taken from `source`.
/// `file_path` is only used for labelling; it need not name an existing file.
pub fn print_compiler_errors<T: ErrorTrait>(
    errors: &[T],
    file_path: &str,
    source: &str,
) -> io::Result<()> {
    for err in errors.iter() {
        let span = location_to_span(err.location(), source);
        report_error(&err.message(), &span, file_path, source)?;
        eprintln!();
    }
    Ok(())
}

/// Same as `print_compiler_errors`, but without color, into `out`.
pub fn write_compiler_errors<T: ErrorTrait, W: io::Write>(
    errors: &[T],
    file_path: &str,
    source: &str,
    mut out: W,
) -> io::Result<()> {
    for err in errors.iter() {
        let span = location_to_span(err.location(), source);
        build_report(&err.message(), &span, file_path, false)
            .write((file_path, Source::from(source)), &mut out)?;
    }
    Ok(())
}

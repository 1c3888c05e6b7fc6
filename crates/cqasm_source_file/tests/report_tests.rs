// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_ast::SourceLocation;
use cqasm_source_file::{write_compiler_errors, ErrorTrait};

struct TestError {
    message: &'static str,
    location: Option<SourceLocation>,
}

impl ErrorTrait for TestError {
    fn message(&self) -> String {
        self.message.to_string()
    }

    fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

#[test]
fn test_write_compiler_errors_includes_message() {
    let source = "version 3.0\nqubit[2] q\nX q[5]\n";
    let errors = vec![TestError {
        message: "index 5 out of range (size 2)",
        location: Some(SourceLocation::from_lines(3, 3, 3, 6)),
    }];
    let mut out = Vec::<u8>::new();
    write_compiler_errors(&errors, "prog.cq", source, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("index 5 out of range (size 2)"));
    assert!(text.contains("prog.cq"));
}

#[test]
fn test_write_compiler_errors_without_location() {
    let errors = vec![TestError {
        message: "failed to resolve variable 'b'",
        location: None,
    }];
    let mut out = Vec::<u8>::new();
    write_compiler_errors(&errors, "prog.cq", "version 3.0\n", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("failed to resolve variable 'b'"));
}

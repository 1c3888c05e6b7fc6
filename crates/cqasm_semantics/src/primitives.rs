// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Payload types of constant values.

use itertools::Itertools;
use std::fmt;

pub use num_complex::Complex64;

/// Dense row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Returns `None` if `data` does not hold exactly `rows * cols` elements.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Option<Matrix<T>> {
        (data.len() == rows * cols).then_some(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Zero-based element access.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .data
            .chunks(self.cols.max(1))
            .map(|row| row.iter().join(", "))
            .join("; ");
        write!(f, "[{rows}]")
    }
}

/// Language version, e.g. `3.0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version(Vec<i64>);

impl Version {
    pub fn new(items: Vec<i64>) -> Version {
        Version(items)
    }

    /// Parse a dotted version such as `"3.0"`.
    pub fn parse(text: &str) -> Option<Version> {
        text.split('.')
            .map(|item| item.trim().parse::<i64>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Version)
    }

    pub fn items(&self) -> &[i64] {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

#[test]
fn test_version_parse() {
    assert_eq!(Version::parse("3.0"), Some(Version::new(vec![3, 0])));
    assert_eq!(Version::parse("3.x"), None);
    assert_eq!(Version::new(vec![1, 2]).to_string(), "1.2");
}

#[test]
fn test_matrix_access() {
    let m = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(m.get(1, 0), Some(&3.0));
    assert_eq!(m.get(2, 0), None);
    assert!(Matrix::new(2, 2, vec![1.0]).is_none());
    assert_eq!(m.to_string(), "[1, 2; 3, 4]");
}

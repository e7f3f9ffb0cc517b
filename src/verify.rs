use serde::Serialize;

use crate::errors::P2pError;

/// First element that differs from what the kernel should have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub index: usize,
    pub expected: i32,
    pub actual: i32,
}

/// Outcome of checking one kernel's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyCheck {
    pub kernel: String,
    pub checked: usize,
    pub mismatches: usize,
    pub first_mismatch: Option<Mismatch>,
}

impl CopyCheck {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    pub fn into_result(self) -> Result<Self, P2pError> {
        match self.first_mismatch {
            Some(m) => Err(P2pError::VerificationFailed {
                kernel: self.kernel,
                mismatches: self.mismatches,
                index: m.index,
                expected: m.expected,
                actual: m.actual,
            }),
            None => Ok(self),
        }
    }
}

/// Compare `actual` against `expected` element by element.
///
/// A length difference counts every missing or extra element as a mismatch.
pub fn check_copy(kernel: &str, expected: &[i32], actual: &[i32]) -> CopyCheck {
    let mut mismatches = 0;
    let mut first_mismatch = None;

    for (index, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            mismatches += 1;
            first_mismatch.get_or_insert(Mismatch {
                index,
                expected: e,
                actual: a,
            });
        }
    }

    let common = expected.len().min(actual.len());
    if expected.len() != actual.len() {
        mismatches += expected.len().max(actual.len()) - common;
        first_mismatch.get_or_insert(Mismatch {
            index: common,
            expected: expected.get(common).copied().unwrap_or_default(),
            actual: actual.get(common).copied().unwrap_or_default(),
        });
    }

    CopyCheck {
        kernel: kernel.to_string(),
        checked: common,
        mismatches,
        first_mismatch,
    }
}

/// Like [`check_copy`] against a buffer where every element is `value`.
pub fn check_fill(kernel: &str, value: i32, actual: &[i32]) -> CopyCheck {
    let expected = vec![value; actual.len()];
    check_copy(kernel, &expected, actual)
}

use thiserror::Error;

use crate::models::SEMESTERS;

/// Reasons the form refuses an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("semester {semester} does not exist, expected 1 to {max}", max = SEMESTERS)]
    NoSuchSemester { semester: usize },
    #[error("Please enter all SGPA values. Missing semesters: {}", join(.missing))]
    Incomplete { missing: Vec<usize> },
    #[error("Please enter a valid SGPA (0-10). Out of range semesters: {}", join(.semesters))]
    OutOfRange { semesters: Vec<usize> },
}

fn join(semesters: &[usize]) -> String {
    semesters.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
}

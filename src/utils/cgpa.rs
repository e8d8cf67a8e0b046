use crate::models::SEMESTERS;

/// Total credit units, the divisor of the weighted average.
pub const TOTAL_CREDITS: f64 = 175.0;

// Computes the credit-weighted CGPA from the eight semester SGPAs.
pub fn compute(sgpas: &[f64; SEMESTERS]) -> f64 {
    let [s1, s2, s3, s4, s5, s6, s7, s8] = *sgpas;
    ((s1 + s2) * 20.0 + (s3 + s4 + s5 + s6) * 25.0 + s7 * 19.0 + s8 * 16.0) / TOTAL_CREDITS
}

// Formats a CGPA for display, always with two decimal places.
pub fn format_cgpa(cgpa: f64) -> String {
    format!("{:.2}", cgpa)
}

use std::sync::OnceLock;

use log::{debug, error};
use regex::Regex;

use crate::error::FormError;
use crate::models::{EntryStatus, SgpaSet, SEMESTERS};
use crate::utils::cgpa::compute;

fn number_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?)(Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("number prefix pattern is valid")
    })
}

// Reads the longest leading number out of user-typed text. Anything after it is ignored,
// so "8abc" reads as 8, while text that does not start with a number reads as nothing.
pub fn parse_sgpa(raw: &str) -> Option<f64> {
    let captures = number_prefix().captures(raw)?;
    let negative = captures.get(1).is_some_and(|m| m.as_str() == "-");
    let magnitude = match captures.get(2)?.as_str() {
        "Infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Owns the eight semester entries and the last computed CGPA.
#[derive(Debug, Default, Clone)]
pub struct FormController {
    sgpas: SgpaSet,
    cgpa: Option<f64>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sgpas(&self) -> &SgpaSet {
        &self.sgpas
    }

    /// Last successfully computed CGPA. Edits made afterwards do not clear it.
    pub fn cgpa(&self) -> Option<f64> {
        self.cgpa
    }

    // Applies a "text changed" event to one field (0-based index).
    pub fn set_entry(&mut self, index: usize, raw: &str) -> Result<(), FormError> {
        let entry = self
            .sgpas
            .get_mut(index)
            .ok_or_else(|| FormError::NoSuchSemester { semester: index.saturating_add(1) })?;

        entry.status = match parse_sgpa(raw) {
            Some(value) => EntryStatus::from_value(value),
            None => EntryStatus::Empty,
        };
        debug!("Semester {} set to {:?} from {:?}", entry.semester(), entry.status, raw);
        Ok(())
    }

    /// True when every field holds an in-range value.
    pub fn submit_enabled(&self) -> bool {
        self.sgpas.complete_values().is_some()
    }

    // Computes and stores the CGPA. Refuses, keeping the previous result, unless every field is filled and valid.
    pub fn compute_cgpa(&mut self) -> Result<f64, FormError> {
        let missing = self.sgpas.missing();
        if !missing.is_empty() {
            let err = FormError::Incomplete { missing };
            error!("{}", err);
            return Err(err);
        }

        let semesters = self.sgpas.out_of_range();
        if !semesters.is_empty() {
            let err = FormError::OutOfRange { semesters };
            error!("{}", err);
            return Err(err);
        }

        let values = self
            .sgpas
            .complete_values()
            .ok_or(FormError::Incomplete { missing: Vec::new() })?;
        let cgpa = compute(&values);
        debug!("CGPA computed: {:.4} from {:?}", cgpa, values);
        self.cgpa = Some(cgpa);
        Ok(cgpa)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("Form reset, {} semesters cleared", SEMESTERS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: [&str; SEMESTERS]) -> FormController {
        let mut form = FormController::new();
        for (i, v) in values.iter().enumerate() {
            form.set_entry(i, v).unwrap();
        }
        form
    }

    #[test]
    fn parses_like_a_lenient_float_reader() {
        assert_eq!(parse_sgpa("8"), Some(8.0));
        assert_eq!(parse_sgpa("  7.25 "), Some(7.25));
        assert_eq!(parse_sgpa("8abc"), Some(8.0));
        assert_eq!(parse_sgpa(".5"), Some(0.5));
        assert_eq!(parse_sgpa("9."), Some(9.0));
        assert_eq!(parse_sgpa("-0.5"), Some(-0.5));
        assert_eq!(parse_sgpa("+3"), Some(3.0));
        assert_eq!(parse_sgpa("1e1"), Some(10.0));
        assert_eq!(parse_sgpa("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_sgpa(""), None);
        assert_eq!(parse_sgpa("   "), None);
        assert_eq!(parse_sgpa("abc"), None);
        assert_eq!(parse_sgpa("."), None);
        assert_eq!(parse_sgpa("-"), None);
        // Only ASCII digits count; other scripts end the number.
        assert_eq!(parse_sgpa("8\u{0663}"), Some(8.0));
        assert_eq!(parse_sgpa("7.\u{0665}"), Some(7.0));
        assert_eq!(parse_sgpa("\u{0668}"), None);
    }

    #[test]
    fn valid_entry_is_stored() {
        let mut form = FormController::new();
        form.set_entry(2, "9.1").unwrap();
        assert_eq!(form.sgpas().entries()[2].status, EntryStatus::Valid(9.1));
    }

    #[test]
    fn unparseable_text_clears_only_that_field() {
        let mut form = filled(["8", "8", "8", "8", "8", "8", "8", "8"]);
        form.set_entry(4, "abc").unwrap();

        let entries = form.sgpas().entries();
        assert_eq!(entries[4].status, EntryStatus::Empty);
        assert!(entries[4].is_valid());
        for (i, entry) in entries.iter().enumerate().filter(|(i, _)| *i != 4) {
            assert_eq!(entry.status, EntryStatus::Valid(8.0), "semester {} changed", i + 1);
        }
        assert!(!form.submit_enabled());
    }

    #[test]
    fn out_of_range_value_blocks_submission() {
        for index in 0..SEMESTERS {
            let mut form = filled(["8", "8", "8", "8", "8", "8", "8", "8"]);
            assert!(form.submit_enabled());
            form.set_entry(index, "11").unwrap();
            assert!(!form.sgpas().entries()[index].is_valid());
            assert!(!form.submit_enabled());
        }
    }

    #[test]
    fn out_of_range_blocks_even_with_other_fields_empty() {
        let mut form = FormController::new();
        form.set_entry(0, "11").unwrap();
        assert!(!form.submit_enabled());
        assert_eq!(form.sgpas().out_of_range(), vec![1]);
    }

    #[test]
    fn unknown_semester_is_refused() {
        let mut form = FormController::new();
        assert_eq!(
            form.set_entry(SEMESTERS, "8"),
            Err(FormError::NoSuchSemester { semester: 9 })
        );
        assert_eq!(
            form.set_entry(usize::MAX, "8"),
            Err(FormError::NoSuchSemester { semester: usize::MAX })
        );
        assert_eq!(form.sgpas(), &SgpaSet::default());
    }

    #[test]
    fn compute_refuses_incomplete_form() {
        let mut form = FormController::new();
        form.set_entry(0, "8").unwrap();
        let err = form.compute_cgpa().unwrap_err();
        assert_eq!(err, FormError::Incomplete { missing: vec![2, 3, 4, 5, 6, 7, 8] });
        assert_eq!(form.cgpa(), None);
    }

    #[test]
    fn compute_refuses_out_of_range_values() {
        let mut form = filled(["8", "8", "8", "12", "8", "8", "-1", "8"]);
        let err = form.compute_cgpa().unwrap_err();
        assert_eq!(err, FormError::OutOfRange { semesters: vec![4, 7] });
        assert_eq!(form.cgpa(), None);
    }

    #[test]
    fn compute_stores_weighted_average() {
        let mut form = filled(["7.5", "8", "9", "6.5", "7", "8.5", "9", "6"]);
        let cgpa = form.compute_cgpa().unwrap();
        assert!((cgpa - 1352.0 / 175.0).abs() < 1e-12);
        assert_eq!(form.cgpa(), Some(cgpa));
    }

    #[test]
    fn stale_result_survives_edits_and_refusals() {
        let mut form = filled(["10", "10", "10", "10", "10", "10", "10", "10"]);
        assert_eq!(form.compute_cgpa(), Ok(10.0));

        form.set_entry(0, "").unwrap();
        assert_eq!(form.cgpa(), Some(10.0));
        assert!(form.compute_cgpa().is_err());
        assert_eq!(form.cgpa(), Some(10.0));

        form.set_entry(0, "0").unwrap();
        form.compute_cgpa().unwrap();
        assert!(form.cgpa().unwrap() < 10.0);
    }

    #[test]
    fn reset_clears_entries_and_result() {
        let mut form = filled(["8", "8", "8", "8", "8", "8", "8", "8"]);
        form.compute_cgpa().unwrap();
        form.reset();
        assert_eq!(form.cgpa(), None);
        assert_eq!(form.sgpas(), &SgpaSet::default());
    }
}

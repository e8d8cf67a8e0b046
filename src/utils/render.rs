use anyhow::{Context, Result};
use serde_json::to_string_pretty;

use crate::models::{EntryStatus, FieldView, FormView, SemesterEntry};
use crate::utils::cgpa::format_cgpa;
use crate::utils::form::FormController;

pub const RANGE_WARNING: &str = "Please enter a valid SGPA (0-10).";
const EMPTY_FIELD: &str = "-";

// Echoes a parsed value back the way it would appear in the field: "8", "7.5", "1e+21", "Infinity".
pub fn display_value(value: f64) -> String {
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        exponent_form(value)
    } else {
        value.to_string()
    }
}

// Shortest digits in exponent notation, with an explicit sign on the exponent.
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

fn field_view(entry: &SemesterEntry) -> FieldView {
    FieldView {
        semester: entry.semester(),
        label: format!("Semester {} SGPA", entry.semester()),
        text: entry.value().map(display_value).unwrap_or_default(),
        valid: entry.is_valid(),
        warning: match entry.status {
            EntryStatus::Invalid(_) => Some(RANGE_WARNING.to_string()),
            _ => None,
        },
    }
}

// Builds the snapshot the terminal front end draws from.
pub fn form_view(form: &FormController) -> FormView {
    FormView {
        fields: form.sgpas().entries().iter().map(field_view).collect(),
        submit_enabled: form.submit_enabled(),
        cgpa: form.cgpa().map(format_cgpa),
    }
}

pub fn result_line(cgpa: &str) -> String {
    format!("Your CGPA is: {}", cgpa)
}

// Renders the form as plain text, one line per semester plus any warnings.
pub fn render_text(view: &FormView) -> String {
    let mut out = String::from("CGPA Calculator\n\n");
    for field in &view.fields {
        let text = if field.text.is_empty() { EMPTY_FIELD } else { field.text.as_str() };
        out.push_str(&format!("  {:<18} {}\n", format!("{}:", field.label), text));
        if let Some(warning) = &field.warning {
            out.push_str(&format!("      ! {}\n", warning));
        }
    }

    let button = if view.submit_enabled { "[ Calculate CGPA ]" } else { "[ Calculate CGPA ] (disabled)" };
    out.push_str(&format!("\n  {}\n", button));

    if let Some(cgpa) = &view.cgpa {
        out.push_str(&format!("\n  {}\n", result_line(cgpa)));
    }
    out
}

pub fn render_json(view: &FormView) -> Result<String> {
    to_string_pretty(view).context("Failed to serialize form view")
}

use serde::Serialize;

/// Number of semesters collected by the form.
pub const SEMESTERS: usize = 8;

/// Inclusive bounds of a valid SGPA.
pub const SGPA_MIN: f64 = 0.0;
pub const SGPA_MAX: f64 = 10.0;

/// State of a single semester field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EntryStatus {
    /// Nothing usable typed yet (or the text did not parse).
    #[default]
    Empty,
    /// Parsed, but outside [0, 10].
    Invalid(f64),
    Valid(f64),
}

impl EntryStatus {
    pub fn from_value(value: f64) -> Self {
        if (SGPA_MIN..=SGPA_MAX).contains(&value) {
            EntryStatus::Valid(value)
        } else {
            EntryStatus::Invalid(value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemesterEntry {
    pub index: usize,
    pub status: EntryStatus,
}

impl SemesterEntry {
    pub fn new(index: usize) -> Self {
        Self { index, status: EntryStatus::Empty }
    }

    pub fn value(&self) -> Option<f64> {
        match self.status {
            EntryStatus::Empty => None,
            EntryStatus::Invalid(v) | EntryStatus::Valid(v) => Some(v),
        }
    }

    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }

    // Empty fields are not flagged, only out-of-range ones.
    pub fn is_valid(&self) -> bool {
        !matches!(self.status, EntryStatus::Invalid(_))
    }

    /// Semester number as shown to the user (1-based).
    pub fn semester(&self) -> usize {
        self.index + 1
    }
}

/// The eight semester entries, in semester order.
#[derive(Debug, Clone, PartialEq)]
pub struct SgpaSet {
    entries: [SemesterEntry; SEMESTERS],
}

impl Default for SgpaSet {
    fn default() -> Self {
        Self { entries: std::array::from_fn(SemesterEntry::new) }
    }
}

impl SgpaSet {
    pub fn entries(&self) -> &[SemesterEntry; SEMESTERS] {
        &self.entries
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SemesterEntry> {
        self.entries.get_mut(index)
    }

    /// All eight values, only when every entry is present and in range.
    pub fn complete_values(&self) -> Option<[f64; SEMESTERS]> {
        let mut values = [0.0; SEMESTERS];
        for (slot, entry) in values.iter_mut().zip(self.entries.iter()) {
            match entry.status {
                EntryStatus::Valid(v) => *slot = v,
                _ => return None,
            }
        }
        Some(values)
    }

    pub fn missing(&self) -> Vec<usize> {
        self.entries.iter().filter(|e| !e.is_present()).map(SemesterEntry::semester).collect()
    }

    pub fn out_of_range(&self) -> Vec<usize> {
        self.entries.iter().filter(|e| !e.is_valid()).map(SemesterEntry::semester).collect()
    }
}

/// What the presentation layer needs to draw one field.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldView {
    pub semester: usize,
    pub label: String,
    pub text: String,
    pub valid: bool,
    pub warning: Option<String>,
}

/// Snapshot of the whole form for rendering.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit_enabled: bool,
    pub cgpa: Option<String>,
}

use log::warn;
use simplelog::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: LevelFilter,
    pub output: OutputFormat,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            output: OutputFormat::Text,
            prompt: "> ".into(),
        }
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn parse_output(raw: &str) -> Option<OutputFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

/// Builds settings from a variable lookup, keeping defaults for anything missing or malformed.
/// Returns the settings along with one message per rejected value, so they can be logged
/// once the logger exists.
pub fn settings_from<F>(lookup: F) -> (Settings, Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    let mut rejected = Vec::new();

    if let Some(v) = lookup("CGPA_LOG_LEVEL") {
        match parse_level(&v) {
            Some(level) => settings.log_level = level,
            None => rejected.push(format!("Ignoring CGPA_LOG_LEVEL={:?}, using {}", v, settings.log_level)),
        }
    }
    if let Some(v) = lookup("CGPA_OUTPUT") {
        match parse_output(&v) {
            Some(output) => settings.output = output,
            None => rejected.push(format!("Ignoring CGPA_OUTPUT={:?}, expected text or json", v)),
        }
    }
    if let Some(v) = lookup("CGPA_PROMPT") {
        settings.prompt = v;
    }

    (settings, rejected)
}

// Reads settings from the process environment. Call after `dotenv()` so `.env` values are visible.
pub fn load_settings() -> (Settings, Vec<String>) {
    settings_from(|key| std::env::var(key).ok())
}

pub fn report_rejected(rejected: &[String]) {
    for message in rejected {
        warn!("{}", message);
    }
}

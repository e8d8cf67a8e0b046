use std::sync::OnceLock;

use regex::Regex;

/// One line typed at the prompt, turned into a form event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Text typed into a field. `semester` is 1-based as the user sees it.
    Set { semester: usize, text: String },
    Calculate,
    Show,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  <n> <sgpa>   set semester n (1-8), e.g. `3 8.25`; `3 =` or `3` alone clears it
  calc         calculate the CGPA
  show         print the form again
  reset        clear every semester
  help         show this message
  quit         leave";

fn set_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([0-9]+)\s*(?:=\s*|\s+|$)(.*)$").expect("set command pattern is valid")
    })
}

pub fn parse_command(line: &str) -> Command {
    if let Some(captures) = set_pattern().captures(line) {
        // Too many digits for usize still names a semester, just one that does not exist.
        let semester = captures[1].parse::<usize>().unwrap_or(usize::MAX);
        return Command::Set { semester, text: captures[2].trim().to_string() };
    }

    match line.trim().to_ascii_lowercase().as_str() {
        "calc" | "calculate" | "c" => Command::Calculate,
        "show" | "s" | "" => Command::Show,
        "reset" => Command::Reset,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

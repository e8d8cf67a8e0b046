mod config;
mod error;
mod models;
mod utils;
use anyhow::Context;
use dotenv::dotenv;
use log::{debug, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::io::{stdin, stdout, BufReader};
use crate::config::{load_settings, report_rejected};
use crate::utils::cgpa::format_cgpa;
use crate::utils::session::run_session;

// Entry point; a single-threaded runtime is enough for one interactive form.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let (settings, rejected) = load_settings();

    // Mixed mode: errors and warnings go to stderr, info and below share stdout with the form.
    TermLogger::init(
        settings.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto
    ).context("Failed to initialize the logger")?;
    report_rejected(&rejected);

    debug!("CGPA form session started");

    let mut out = stdout();
    match run_session(&settings, BufReader::new(stdin()), &mut out).await {
        Ok(Some(cgpa)) => debug!("Session ended with CGPA {}", format_cgpa(cgpa)),
        Ok(None) => debug!("Session ended without a computed CGPA"),
        Err(e) => {
            error!("Session failed: {:#}", e);
            return Err(e);
        }
    }

    Ok(())
}

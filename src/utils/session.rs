use anyhow::{Context, Result};
use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{OutputFormat, Settings};
use crate::error::FormError;
use crate::utils::cgpa::format_cgpa;
use crate::utils::commands::{parse_command, Command, HELP};
use crate::utils::form::FormController;
use crate::utils::render::{form_view, render_json, render_text, result_line};

async fn write_view<W>(form: &FormController, settings: &Settings, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let view = form_view(form);
    let rendered = match settings.output {
        OutputFormat::Text => render_text(&view),
        OutputFormat::Json => render_json(&view)? + "\n",
    };
    out.write_all(rendered.as_bytes()).await.context("Failed to write form")?;
    Ok(())
}

async fn write_line<W>(out: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("{}\n", line).as_bytes()).await.context("Failed to write output")
}

/// Drives one form session: reads commands line by line until `quit` or end of input.
/// The form is rendered after every change. Returns the last computed CGPA, if any.
pub async fn run_session<R, W>(settings: &Settings, input: R, out: &mut W) -> Result<Option<f64>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut form = FormController::new();
    let mut lines = input.lines();

    write_view(&form, settings, out).await?;
    write_line(out, "Type `help` for commands.").await?;

    loop {
        out.write_all(settings.prompt.as_bytes()).await.context("Failed to write prompt")?;
        out.flush().await.context("Failed to flush output")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            debug!("End of input, closing session");
            break;
        };

        match parse_command(&line) {
            Command::Set { semester, text } => {
                // The terminal has no fixed fields, so a bad semester number is reported, not fatal.
                let applied = match semester.checked_sub(1) {
                    Some(index) => form.set_entry(index, &text),
                    None => Err(FormError::NoSuchSemester { semester }),
                };
                match applied {
                    Ok(()) => write_view(&form, settings, out).await?,
                    Err(e) => {
                        warn!("{}", e);
                        write_line(out, &e.to_string()).await?;
                    }
                }
            }
            Command::Calculate => match form.compute_cgpa() {
                Ok(cgpa) => {
                    if settings.output == OutputFormat::Json {
                        write_view(&form, settings, out).await?;
                    } else {
                        write_line(out, &result_line(&format_cgpa(cgpa))).await?;
                    }
                }
                // Already logged by the controller; echo it since the button cannot be greyed out here.
                Err(e) => write_line(out, &e.to_string()).await?,
            },
            Command::Show => write_view(&form, settings, out).await?,
            Command::Reset => {
                form.reset();
                write_view(&form, settings, out).await?;
            }
            Command::Help => write_line(out, HELP).await?,
            Command::Quit => break,
            Command::Unknown(input) => {
                write_line(out, &format!("Unknown command {:?}. Type `help` for commands.", input)).await?
            }
        }
    }

    out.flush().await.context("Failed to flush output")?;
    Ok(form.cgpa())
}

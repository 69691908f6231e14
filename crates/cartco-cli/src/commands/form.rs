//! Interactive form command
//!
//! The form stays on screen between attempts: each round prompts for the
//! three fields (Enter keeps the current value), submits, and shows the
//! outcome. `q` at any prompt, or end of input, quits.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use cartco_core::form::{YEAR_HINT_MAX, YEAR_HINT_MIN};
use cartco_core::render::{render_form, render_state};
use cartco_core::{EstimationBackend, FormController, RenderOptions};
use tracing::warn;

/// Run the interactive form on stdin/stdout
pub async fn cmd_form<B: EstimationBackend>(backend: B, opts: &RenderOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_form(
        FormController::new(backend),
        &mut stdin.lock(),
        &mut stdout.lock(),
        opts,
    )
    .await?;
    Ok(())
}

/// Drive the form loop over any line source, returning the final controller
pub async fn run_form<B, R, W>(
    mut form: FormController<B>,
    input: &mut R,
    out: &mut W,
    opts: &RenderOptions,
) -> Result<FormController<B>>
where
    B: EstimationBackend,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", render_form(form.make(), form.model(), form.year(), opts))?;
    writeln!(out, "   Enter keeps the current value, q quits.")?;

    loop {
        writeln!(out)?;

        let Some(make) = prompt_field(input, out, "Make", form.make(), None)? else {
            break;
        };
        form.set_make(make);

        let Some(model) = prompt_field(input, out, "Model", form.model(), None)? else {
            break;
        };
        form.set_model(model);

        let hint = format!("{}-{}", YEAR_HINT_MIN, YEAR_HINT_MAX);
        let Some(year) = prompt_field(input, out, "Year", form.year(), Some(&hint))? else {
            break;
        };
        form.set_year(year);

        writeln!(out)?;
        form.submit_observed(|state| {
            if let Err(e) = write!(out, "{}", render_state(state, opts)).and_then(|_| out.flush())
            {
                warn!("Failed to show loading indicator: {}", e);
            }
        })
        .await;

        write!(out, "{}", render_state(form.state(), opts))?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(form)
}

/// Read one field; `None` on end of input or `q`
fn prompt_field<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    current: &str,
    hint: Option<&str>,
) -> Result<Option<String>> {
    match (current.is_empty(), hint) {
        (true, Some(hint)) => write!(out, "   {} ({}): ", label, hint)?,
        (true, None) => write!(out, "   {}: ", label)?,
        (false, _) => write!(out, "   {} [{}]: ", label, current)?,
    }
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim() == "q" {
        return Ok(None);
    }

    if line.is_empty() {
        Ok(Some(current.to_string()))
    } else {
        Ok(Some(line.to_string()))
    }
}

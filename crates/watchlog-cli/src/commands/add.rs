use super::list::{session_from_config, show_listing};
use super::prompts;
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;
use watchlog_config::Config;
use watchlog_core::{EntrySession, SubmissionOutcome, SubmitAction};
use watchlog_models::{to_stars, FormField, RATING_CHOICES};

/// Entries of the rating selector: every half step, then "no rating"
fn rating_items() -> Vec<String> {
    RATING_CHOICES
        .iter()
        .map(|value| format!("{:<6} {}", to_stars(*value), value))
        .chain(std::iter::once("No rating".to_string()))
        .collect()
}

/// Raw form value for a rating selector index
fn rating_value(index: usize) -> String {
    RATING_CHOICES.get(index).map(|v| v.to_string()).unwrap_or_default()
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Title input with the suggestion list underneath
async fn title_step(session: &mut EntrySession, output: &Output) -> Result<()> {
    let current = session.form().title().to_string();
    let typed = prompts::prompt_string("Title", (!current.is_empty()).then_some(current.as_str()))?;
    if typed == current && session.form().provenance().is_some() {
        return Ok(());
    }

    session.input_changed(&typed);
    let spinner = output.spinner("Looking up suggestions...");
    let view = session.settled().await;
    spinner.finish_and_clear();

    if let Some(status) = &view.status {
        output.warn(status);
    }
    if !view.visible {
        session.dismiss();
        return Ok(());
    }

    let mut items: Vec<String> = view.suggestions.iter().map(|s| s.label()).collect();
    items.push(format!("Keep \"{}\" as typed", typed.trim()));

    match prompts::prompt_select("Pick a match", &items, 0)? {
        Some(index) if index < view.suggestions.len() => {
            if let Some(chosen) = session.select(index) {
                debug!(operation = "add", id = %chosen.id, "Catalog match picked");
            }
        }
        _ => session.dismiss(),
    }
    Ok(())
}

fn rating_step(session: &mut EntrySession) -> Result<()> {
    let items = rating_items();
    let default = RATING_CHOICES
        .iter()
        .position(|v| v.to_string() == session.form().rating)
        .unwrap_or(RATING_CHOICES.len());
    if let Some(index) = prompts::prompt_select("Rating", &items, default)? {
        session.form_mut().rating = rating_value(index);
    }
    Ok(())
}

fn date_step(session: &mut EntrySession) -> Result<()> {
    let current = session.form().watched_date.clone();
    let default = if current.is_empty() { today() } else { current };
    session.form_mut().watched_date = prompts::prompt_string("Watched on (YYYY-MM-DD)", Some(&default))?;
    Ok(())
}

fn rewatch_step(session: &mut EntrySession) -> Result<()> {
    let current = session.form().rewatch;
    session.form_mut().rewatch = prompts::prompt_yes_no("Rewatch?", current)?;
    Ok(())
}

fn print_saved(outcome: &SubmissionOutcome, output: &Output) {
    if let SubmissionOutcome::Saved { movie, listing, .. } = outcome {
        if output.is_human() {
            show_listing(listing, output);
        } else {
            output.json(&json!({ "saved": movie }));
        }
    }
}

/// Interactive form: title with suggestions, rating, date, rewatch, then Save or Reset
pub async fn run_add_interactive(config: &Config, output: &Output) -> Result<()> {
    let mut session = session_from_config(config);
    let mut start = FormField::Title;

    loop {
        let steps = [FormField::Title, FormField::Rating, FormField::WatchedDate, FormField::Rewatch];
        let from = steps.iter().position(|f| *f == start).unwrap_or(0);
        for field in &steps[from..] {
            match field {
                FormField::Title => title_step(&mut session, output).await?,
                FormField::Rating => rating_step(&mut session)?,
                FormField::WatchedDate => date_step(&mut session)?,
                _ => rewatch_step(&mut session)?,
            }
        }

        let actions = ["Save".to_string(), "Reset".to_string()];
        let action = match prompts::prompt_select("Submit", &actions, 0)? {
            Some(0) => SubmitAction::Save,
            Some(_) => SubmitAction::Reset,
            None => return Ok(()),
        };

        let spinner = output.spinner("Saving...");
        let outcome = session.submit(action).await;
        spinner.finish_and_clear();

        if let Some(notice) = session.flash() {
            output.notice(notice);
        }

        start = match &outcome {
            SubmissionOutcome::Reset => FormField::Title,
            SubmissionOutcome::Invalid(err) => {
                output.error(format!("{}: {}", err.field.to_string().bold(), err.message));
                err.field
            }
            SubmissionOutcome::Saved { .. } => {
                print_saved(&outcome, output);
                if !prompts::prompt_yes_no("Log another movie?", false)? {
                    return Ok(());
                }
                FormField::Title
            }
            SubmissionOutcome::Failed { .. } | SubmissionOutcome::Busy => {
                if !prompts::prompt_yes_no("Try again?", true)? {
                    return Ok(());
                }
                // Form is untouched; go straight back to the rewatch toggle and submit
                FormField::Rewatch
            }
        };
    }
}

/// Non-interactive add from flags. Untouched by suggestions; the fallback
/// lookup still links a catalog match when there is one.
pub async fn run_add_direct(
    config: &Config,
    title: String,
    rating: Option<String>,
    date: Option<String>,
    rewatch: bool,
    output: &Output,
) -> Result<()> {
    let mut session = session_from_config(config);
    let form = session.form_mut();
    form.set_title(title);
    form.rating = rating.unwrap_or_default();
    form.watched_date = date.unwrap_or_else(today);
    form.rewatch = rewatch;

    let spinner = output.spinner("Saving...");
    let outcome = session.submit(SubmitAction::Save).await;
    spinner.finish_and_clear();

    match &outcome {
        SubmissionOutcome::Saved { .. } => {
            if let Some(notice) = session.flash() {
                output.notice(notice);
            }
            print_saved(&outcome, output);
            Ok(())
        }
        SubmissionOutcome::Invalid(err) => Err(color_eyre::eyre::eyre!("{}: {}", err.field, err.message)),
        SubmissionOutcome::Failed { error, .. } => Err(color_eyre::eyre::eyre!("{}", error)),
        SubmissionOutcome::Busy | SubmissionOutcome::Reset => Ok(()),
    }
}

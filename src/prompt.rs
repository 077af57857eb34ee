use anyhow::{anyhow, Result};
use inquire::{Confirm, InquireError, Text};

use crate::{scaffold::ProjectOptions, steps::Step};

/// Name used when none is given and prompts are skipped.
pub const DEFAULT_PROJECT_NAME: &str = "comet-app";

/// The result of asking the user something. Aborting a prompt is not an
/// error, so it gets its own variant that every call site must handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Cancelled,
    Confirmed(T),
}

impl<T> Answer<T> {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Answer::Cancelled)
    }
}

/// Blocking interactive questions.
pub trait Prompter {
    /// Asks for free text, pre-filled with `default`.
    fn text(&mut self, message: &str, default: &str) -> Result<Answer<String>>;

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<Answer<bool>>;
}

/// [`Prompter`] backed by the terminal.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl InquirePrompter {
    fn settle<T>(res: Result<T, InquireError>) -> Result<Answer<T>> {
        match res {
            Ok(value) => Ok(Answer::Confirmed(value)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Answer::Cancelled)
            }
            Err(InquireError::NotTTY) => Err(anyhow!(
                "No interactive terminal available. Pass --yes to accept every default"
            )),
            Err(e) => Err(anyhow!("Prompt failed: {e}")),
        }
    }
}

impl Prompter for InquirePrompter {
    fn text(&mut self, message: &str, default: &str) -> Result<Answer<String>> {
        Self::settle(Text::new(message).with_default(default).prompt())
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Answer<bool>> {
        Self::settle(Confirm::new(message).with_default(default).prompt())
    }
}

/// Picks the project name: the one given on the command line, the default
/// when prompts are skipped, or whatever the user types.
///
/// # Errors
///
/// Returns an [`Err`] if the prompt itself fails.
pub fn resolve_project_name(
    project_directory: Option<&str>,
    options: &ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<Answer<String>> {
    if let Some(dir) = project_directory.filter(|d| !d.is_empty()) {
        return Ok(Answer::Confirmed(dir.to_string()));
    }

    if options.yes {
        return Ok(Answer::Confirmed(DEFAULT_PROJECT_NAME.to_string()));
    }

    let answer = prompter.text("What is the path to your new project?", DEFAULT_PROJECT_NAME)?;

    Ok(match answer {
        Answer::Confirmed(name) if !name.trim().is_empty() => {
            Answer::Confirmed(name.trim().to_string())
        }
        _ => Answer::Cancelled,
    })
}

/// Asks whether a non-empty directory may be wiped. Skipping prompts means
/// yes; declining is reported as a cancellation.
///
/// # Errors
///
/// Returns an [`Err`] if the prompt itself fails.
pub fn confirm_overwrite(
    project_name: &str,
    options: &ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<Answer<()>> {
    if options.yes {
        return Ok(Answer::Confirmed(()));
    }

    let message = format!("Directory \"{project_name}\" is not empty. Overwrite it?");

    Ok(match prompter.confirm(&message, false)? {
        Answer::Confirmed(true) => Answer::Confirmed(()),
        _ => Answer::Cancelled,
    })
}

/// Whether an optional step should run. A cancelled question means "no".
///
/// # Errors
///
/// Returns an [`Err`] if the prompt itself fails.
pub fn confirm_step(
    step: Step,
    options: &ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<bool> {
    if options.yes {
        return Ok(true);
    }

    Ok(matches!(
        prompter.confirm(step.question(), true)?,
        Answer::Confirmed(true)
    ))
}

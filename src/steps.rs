use anyhow::{anyhow, bail, Context, Result};
use std::{path::Path, process::Command};

use crate::{cause, error, indicator::Indicator, trace, warn};

/// The optional steps run inside a freshly scaffolded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Git,
    Install,
}

impl Step {
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Step::Git => "git",
            Step::Install => "bun",
        }
    }

    #[must_use]
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Step::Git => &["init"],
            Step::Install => &["install"],
        }
    }

    #[must_use]
    pub fn question(self) -> &'static str {
        match self {
            Step::Git => "Initialize a git repository?",
            Step::Install => "Install dependencies?",
        }
    }

    fn running(self) -> &'static str {
        match self {
            Step::Git => "Initializing git repository...",
            Step::Install => "Installing dependencies with bun...",
        }
    }

    fn succeeded(self) -> &'static str {
        match self {
            Step::Git => "Git repository initialized.",
            Step::Install => "Dependencies installed.",
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Step::Git => "Failed to initialize git. Is git installed?",
            Step::Install => "Failed to install dependencies.",
        }
    }

    fn error_message(self) -> &'static str {
        match self {
            Step::Git => "Could not initialize git repository.",
            Step::Install => "Dependency installation failed.",
        }
    }

    /// What the user can do by hand when the step fails.
    #[must_use]
    pub fn recovery_hint(self) -> Option<&'static str> {
        match self {
            Step::Git => None,
            Step::Install => Some("You can try running 'bun install' manually."),
        }
    }
}

/// Runs an external program to completion.
pub trait CommandRunner {
    /// # Errors
    ///
    /// Returns an [`Err`] if the program can not be started or exits
    /// unsuccessfully.
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// [`CommandRunner`] that spawns real processes, capturing their output.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        trace!("Running `{program} {}` in {}", args.join(" "), cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to run `{program}`"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();

            if stderr.is_empty() {
                bail!("`{program} {}` failed with {}", args.join(" "), output.status);
            }

            return Err(anyhow!("{stderr}").context(format!(
                "`{program} {}` failed with {}",
                args.join(" "),
                output.status
            )));
        }

        Ok(())
    }
}

/// Runs `step` in `project_path` behind a spinner. Failures are reported
/// and turned into `false`; they never propagate.
pub fn run_step(step: Step, project_path: &Path, runner: &mut dyn CommandRunner) -> bool {
    let indicator = Indicator::start(step.running());

    match runner.run(step.program(), step.args(), project_path) {
        Ok(()) => {
            indicator.succeed(step.succeeded());
            true
        }
        Err(e) => {
            indicator.fail(step.failed());
            error!(step.error_message());
            cause!(e);
            if let Some(hint) = step.recovery_hint() {
                warn!(hint);
            }
            false
        }
    }
}

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::{
    cause,
    config::CometDirs,
    directory::prepare_directory,
    error,
    prompt::{confirm_step, resolve_project_name, Answer, Prompter},
    steps::{run_step, CommandRunner, Step},
    template::Template,
    trace, warn,
};

/// Exit status when the user backs out of a prompt.
pub const CANCELLED_EXIT: u8 = 130;

/// Settings fixed for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Accept every default instead of asking.
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Default,
}

/// Summary of a created project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResult {
    project_name: String,
    git_initialized: bool,
    dependencies_installed: bool,
    template: TemplateKind,
}

impl ProjectResult {
    #[must_use]
    pub fn new(project_name: String, git_initialized: bool, dependencies_installed: bool) -> Self {
        ProjectResult {
            project_name,
            git_initialized,
            dependencies_installed,
            template: TemplateKind::Default,
        }
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn git_initialized(&self) -> bool {
        self.git_initialized
    }

    #[must_use]
    pub fn dependencies_installed(&self) -> bool {
        self.dependencies_installed
    }

    #[must_use]
    pub fn template(&self) -> TemplateKind {
        self.template
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(ProjectResult),
    /// The user backed out. Nothing went wrong.
    Cancelled,
    /// Scaffolding failed; the error has already been reported.
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Created(_) => 0,
            Outcome::Cancelled => CANCELLED_EXIT,
            Outcome::Failed => 1,
        }
    }
}

pub struct Scaffold<'a> {
    dirs: &'a CometDirs,
    options: ProjectOptions,
    prompter: &'a mut dyn Prompter,
    runner: &'a mut dyn CommandRunner,
}

impl<'a> Scaffold<'a> {
    #[must_use]
    pub fn new(
        dirs: &'a CometDirs,
        options: ProjectOptions,
        prompter: &'a mut dyn Prompter,
        runner: &'a mut dyn CommandRunner,
    ) -> Self {
        Scaffold {
            dirs,
            options,
            prompter,
            runner,
        }
    }

    /// Runs the whole pipeline: name, directory, template, git, install.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] only if asking the user for the project name
    /// fails. Scaffolding errors are reported here
    /// and yield [`Outcome::Failed`].
    pub fn create_project(&mut self, project_directory: Option<&str>) -> Result<Outcome> {
        let project_name =
            match resolve_project_name(project_directory, &self.options, &mut *self.prompter)? {
                Answer::Cancelled => return Ok(Outcome::Cancelled),
                Answer::Confirmed(name) => name,
            };

        let project_path = self.dirs.resolve_project_path(&project_name);
        trace!("Creating {project_name} at {}", project_path.display());

        match prepare_directory(
            &project_path,
            &project_name,
            &self.options,
            &mut *self.prompter,
        ) {
            Ok(Answer::Confirmed(())) => {}
            Ok(Answer::Cancelled) => return Ok(Outcome::Cancelled),
            Err(e) => {
                error!("Could not prepare project directory.");
                cause!(e);
                return Ok(Outcome::Failed);
            }
        }

        if let Err(e) = Template::open(self.dirs.template_dir())
            .and_then(|template| template.copy_to(&project_path, &project_name))
        {
            error!("Could not create project from template.");
            cause!(e);
            return Ok(Outcome::Failed);
        }

        let git_initialized = self.optional_step(Step::Git, &project_path);
        let dependencies_installed = self.optional_step(Step::Install, &project_path);

        Ok(Outcome::Created(ProjectResult::new(
            project_name,
            git_initialized,
            dependencies_installed,
        )))
    }

    /// Optional steps never abort the run: a failed confirmation is reported
    /// and the step is skipped.
    fn optional_step(&mut self, step: Step, project_path: &Path) -> bool {
        match confirm_step(step, &self.options, &mut *self.prompter) {
            Ok(true) => run_step(step, project_path, &mut *self.runner),
            Ok(false) => false,
            Err(e) => {
                warn!("Skipping: {}", step.question());
                cause!(e);
                false
            }
        }
    }
}

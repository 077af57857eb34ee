use anyhow::Result;
use clap::Parser;
use create_comet::{
    args::Args,
    config::CometDirs,
    display, error,
    prompt::InquirePrompter,
    steps::SystemRunner,
    trace, warn, Outcome, Scaffold,
};
use std::process::ExitCode;

fn app(args: &Args) -> Result<Outcome> {
    if !args.no_banner {
        display::banner();
    }

    let dirs = CometDirs::default_paths(args.template_dir.as_deref())?;

    trace!("Working directory: {}", dirs.cwd().display());
    trace!("Template: {}", dirs.template_dir().display());

    let mut prompter = InquirePrompter;
    let mut runner = SystemRunner;

    Scaffold::new(&dirs, args.options(), &mut prompter, &mut runner)
        .create_project(args.project_directory.as_deref())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(outcome) => {
            match &outcome {
                Outcome::Created(result) => {
                    if let Ok(json) = serde_json::to_string(result) {
                        trace!("Result: {json}");
                    }
                    display::next_steps(result);
                }
                Outcome::Cancelled => warn!("Operation cancelled."),
                Outcome::Failed => {}
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

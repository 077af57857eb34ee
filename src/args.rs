use clap::Parser;
use std::path::PathBuf;

use crate::scaffold::ProjectOptions;

/// Create a modern Next.js application
#[derive(Parser, Debug)]
#[clap(name = "create-comet", version)]
pub struct Args {
    /// Directory to create the project in
    #[clap(value_name = "PROJECT_DIRECTORY")]
    pub project_directory: Option<String>,

    /// Skip all confirmation prompts
    #[clap(short, long)]
    pub yes: bool,

    /// Use this template directory instead of the bundled one
    #[clap(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Do not print the banner
    #[clap(long)]
    pub no_banner: bool,
}

impl Args {
    #[must_use]
    pub fn options(&self) -> ProjectOptions {
        ProjectOptions { yes: self.yes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_prompting() {
        let args = Args::try_parse_from(["create-comet"]).unwrap();

        assert_eq!(args.project_directory, None);
        assert_eq!(args.options(), ProjectOptions { yes: false });
    }

    #[test]
    fn parses_directory_and_yes() {
        let args = Args::try_parse_from(["create-comet", "demo", "-y"]).unwrap();
        assert_eq!(args.project_directory.as_deref(), Some("demo"));
        assert!(args.options().yes);

        let args = Args::try_parse_from(["create-comet", "--yes"]).unwrap();
        assert!(args.yes);
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Args::try_parse_from(["create-comet", "a", "b"]).is_err());
    }
}

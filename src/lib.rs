pub mod args;
pub mod config;
pub mod directory;
pub mod display;
pub mod indicator;
pub mod log;
pub mod prompt;
pub mod scaffold;
pub mod steps;
pub mod template;

pub use scaffold::{Outcome, ProjectOptions, ProjectResult, Scaffold};

use lazy_format::lazy_format;
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::{scaffold::ProjectResult, success};

const WORDMARK: &str = r"
  ___ ___  _ __ ___   ___| |_
 / __/ _ \| '_ ` _ \ / _ \ __|
| (_| (_) | | | | | |  __/ |_
 \___\___/|_| |_| |_|\___|\__|";

pub fn banner() {
    println!(
        "{}",
        WORDMARK.if_supports_color(Stdout, |s| s.bright_yellow())
    );
}

/// The shell commands to run next, in order.
#[must_use]
pub fn next_commands(result: &ProjectResult) -> Vec<String> {
    let mut commands = vec![format!("cd {}", result.project_name())];

    if !result.dependencies_installed() {
        commands.push("bun install".to_string());
    }

    commands.push("bun dev".to_string());
    commands
}

pub fn next_steps(result: &ProjectResult) {
    success!("\n✓ Project created successfully!");

    println!("\nNext steps:");
    for command in next_commands(result) {
        println!("{}", lazy_format!("  {command}").if_supports_color(Stdout, |s| s.cyan()));
    }

    println!("\nMake sure to:");
    for (i, (what, place)) in [
        ("Update your database connection string in", ".env.local"),
        ("Start building your API in", "src/app/api"),
        ("Create your database models in", "src/models"),
    ]
    .iter()
    .enumerate()
    {
        println!(
            "  {} {}",
            lazy_format!("{}. {what}", i + 1).if_supports_color(Stdout, |s| s.yellow()),
            place.if_supports_color(Stdout, |s| s.style(owo_colors::Style::new().bold().yellow()))
        );
    }
}

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner shown while a step runs, replaced by a ✔ or ✖ line when it ends.
pub struct Indicator {
    bar: ProgressBar,
}

impl Indicator {
    #[must_use]
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }

        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Indicator { bar }
    }

    pub fn succeed(self, message: &str) {
        self.bar.finish_and_clear();
        println!(
            "{} {message}",
            "✔".if_supports_color(owo_colors::Stream::Stdout, |s| s.green())
        );
    }

    pub fn fail(self, message: &str) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {message}",
            "✖".if_supports_color(owo_colors::Stream::Stderr, |s| s.red())
        );
    }
}

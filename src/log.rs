#[doc(hidden)]
#[macro_export]
macro_rules! __labelled {
    ($print:ident, $stream:ident, $label:expr, $style:expr, $($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            $print!(
                "{}: {}",
                $label.if_supports_color(owo_colors::Stream::$stream, |s| s.style($style)),
                format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! error {
    ($single:expr) => {
        $crate::__labelled!(
            eprintln,
            Stderr,
            "error",
            owo_colors::Style::new().bold().red(),
            "{}",
            $single
        )
    };
    ($($arg:tt)+) => {
        $crate::__labelled!(
            eprintln,
            Stderr,
            "error",
            owo_colors::Style::new().bold().red(),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! warn {
    ($single:expr) => {
        $crate::__labelled!(
            println,
            Stdout,
            "warning",
            owo_colors::Style::new().bold().yellow(),
            "{}",
            $single
        )
    };
    ($($arg:tt)+) => {
        $crate::__labelled!(
            println,
            Stdout,
            "warning",
            owo_colors::Style::new().bold().yellow(),
            $($arg)+
        )
    };
}

/// Prints a whole line in green, used for the final "project created" message.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}",
                format!($($arg)+).if_supports_color(owo_colors::Stream::Stdout, |s| s.green())
            );
        }
    };
}

/// Prints every layer of an [`anyhow::Error`] dimmed, below the line that
/// reported it.
#[macro_export]
macro_rules! cause {
    ($err:expr) => {
        {
            use owo_colors::OwoColorize;

            for layer in $err.chain() {
                eprintln!(
                    "  {}",
                    layer
                        .to_string()
                        .if_supports_color(owo_colors::Stream::Stderr, |s| s.dimmed())
                );
            }
        }
    };
}

/// Only prints when `COMET_TRACE` is set.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        {
            if std::env::var_os("COMET_TRACE").is_some() {
                $crate::__labelled!(
                    println,
                    Stdout,
                    "trace",
                    owo_colors::Style::new().bold(),
                    $($arg)+
                )
            }
        }
    };
}

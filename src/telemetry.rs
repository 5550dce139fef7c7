//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from verbosity flags.
///
/// `COSPLOG_LOG` (an `EnvFilter` directive string) wins over `-v`/`-q`.
/// Output goes to stderr so it never mixes with rendered lists.
pub fn init(verbose: u8, quiet: bool) {
    let filter = match std::env::var("COSPLOG_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(default_level(verbose, quiet)),
    };

    // try_init: tests may install their own subscriber first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_level(0, false), "warn");
        assert_eq!(default_level(1, false), "info");
        assert_eq!(default_level(2, false), "debug");
        assert_eq!(default_level(9, false), "trace");
        assert_eq!(default_level(3, true), "error");
    }
}

//! Logging setup for the layercfg CLI.
//!
//! Diagnostics go to stderr through `tracing` so that composed documents on
//! stdout stay pipeable. `RUST_LOG` overrides the default filter unless
//! `--verbose` or `--quiet` is given.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the given verbosity flags.
///
/// `verbose` takes precedence over `quiet`. Returns `None` when the
/// environment (or the default) should decide.
pub fn filter_directive(verbose: bool, quiet: bool) -> Option<&'static str> {
	if verbose {
		Some("layercfg=debug")
	} else if quiet {
		Some("layercfg=error")
	} else {
		None
	}
}

/// Initialize the global tracing subscriber. Call once, before logging.
pub fn init_logger(verbose: bool, quiet: bool) {
	let filter = match filter_directive(verbose, quiet) {
		Some(directive) => EnvFilter::new(directive),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("layercfg=warn")),
	};

	let fmt_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_level(true)
		.with_ansi(!no_color())
		.compact();

	// A subscriber may already be installed (tests, embedding); keep it
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt_layer)
		.try_init();
}

fn no_color() -> bool {
	std::env::var_os("NO_COLOR").is_some()
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use layercfg::config::{
	LoadedManifest, MANIFEST_FILE_NAME, PolicyRule, compose_mode, discover_manifest,
	generate_init_template, load_layer, resolve_mode,
};
use layercfg::document::{Format, compose};
use layercfg::logging::init_logger;
use layercfg::policy::{ArrayStrategy, MergePolicy};

#[derive(Parser)]
#[command(name = "layercfg")]
#[command(
	author,
	version,
	about = "Compose build configurations from a shared base and mode-specific overlays"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template layercfg.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing layercfg.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Show debug diagnostics on stderr
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Only show errors
	#[arg(short, long, global = true)]
	quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Merge layer files left to right and print the result
	Merge {
		/// Layer files (.toml or .json); the first is the base
		#[arg(required = true, value_name = "FILE")]
		files: Vec<PathBuf>,

		/// Sequence rule as PATTERN=STRATEGY (append, prepend, replace); first match wins
		#[arg(long = "policy", value_name = "PATTERN=STRATEGY", value_parser = parse_policy_rule)]
		policy: Vec<PolicyRule>,

		/// Output format
		#[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
		format: OutputFormat,
	},
	/// Compose the base layer with a mode overlay from layercfg.toml
	Compose {
		/// Mode to compose (falls back to mode-env-var, then default-mode)
		#[arg(long)]
		mode: Option<String>,

		/// Output format
		#[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
		format: OutputFormat,
	},
	/// Manifest management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the manifest, its modes and policy rules
	Show,
	/// Load every layer of every mode without printing anything
	Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
	Toml,
	Json,
}

impl From<OutputFormat> for Format {
	fn from(format: OutputFormat) -> Self {
		match format {
			OutputFormat::Toml => Format::Toml,
			OutputFormat::Json => Format::Json,
		}
	}
}

fn parse_policy_rule(input: &str) -> std::result::Result<PolicyRule, String> {
	let (pattern, strategy) = input
		.rsplit_once('=')
		.ok_or_else(|| format!("expected PATTERN=STRATEGY, got `{input}`"))?;
	if pattern.is_empty() {
		return Err("pattern must not be empty".to_string());
	}
	Ok(PolicyRule {
		path: pattern.to_string(),
		strategy: strategy.parse::<ArrayStrategy>()?,
	})
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logger(cli.verbose, cli.quiet);

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Merge {
				files,
				policy,
				format,
			} => handle_merge(&files, &policy, format.into()),
			Commands::Compose { mode, format } => handle_compose(mode.as_deref(), format.into()),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
		};
	}

	// No command specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let manifest_path = PathBuf::from(MANIFEST_FILE_NAME);

	if manifest_path.exists() && !force {
		anyhow::bail!("{MANIFEST_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&manifest_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", manifest_path.display()))?;

	println!("Created {MANIFEST_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_merge(files: &[PathBuf], rules: &[PolicyRule], format: Format) -> Result<ExitCode> {
	let policy = MergePolicy::compile(rules).context("Invalid --policy rule")?;

	let layers = files
		.iter()
		.map(|path| {
			load_layer(path, &policy)
				.with_context(|| format!("Failed to load layer {}", path.display()))
		})
		.collect::<Result<Vec<_>>>()?;

	let merged = compose(&layers, &policy);
	print!("{}", format.render(&merged)?);
	Ok(ExitCode::SUCCESS)
}

fn current_manifest() -> Result<LoadedManifest> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	discover_manifest(&cwd).context("Failed to load manifest")
}

fn handle_compose(mode: Option<&str>, format: Format) -> Result<ExitCode> {
	let loaded = current_manifest()?;
	let (mode, source) = resolve_mode(mode, &loaded.manifest)?;
	tracing::debug!(mode = %mode, ?source, "Resolved mode");

	let composition = compose_mode(&loaded, &mode)
		.with_context(|| format!("Failed to compose mode `{mode}`"))?;

	print!("{}", format.render(&composition.document)?);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let loaded = current_manifest()?;
	let manifest = &loaded.manifest;

	println!("# Source: {}", loaded.path.display());
	println!("# base: {}", display_relative(&loaded, &manifest.base));
	if let Some(ref mode) = manifest.default_mode {
		println!("# default-mode: {mode}");
	}
	if let Some(ref env_var) = manifest.mode_env_var {
		println!("# mode-env-var: {env_var}");
	}
	println!("# modes: {}", manifest.modes.len());
	println!();

	for (name, spec) in &manifest.modes {
		println!("  Mode {name}:");
		println!("    overlay: {}", display_relative(&loaded, &spec.overlay));
		for rule in &spec.policy {
			println!("    policy: {} -> {}", rule.path, rule.strategy);
		}
		println!();
	}

	if !manifest.policy.is_empty() {
		println!("  Policy (all modes):");
		for rule in &manifest.policy {
			println!("    {} -> {}", rule.path, rule.strategy);
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let loaded = match discover_manifest(&cwd) {
		Ok(loaded) => loaded,
		Err(e) => {
			eprintln!("Configuration error: {e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	let mut failed = false;
	if let Err(e) = load_layer(&loaded.base_path(), &MergePolicy::default()) {
		failed = true;
		eprintln!("  base: {e}");
	}

	for name in loaded.manifest.modes.keys() {
		match compose_mode(&loaded, name) {
			Ok(composition) => println!(
				"  {name}: valid ({} layers, {} top-level keys)",
				composition.layers.len(),
				composition.document.len()
			),
			Err(e) => {
				failed = true;
				eprintln!("  {name}: {e}");
			}
		}
	}

	if failed {
		Ok(ExitCode::FAILURE)
	} else {
		println!("All modes in {} are valid", loaded.path.display());
		Ok(ExitCode::SUCCESS)
	}
}

fn display_relative(loaded: &LoadedManifest, path: &Path) -> String {
	format!("{} ({})", path.display(), loaded.dir().join(path).display())
}

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser};
use hide_hooks::commands::patch_command;
use hide_hooks_core::config::{DEFAULT_CALL_NAME, DEFAULT_COMMAND, DEFAULT_MARKER, DEFAULT_RETURN_LOOKBACK};
use hide_hooks_core::PatchConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Silence the hook-success notice in an installed CLI bundle.
///
/// This CLI is a thin wrapper around `hide-hooks-core` (exposed in code as
/// `hide_hooks_core`). All substantive logic lives in the library so it can
/// be tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "hide-hooks",
    version,
    about = "Silence the hook-success notice in an installed CLI bundle",
    long_about = None
)]
struct Cli {
    /// File to patch. If omitted, `--command` is looked up on PATH and its
    /// symlinks are followed to the real file.
    path: Option<String>,

    /// Executable to resolve when no path is given.
    #[arg(long, default_value = DEFAULT_COMMAND)]
    command: String,

    /// Literal text that identifies the call to neutralize.
    #[arg(
        long,
        default_value = DEFAULT_MARKER,
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    marker: String,

    /// Name of the call expression enclosing the marker.
    #[arg(
        long = "call",
        default_value = DEFAULT_CALL_NAME,
        value_parser = NonEmptyStringValueParser::new()
    )]
    call_name: String,

    /// How many bytes before the call to search for a `return` keyword.
    #[arg(long, default_value_t = DEFAULT_RETURN_LOOKBACK)]
    lookback: usize,

    /// Locate and splice only; create no backup and write nothing.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Emit a JSON summary instead of human-readable narration.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase diagnostic logging (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn initialize_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let fallback_filter = format!("hide_hooks={level},hide_hooks_core={level}");

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter)),
        )
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let config = PatchConfig::default()
        .with_marker(cli.marker)
        .with_call_name(cli.call_name)
        .with_command(cli.command)
        .with_return_lookback(cli.lookback);
    tracing::debug!(?config, "starting patch run");

    patch_command(cli.path.as_deref(), &config, cli.dry_run, cli.json)?;

    Ok(())
}

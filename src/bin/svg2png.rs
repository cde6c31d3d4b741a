//! CLI binary for svg2png.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `RenderRequest` + `RendererSettings`, runs the render, and exits with the
//! status the library assigns to the outcome.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use svg2png::{plan, render_sync, RenderRequest, RendererSettings, Svg2PngError};
use tracing_subscriber::EnvFilter;

/// Path to the default runner, for hosts where `npx` is not on `PATH`.
const RUNNER_PATH_ENV: &str = "SVG2PNG_RUNNER_PATH";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render at the SVG's intrinsic size
  svg2png logo.svg dist/logo.png

  # Social card with explicit size and an opaque background
  svg2png card.svg dist/social/card.png --width 1200 --height 630 --background '#FFFFFF'

  # Show the command that would run, without running it
  svg2png --dry-run card.svg card.png --width 512

  # Give up if the renderer hangs
  svg2png --timeout 60 big.svg big.png

EXIT STATUS:
  0      PNG written
  1      runner not found, input missing, or another local failure
  2      invalid arguments (or the renderer's own status 2)
  124    renderer killed after --timeout
  N      any other non-zero status is the renderer's own exit status

ENVIRONMENT VARIABLES:
  SVG2PNG_RUNNER          Package runner to invoke (default: npx)
  SVG2PNG_RUNNER_PATH     Path to the default runner, used when neither
                          --runner nor SVG2PNG_RUNNER is given
  SVG2PNG_PACKAGE         Renderer package (default: @resvg/resvg-js)
  SVG2PNG_TIMEOUT         Renderer timeout in seconds
  RUST_LOG                Log filter, overrides -v / -q

SETUP:
  Node.js must be installed so that `npx` is on PATH. The renderer package
  is fetched by npx on first use and cached by npm afterwards.
"#;

/// Convert an SVG file to PNG using resvg via npx.
#[derive(Parser, Debug)]
#[command(
    name = "svg2png",
    version,
    about = "Convert SVG artwork to PNG",
    long_about = "Convert an SVG file to PNG by running the resvg renderer through a package \
runner (npx by default). The renderer is fetched on demand; only Node.js is required.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the source SVG file.
    input: PathBuf,

    /// Destination PNG path. Missing parent directories are created.
    output: PathBuf,

    /// Output width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Background color override (e.g. '#FFFFFF').
    #[arg(long)]
    background: Option<String>,

    /// Package runner used to fetch and run the renderer [default: npx].
    #[arg(long, env = "SVG2PNG_RUNNER")]
    runner: Option<String>,

    /// Renderer package handed to the runner.
    #[arg(long, env = "SVG2PNG_PACKAGE", default_value = svg2png::config::DEFAULT_PACKAGE)]
    package: String,

    /// Kill the renderer after this many seconds (default: wait indefinitely).
    #[arg(long, env = "SVG2PNG_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Print the renderer command instead of running it.
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report (or, with --dry-run, the JSON command) on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SVG2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress the success line; errors are still printed.
    #[arg(short, long, env = "SVG2PNG_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stdout is reserved for the result line; logs go to stderr, where the
    // renderer's own diagnostics also land.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<Svg2PngError>() {
                // The renderer already explained itself on stderr.
                Some(err) if err.is_reported_by_renderer() => err.exit_code(),
                Some(err) => {
                    eprintln!("{} {}", red("Error:"), err);
                    err.exit_code()
                }
                None => {
                    eprintln!("{} {:#}", red("Error:"), e);
                    svg2png::error::EXIT_FAILURE
                }
            };
            ExitCode::from(status_byte(code))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let request = build_request(cli)?;
    let settings = build_settings(cli);

    // ── Dry run ──────────────────────────────────────────────────────────
    if cli.dry_run {
        let cmd = plan(&request, &settings);
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&cmd).context("Failed to serialise command")?
            );
        } else {
            println!("{cmd}");
        }
        return Ok(());
    }

    // ── Render ───────────────────────────────────────────────────────────
    let report = render_sync(&request, &settings)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        println!("{report}");
    }

    Ok(())
}

/// Map CLI args to `RenderRequest`.
fn build_request(cli: &Cli) -> Result<RenderRequest> {
    let request = RenderRequest::builder(&cli.input, &cli.output)
        .maybe_width(cli.width)
        .maybe_height(cli.height)
        .maybe_background(cli.background.clone())
        .build()?;
    Ok(request)
}

/// Map CLI args to `RendererSettings`.
fn build_settings(cli: &Cli) -> RendererSettings {
    RendererSettings {
        runner: resolve_runner(cli.runner.clone(), std::env::var(RUNNER_PATH_ENV).ok()),
        package: cli.package.clone(),
        timeout_secs: cli.timeout,
        ..RendererSettings::default()
    }
}

/// Pick the runner program: an explicit `--runner` / `SVG2PNG_RUNNER` wins,
/// then `SVG2PNG_RUNNER_PATH`, then `npx`.
///
/// Dry runs and real runs both go through here, so they always name the
/// same program.
fn resolve_runner(explicit: Option<String>, runner_path: Option<String>) -> String {
    explicit
        .or_else(|| runner_path.filter(|p| !p.is_empty()))
        .unwrap_or_else(|| svg2png::config::DEFAULT_RUNNER.to_string())
}

/// `ExitCode` only carries a byte; statuses outside 1..=255 collapse to 1.
fn status_byte(code: i32) -> u8 {
    match u8::try_from(code) {
        Ok(0) | Err(_) => 1,
        Ok(c) => c,
    }
}

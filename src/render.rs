//! Render entry points.
//!
//! A run is strictly linear and stops at the first failure:
//!
//! ```text
//! locate runner ─▶ input exists ─▶ mkdir -p ─▶ build argv ─▶ spawn + wait ─▶ report
//! ```
//!
//! The runner is located first so that a host without Node.js fails before
//! anything on disk is touched.

use crate::command::ExternalCommand;
use crate::config::{RenderRequest, RendererSettings};
use crate::error::Svg2PngError;
use crate::pipeline::{input, invoke, output};
use runner_locate::LocateError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Summary of a successful render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Source SVG as given by the caller.
    pub input: PathBuf,
    /// PNG written by the renderer.
    pub output: PathBuf,
    /// Executable that was actually spawned.
    pub runner: PathBuf,
    /// Wall-clock time spent in the renderer, in milliseconds.
    pub duration_ms: u64,
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rendered {} -> {}",
            self.input.display(),
            self.output.display()
        )
    }
}

/// Render `request` with the external tool described by `settings`.
///
/// # Errors
/// - [`Svg2PngError::MissingDependency`] if the runner is not on `PATH`
/// - [`Svg2PngError::RunnerNotExecutable`] if the runner is a path to a
///   non-executable file
/// - [`Svg2PngError::InputNotFound`] if the SVG does not exist
/// - [`Svg2PngError::OutputDirFailed`] if the output directory cannot be made
/// - [`Svg2PngError::RendererFailed`] / [`Svg2PngError::RendererKilled`] /
///   [`Svg2PngError::Timeout`] if the renderer itself fails
pub async fn render(
    request: &RenderRequest,
    settings: &RendererSettings,
) -> Result<RenderReport, Svg2PngError> {
    // ── Step 1: Locate the runner ────────────────────────────────────────
    let runner = runner_locate::locate(&settings.runner).map_err(|e| {
        debug!("Runner lookup failed: {}", e);
        match e {
            LocateError::NotFound { .. } => Svg2PngError::MissingDependency {
                tool: settings.runner.clone(),
            },
            LocateError::NotExecutable { path } => Svg2PngError::RunnerNotExecutable { path },
        }
    })?;
    debug!("Using runner: {}", runner.display());

    // ── Step 2: Validate input ───────────────────────────────────────────
    input::ensure_input_exists(&request.input)?;

    // ── Step 3: Prepare output directory ─────────────────────────────────
    output::prepare_output_dir(request)?;

    // ── Step 4: Build the command ────────────────────────────────────────
    let cmd = ExternalCommand::from_request(request, settings).with_program(runner.clone());

    // ── Step 5: Execute ──────────────────────────────────────────────────
    let start = Instant::now();
    invoke::run(&cmd, settings.timeout_secs).await?;
    let duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Rendered {} in {}ms",
        request.output.display(),
        duration_ms
    );

    Ok(RenderReport {
        input: request.input.clone(),
        output: request.output.clone(),
        runner,
        duration_ms,
    })
}

/// Blocking wrapper around [`render`] for synchronous callers.
///
/// Drives a current-thread runtime; the only thing it ever waits on is the
/// renderer process.
pub fn render_sync(
    request: &RenderRequest,
    settings: &RendererSettings,
) -> Result<RenderReport, Svg2PngError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Svg2PngError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(render(request, settings))
}

/// The command [`render`] would run, without locating the runner or touching
/// the filesystem.
pub fn plan(request: &RenderRequest, settings: &RendererSettings) -> ExternalCommand {
    ExternalCommand::from_request(request, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_line_format() {
        let report = RenderReport {
            input: "art/logo.svg".into(),
            output: "dist/logo.png".into(),
            runner: "/usr/bin/npx".into(),
            duration_ms: 12,
        };
        assert_eq!(report.to_string(), "Rendered art/logo.svg -> dist/logo.png");
    }

    #[test]
    fn missing_runner_fails_before_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out.png");
        let req = RenderRequest::builder(dir.path().join("in.svg"), &out)
            .build()
            .unwrap();
        let settings = RendererSettings {
            runner: "svg2png-no-such-runner-8d1f".into(),
            ..RendererSettings::default()
        };

        let err = render_sync(&req, &settings).unwrap_err();
        assert!(matches!(err, Svg2PngError::MissingDependency { .. }));
        assert!(!dir.path().join("nested").exists());
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_runner_path_is_reported_as_such() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let runner = dir.path().join("npx");
        std::fs::write(&runner, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&runner, std::fs::Permissions::from_mode(0o644)).unwrap();

        let req = RenderRequest::builder(dir.path().join("in.svg"), dir.path().join("out/x.png"))
            .build()
            .unwrap();
        let settings = RendererSettings {
            runner: runner.display().to_string(),
            ..RendererSettings::default()
        };

        let err = render_sync(&req, &settings).unwrap_err();
        assert!(
            matches!(err, Svg2PngError::RunnerNotExecutable { ref path } if *path == runner),
            "got: {err:?}"
        );
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn plan_is_pure() {
        let req = RenderRequest::builder("missing.svg", "no/such/dir/out.png")
            .build()
            .unwrap();
        let cmd = plan(&req, &RendererSettings::default());
        assert_eq!(cmd.program(), "npx");
        assert!(!std::path::Path::new("no").exists());
    }
}

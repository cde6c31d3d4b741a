//! Error type for the svg2png library.
//!
//! Every failure is fatal: there is no partial result to recover, so a single
//! enum covers the whole run. Each variant knows the process exit status it
//! maps to ([`Svg2PngError::exit_code`]), which keeps the binary free of
//! status bookkeeping.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for local failures (missing tool, missing input, I/O).
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when the renderer outlives `--timeout`.
pub const EXIT_TIMEOUT: i32 = 124;

/// All fatal errors returned by the svg2png library.
#[derive(Debug, Error)]
pub enum Svg2PngError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// The package runner is not installed or not on `PATH`.
    #[error("required tool '{tool}' was not found on PATH.\nInstall Node.js (which ships npx) or pass --runner <program>.")]
    MissingDependency { tool: String },

    /// `--runner` names a path, but the file there cannot be executed.
    #[error("Runner '{}' is not an executable file.\nCheck the path, or make it executable with: chmod +x {path:?}", .path.display())]
    RunnerNotExecutable { path: PathBuf },

    /// Input SVG path does not exist.
    #[error("Input SVG '{}' does not exist.", .path.display())]
    InputNotFound { path: PathBuf },

    /// Request builder validation failed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the parent directory of the output PNG.
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused to start the renderer.
    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The renderer ran and exited with a non-zero status.
    ///
    /// The renderer has already written its own diagnostics to the inherited
    /// stderr, so callers normally exit with `code` and print nothing more.
    #[error("Renderer exited with status {code}")]
    RendererFailed { code: i32 },

    /// The renderer was terminated by a signal and has no exit code.
    #[error("Renderer was terminated by signal {signal}")]
    RendererKilled { signal: i32 },

    /// The renderer did not finish within the configured timeout.
    #[error("Renderer timed out after {secs}s and was killed")]
    Timeout { secs: u64 },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Svg2PngError {
    /// Process exit status this error should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Svg2PngError::RendererFailed { code } => *code,
            Svg2PngError::RendererKilled { signal } => 128 + signal,
            Svg2PngError::Timeout { .. } => EXIT_TIMEOUT,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the renderer already reported this failure on stderr.
    pub fn is_reported_by_renderer(&self) -> bool {
        matches!(self, Svg2PngError::RendererFailed { .. })
    }
}

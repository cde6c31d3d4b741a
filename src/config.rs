//! Request and settings types for an SVG-to-PNG render.
//!
//! A run is described by two values:
//!
//! * [`RenderRequest`]: *what* to render: input, output, and the optional
//!   size/background overrides. Built once from the command line and never
//!   mutated afterwards.
//! * [`RendererSettings`]: *who* renders it: the package runner, the package
//!   it fetches, and an optional timeout. Defaults run
//!   `npx --yes @resvg/resvg-js` with no timeout.

use crate::error::Svg2PngError;
use std::path::{Path, PathBuf};

/// Default package runner.
pub const DEFAULT_RUNNER: &str = "npx";

/// Flag telling the runner to fetch the package without prompting.
pub const DEFAULT_CONFIRM_FLAG: &str = "--yes";

/// Default rendering package.
pub const DEFAULT_PACKAGE: &str = "@resvg/resvg-js";

/// A single SVG-to-PNG render.
///
/// Built via [`RenderRequest::builder()`].
///
/// # Example
/// ```rust
/// use svg2png::RenderRequest;
///
/// let request = RenderRequest::builder("assets/card.svg", "dist/card.png")
///     .width(1200)
///     .height(630)
///     .background("#FFFFFF")
///     .build()
///     .unwrap();
/// assert_eq!(request.width, Some(1200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Source SVG file.
    pub input: PathBuf,

    /// Destination PNG file. Missing parent directories are created.
    pub output: PathBuf,

    /// Output width in pixels.
    pub width: Option<u32>,

    /// Output height in pixels.
    pub height: Option<u32>,

    /// Background color passed through verbatim, e.g. `#FFFFFF`.
    pub background: Option<String>,
}

impl RenderRequest {
    /// Create a new builder for a render of `input` into `output`.
    pub fn builder(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> RenderRequestBuilder {
        RenderRequestBuilder {
            request: Self {
                input: input.into(),
                output: output.into(),
                width: None,
                height: None,
                background: None,
            },
        }
    }

    /// Parent directory of the output file, if the path has one.
    ///
    /// `out.png` has no parent to create; `dist/out.png` has `dist`.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Builder for [`RenderRequest`].
#[derive(Debug)]
pub struct RenderRequestBuilder {
    request: RenderRequest,
}

impl RenderRequestBuilder {
    pub fn width(mut self, px: u32) -> Self {
        self.request.width = Some(px);
        self
    }

    pub fn height(mut self, px: u32) -> Self {
        self.request.height = Some(px);
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.request.background = Some(color.into());
        self
    }

    /// Optional setters for callers holding `Option`s (e.g. parsed CLI args).
    pub fn maybe_width(mut self, px: Option<u32>) -> Self {
        self.request.width = px;
        self
    }

    pub fn maybe_height(mut self, px: Option<u32>) -> Self {
        self.request.height = px;
        self
    }

    pub fn maybe_background(mut self, color: Option<String>) -> Self {
        self.request.background = color;
        self
    }

    /// Build the request, validating constraints.
    pub fn build(self) -> Result<RenderRequest, Svg2PngError> {
        let r = &self.request;
        if r.input.as_os_str().is_empty() {
            return Err(Svg2PngError::InvalidRequest("input path is empty".into()));
        }
        if r.output.as_os_str().is_empty() {
            return Err(Svg2PngError::InvalidRequest("output path is empty".into()));
        }
        if r.width == Some(0) {
            return Err(Svg2PngError::InvalidRequest(
                "width must be a positive number of pixels".into(),
            ));
        }
        if r.height == Some(0) {
            return Err(Svg2PngError::InvalidRequest(
                "height must be a positive number of pixels".into(),
            ));
        }
        if matches!(r.background.as_deref(), Some(b) if b.trim().is_empty()) {
            return Err(Svg2PngError::InvalidRequest(
                "background color must not be empty".into(),
            ));
        }
        Ok(self.request)
    }
}

/// Which external tool performs the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererSettings {
    /// Package runner program name or path. Default: `npx`.
    pub runner: String,

    /// Auto-confirm flag so the runner fetches the package on demand.
    /// Default: `--yes`.
    pub confirm_flag: String,

    /// Package identifier handed to the runner. Default: `@resvg/resvg-js`.
    pub package: String,

    /// Kill the renderer after this many seconds. Default: `None` (wait forever).
    pub timeout_secs: Option<u64>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            runner: DEFAULT_RUNNER.to_string(),
            confirm_flag: DEFAULT_CONFIRM_FLAG.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            timeout_secs: None,
        }
    }
}

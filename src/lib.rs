//! # svg2png
//!
//! Convert SVG files to PNG by delegating to an external renderer.
//!
//! No SVG is parsed here. The crate validates a request, builds the command
//! line for a package runner (by default `npx --yes @resvg/resvg-js`), runs
//! it, and propagates the renderer's exit status. The runner fetches the
//! renderer on demand, so the only host requirement is Node.js.
//!
//! ## Run Overview
//!
//! ```text
//! RenderRequest
//!  │
//!  ├─ 1. Locate   find the package runner on PATH
//!  ├─ 2. Input    the SVG must exist
//!  ├─ 3. Output   create missing parent directories
//!  ├─ 4. Command  npx --yes @resvg/resvg-js IN OUT --format png [--width …]
//!  ├─ 5. Invoke   spawn, wait (optionally with a timeout)
//!  └─ 6. Report   RenderReport, or the renderer's exit status as an error
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use svg2png::{render_sync, RenderRequest, RendererSettings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = RenderRequest::builder("assets/card.svg", "dist/card.png")
//!         .width(1200)
//!         .height(630)
//!         .background("#FFFFFF")
//!         .build()?;
//!     let report = render_sync(&request, &RendererSettings::default())?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `svg2png` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod command;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use command::ExternalCommand;
pub use config::{RenderRequest, RenderRequestBuilder, RendererSettings};
pub use error::Svg2PngError;
pub use render::{plan, render, render_sync, RenderReport};

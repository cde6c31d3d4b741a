//! Pipeline stages for an SVG-to-PNG render.
//!
//! Each submodule implements exactly one step of the run, in order:
//!
//! ```text
//! input ──▶ output ──▶ invoke
//! (exists?)  (mkdir -p)  (spawn + wait)
//! ```
//!
//! 1. [`input`]  confirms the source SVG exists
//! 2. [`output`] creates the output file's missing parent directories
//! 3. [`invoke`] runs the renderer and translates its exit status
//!
//! Locating the runner happens before all of these, in [`crate::render`],
//! because a missing tool must fail before any filesystem access.

pub mod input;
pub mod invoke;
pub mod output;

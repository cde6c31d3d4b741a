//! The external command line handed to the package runner.
//!
//! Token order is fixed:
//!
//! ```text
//! <runner> <confirm> <package> <input> <output> --format png [--width N] [--height N] [--background C]
//! ```
//!
//! Construction is pure: nothing here touches the filesystem or `PATH`, so
//! the exact argv can be inspected (`--dry-run`) or asserted in tests.

use crate::config::{RenderRequest, RendererSettings};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Output format requested from the renderer. Always PNG.
pub const OUTPUT_FORMAT: &str = "png";

/// An ordered argv: a program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    /// Derive the renderer invocation for `request`.
    pub fn from_request(request: &RenderRequest, settings: &RendererSettings) -> Self {
        let mut args: Vec<OsString> = vec![
            settings.confirm_flag.clone().into(),
            settings.package.clone().into(),
            request.input.clone().into_os_string(),
            request.output.clone().into_os_string(),
            "--format".into(),
            OUTPUT_FORMAT.into(),
        ];

        if let Some(w) = request.width {
            args.push("--width".into());
            args.push(w.to_string().into());
        }
        if let Some(h) = request.height {
            args.push("--height".into());
            args.push(h.to_string().into());
        }
        if let Some(ref bg) = request.background {
            args.push("--background".into());
            args.push(bg.into());
        }

        Self {
            program: settings.runner.clone().into(),
            args,
        }
    }

    /// Replace the program with a resolved executable path, keeping the args.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Program followed by args, lossily converted to UTF-8.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }

    /// Build a [`tokio::process::Command`] with inherited stdio.
    ///
    /// With `own_group` set the child leads a new process group on unix, so
    /// everything it forks can be signalled together. Otherwise it stays in
    /// ours and receives terminal signals such as Ctrl-C directly.
    pub(crate) fn to_tokio(&self, own_group: bool) -> tokio::process::Command {
        let mut std_cmd = std::process::Command::new(&self.program);
        std_cmd.args(&self.args);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if own_group {
                std_cmd.process_group(0);
            }
        }
        #[cfg(not(unix))]
        let _ = own_group;

        let mut cmd = tokio::process::Command::from(std_cmd);
        cmd.kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

impl Serialize for ExternalCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tokens = self.tokens().into_iter();
        let program = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.collect();

        let mut s = serializer.serialize_struct("ExternalCommand", 2)?;
        s.serialize_field("program", &program)?;
        s.serialize_field("args", &args)?;
        s.end()
    }
}

//! # runner-locate
//!
//! Resolve the name of an external program (typically a package runner such
//! as `npx`) to the executable that would actually be started.
//!
//! ## Resolution order
//!
//! 1. A program containing a path separator (`./bin/npx`, `/usr/bin/npx`) is
//!    checked directly; the search path is not consulted.
//! 2. Otherwise the program is searched on `PATH` via the [`which`] crate,
//!    which also applies `PATHEXT` on Windows (`npx` → `npx.cmd`).
//!
//! No environment variables are read here; callers that offer an override
//! resolve it before asking.
//!
//! ```rust,no_run
//! let npx = runner_locate::locate("npx").expect("npx is not installed");
//! println!("using {}", npx.display());
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by runner-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The program could not be found on the search path.
    #[error("required tool '{program}' was not found on PATH")]
    NotFound { program: String },

    /// An explicit path was given but nothing executable lives there.
    #[error("'{}' is not an executable file", .path.display())]
    NotExecutable { path: PathBuf },
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Resolves `program` to the executable that would be spawned.
///
/// See the crate docs for the resolution order.
pub fn locate(program: impl AsRef<OsStr>) -> Result<PathBuf, LocateError> {
    let program = program.as_ref();

    // 1. Explicit path.
    if has_separator(program) {
        let p = PathBuf::from(program);
        return if is_executable(&p) {
            Ok(p)
        } else {
            Err(LocateError::NotExecutable { path: p })
        };
    }

    // 2. PATH search.
    which::which(program).map_err(|_| LocateError::NotFound {
        program: program.to_string_lossy().into_owned(),
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn has_separator(program: &OsStr) -> bool {
    Path::new(program).components().count() > 1
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

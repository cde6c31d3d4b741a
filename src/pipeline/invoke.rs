//! Renderer execution: spawn the child, wait for it, map its exit status.
//!
//! The child inherits stdin, stdout and stderr, so whatever the renderer (or
//! the package runner fetching it) prints reaches the user unmodified. We
//! never synthesise a message for a renderer failure; only its status is
//! carried forward.
//!
//! With a timeout the child runs in its own process group. On expiry the
//! whole group is killed, so a package runner cannot leave a renderer behind
//! that finishes the PNG after we have reported failure.

use crate::command::ExternalCommand;
use crate::error::Svg2PngError;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Child;
use tracing::{debug, warn};

/// Run `cmd` to completion, optionally killing it after `timeout_secs`.
pub async fn run(cmd: &ExternalCommand, timeout_secs: Option<u64>) -> Result<(), Svg2PngError> {
    debug!("Spawning renderer: {}", cmd);

    let mut child = cmd
        .to_tokio(timeout_secs.is_some())
        .spawn()
        .map_err(|e| Svg2PngError::SpawnFailed {
            program: cmd.program().to_string_lossy().into_owned(),
            source: e,
        })?;

    let status = match timeout_secs {
        Some(secs) => {
            let waited = tokio::time::timeout(Duration::from_secs(secs), child.wait()).await;
            match waited {
                Ok(status) => status,
                Err(_) => {
                    warn!("Renderer exceeded {}s, killing pid {:?}", secs, child.id());
                    terminate(&mut child).await;
                    return Err(Svg2PngError::Timeout { secs });
                }
            }
        }
        None => child.wait().await,
    }
    .map_err(|e| Svg2PngError::Internal(format!("Failed to wait for renderer: {}", e)))?;

    check_status(status)
}

/// Kill the child's process group (unix), then the child itself, and reap it.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            debug!("Killing process group {}", pid);
            if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                warn!("Failed to kill process group {}: {}", pid, e);
            }
        }
    }

    // Reaps the leader, which the group kill has usually already ended.
    if let Err(e) = child.kill().await {
        warn!("Failed to kill renderer: {}", e);
    }
}

/// Translate a finished child's status into the run's outcome.
pub fn check_status(status: ExitStatus) -> Result<(), Svg2PngError> {
    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        debug!("Renderer exited with status {}", code);
        return Err(Svg2PngError::RendererFailed { code });
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(Svg2PngError::RendererKilled { signal });
        }
    }

    Err(Svg2PngError::Internal(format!(
        "Renderer finished with unrecognised status: {}",
        status
    )))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{RenderRequest, RendererSettings};
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn status_mapping() {
        assert!(check_status(ExitStatus::from_raw(0)).is_ok());

        let err = check_status(ExitStatus::from_raw(2 << 8)).unwrap_err();
        assert!(matches!(err, Svg2PngError::RendererFailed { code: 2 }));
        assert_eq!(err.exit_code(), 2);

        let err = check_status(ExitStatus::from_raw(9)).unwrap_err();
        assert!(matches!(err, Svg2PngError::RendererKilled { signal: 9 }));
    }

    fn shell(script: &str) -> ExternalCommand {
        // `sh -c <script> ...`: the request-derived args become $0, $1, ...
        let settings = RendererSettings {
            runner: "sh".into(),
            confirm_flag: "-c".into(),
            package: script.into(),
            timeout_secs: None,
        };
        let req = RenderRequest::builder("in.svg", "out.png").build().unwrap();
        ExternalCommand::from_request(&req, &settings)
    }

    #[tokio::test]
    async fn zero_exit_succeeds() {
        run(&shell("exit 0"), None).await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_is_propagated() {
        let err = run(&shell("exit 3"), None).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn timeout_kills_child() {
        let err = run(&shell("sleep 5"), Some(1)).await.unwrap_err();
        assert!(matches!(err, Svg2PngError::Timeout { secs: 1 }));
        assert_eq!(err.exit_code(), 124);
    }

    #[tokio::test]
    async fn timeout_kills_background_descendants() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("late.png");
        // The backgrounded job outlives a kill of the shell alone.
        let script = format!(
            "(sleep 2; printf PNG > '{}') & wait",
            marker.display()
        );

        let err = run(&shell(&script), Some(1)).await.unwrap_err();
        assert!(matches!(err, Svg2PngError::Timeout { secs: 1 }));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists(), "descendant survived the timeout");
    }

    #[tokio::test]
    async fn unknown_program_fails_to_spawn() {
        let cmd = shell("exit 0").with_program("/nonexistent/svg2png-runner");
        let err = run(&cmd, None).await.unwrap_err();
        assert!(matches!(err, Svg2PngError::SpawnFailed { .. }));
    }
}

//! Self-relaunch: the launching process supervises a worker copy of itself.
//!
//! The worker is the same executable started with `-f` in front of the
//! original arguments. It owns the terminal; the supervisor only waits and
//! cleans up the terminal if the worker dies without doing so.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ui::terminal;

/// Flag that marks the worker instance.
pub const WORKER_FLAG: &str = "-f";

/// Command that relaunches `exe` as the worker with `args` passed through.
pub fn worker_command<I, S>(exe: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut command = Command::new(exe);
    command.arg(WORKER_FLAG);
    command.args(args.into_iter().map(Into::into));
    command
}

/// Start the worker, wait for it and return the exit code to propagate.
///
/// `args` are this process's arguments without the program name.
pub fn supervise(args: Vec<OsString>) -> Result<i32> {
    let exe = std::env::current_exe().context("Failed to locate own executable")?;
    let status = worker_command(&exe, args)
        .status()
        .with_context(|| format!("Failed to relaunch {}", exe.display()))?;

    info!("Worker exited with {}", status);
    if !status.success() {
        // The worker may have died before restoring the terminal.
        if let Err(e) = terminal::restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
    Ok(exit_code(status))
}

/// Exit code to report for a worker status; signals map to 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

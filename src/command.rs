// Thin wrapper over tokio::process for the external platform tools.

use std::process::ExitStatus;
use tokio::process::Command;

/// Captured result of one tool invocation, output decoded lossily as UTF-8.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// `exit status N: <stderr or stdout>` for error messages.
    pub fn failure_detail(&self) -> String {
        let text = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        if text.is_empty() {
            self.status.to_string()
        } else {
            format!("{}: {}", self.status, text)
        }
    }
}

/// Run `program args...` to completion. `Err` means the process could not be spawned
/// (binary missing, not executable); a non-zero exit is reported through `status`.
pub async fn run(program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
    tracing::debug!(program, ?args, "running external command");
    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await?;
    let out = CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(
        program,
        status = %out.status,
        stdout_len = out.stdout.len(),
        "external command finished"
    );
    Ok(out)
}

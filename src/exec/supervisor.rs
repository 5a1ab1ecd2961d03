// src/exec/supervisor.rs

//! Process supervisor: one per command.

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CommandSpec;
use crate::exec::emitter::LineEmitter;
use crate::exec::format::LineFormatter;
use crate::exec::stdin::BlockingStdin;
use crate::types::{Line, LineKind};

/// Buffer size of each command's output channel.
pub const CHANNEL_CAPACITY: usize = 16;

/// Start supervising `spec` on a background Tokio task and return the
/// receiving end of its output channel.
///
/// The channel yields every line of the child's stdout and stderr, plus
/// auxiliary lines for spawn / read / exit failures. It is closed exactly
/// once, after the child has exited and both of its streams have been
/// drained to end-of-stream.
pub fn supervise(spec: &CommandSpec) -> mpsc::Receiver<Line> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let supervisor = Supervisor::new(spec, tx);
    tokio::spawn(supervisor.run());
    rx
}

struct Supervisor {
    label: String,
    executable: String,
    args: Vec<String>,
    formatter: Arc<LineFormatter>,
    tx: mpsc::Sender<Line>,
}

impl Supervisor {
    fn new(spec: &CommandSpec, tx: mpsc::Sender<Line>) -> Self {
        Self {
            label: spec.label().to_string(),
            executable: spec.executable.clone(),
            args: spec.args.clone(),
            formatter: Arc::new(LineFormatter::for_command(spec)),
            tx,
        }
    }

    /// Consumes `self`; the sender is dropped on return, which is what
    /// closes the channel.
    async fn run(self) {
        let (stdin_holder, stdin) = match BlockingStdin::open() {
            Ok(pair) => pair,
            Err(e) => {
                warn!(command = %self.label, error = %e, "failed to create stdin pipe");
                self.report(&format!("{}: {e}", self.executable)).await;
                return;
            }
        };

        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(command = %self.label, error = %e, "failed to start process");
                self.report(&format!("{}: {e}", self.executable)).await;
                return;
            }
        };

        info!(
            command = %self.label,
            pid = child.id(),
            args = ?self.args,
            "process started"
        );

        let stdout = child
            .stdout
            .take()
            .map(|s| self.emitter(LineKind::Stdout).spawn(s));
        let stderr = child
            .stderr
            .take()
            .map(|s| self.emitter(LineKind::Stderr).spawn(s));

        let status = child.wait().await;
        drop(stdin_holder);

        for handle in [stdout, stderr].into_iter().flatten() {
            self.join_emitter(handle).await;
        }

        match status {
            Ok(status) if status.success() => {
                debug!(command = %self.label, "process exited successfully");
            }
            Ok(status) => {
                info!(command = %self.label, status = %status, "process exited unsuccessfully");
                self.report(&describe_exit(status)).await;
            }
            Err(e) => {
                warn!(command = %self.label, error = %e, "failed to wait for process");
                self.report(&e.to_string()).await;
            }
        }
    }

    fn emitter(&self, kind: LineKind) -> LineEmitter {
        LineEmitter::new(
            self.label.clone(),
            kind,
            Arc::clone(&self.formatter),
            self.tx.clone(),
        )
    }

    async fn join_emitter(&self, handle: JoinHandle<usize>) {
        if let Err(e) = handle.await {
            warn!(command = %self.label, error = %e, "output reader task failed");
        }
    }

    async fn report(&self, message: &str) {
        if self.tx.send(self.formatter.auxiliary(message)).await.is_err() {
            debug!(command = %self.label, "dispatcher gone; dropping diagnostic");
        }
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => status.to_string(),
    }
}

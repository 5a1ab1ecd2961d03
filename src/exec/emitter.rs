// src/exec/emitter.rs

//! Line emitter: one per (child, stream).

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::exec::format::LineFormatter;
use crate::types::{Line, LineKind};

/// Reads one stream of a child and forwards each newline-delimited record as
/// a formatted [`Line`].
///
/// - Records are forwarded in source order.
/// - A trailing record without a newline is still forwarded at end-of-stream.
/// - A read error is forwarded as a single auxiliary line and ends the
///   emitter.
/// - If the receiving side has gone away the emitter stops silently.
#[derive(Debug, Clone)]
pub struct LineEmitter {
    label: String,
    kind: LineKind,
    formatter: Arc<LineFormatter>,
    tx: mpsc::Sender<Line>,
}

impl LineEmitter {
    pub fn new(
        label: impl Into<String>,
        kind: LineKind,
        formatter: Arc<LineFormatter>,
        tx: mpsc::Sender<Line>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            formatter,
            tx,
        }
    }

    /// Run the emitter on its own Tokio task. The handle resolves to the
    /// number of records forwarded.
    pub fn spawn<R>(self, reader: R) -> JoinHandle<usize>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(self.run(reader))
    }

    /// Drain `reader` to end-of-stream.
    pub async fn run<R>(self, reader: R) -> usize
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut forwarded = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = self.formatter.format(self.kind, &String::from_utf8_lossy(&buf));
                    if self.tx.send(line).await.is_err() {
                        debug!(
                            command = %self.label,
                            stream = %self.kind,
                            "receiver gone; stopping"
                        );
                        return forwarded;
                    }
                    forwarded += 1;
                }
                Err(e) => {
                    warn!(command = %self.label, stream = %self.kind, error = %e, "read error");
                    let _ = self.tx.send(self.formatter.auxiliary(&e.to_string())).await;
                    return forwarded;
                }
            }
        }

        debug!(command = %self.label, stream = %self.kind, forwarded, "stream ended");
        forwarded
    }
}

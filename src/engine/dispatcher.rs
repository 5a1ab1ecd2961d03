// src/engine/dispatcher.rs

use std::fmt;
use std::pin::Pin;

use tokio::io::{AsyncWrite, AsyncWriteExt, Stderr, Stdout};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt, StreamMap};
use tracing::{debug, info};

use crate::errors::Result;
use crate::types::Line;

use super::Termination;
use super::core::{DispatchCore, Step};

/// What a command channel yields to the dispatcher: its lines, then exactly
/// one `Closed` once the supervisor has dropped its sender.
#[derive(Debug)]
enum Signal {
    Line(Line),
    Closed,
}

type ChannelStream = Pin<Box<dyn Stream<Item = Signal> + Send>>;

/// Fans in every command channel and writes lines to the parent's
/// stdout / stderr.
///
/// This is a pure IO shell around [`DispatchCore`], which decides when to
/// stop. Channel `i` belongs to command `i` of the core.
pub struct Dispatcher<O, E> {
    core: DispatchCore,
    channels: StreamMap<usize, ChannelStream>,
    stdout: O,
    stderr: E,
}

impl<O, E> fmt::Debug for Dispatcher<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("core", &self.core)
            .field("live_channels", &self.channels.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher<Stdout, Stderr> {
    /// Dispatcher writing to the real stdout / stderr of this process.
    pub fn with_stdio(core: DispatchCore, channels: Vec<mpsc::Receiver<Line>>) -> Self {
        Self::new(core, channels, tokio::io::stdout(), tokio::io::stderr())
    }
}

impl<O, E> Dispatcher<O, E>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    pub fn new(
        core: DispatchCore,
        channels: Vec<mpsc::Receiver<Line>>,
        stdout: O,
        stderr: E,
    ) -> Self {
        debug_assert_eq!(core.len(), channels.len());

        let mut map = StreamMap::with_capacity(channels.len());
        for (index, rx) in channels.into_iter().enumerate() {
            let stream = ReceiverStream::new(rx)
                .map(Signal::Line)
                .chain(tokio_stream::once(Signal::Closed));
            map.insert(index, Box::pin(stream) as ChannelStream);
        }

        Self {
            core,
            channels: map,
            stdout,
            stderr,
        }
    }

    /// Main loop.
    ///
    /// - Waits on all live channels at once; no channel has priority.
    /// - Writes each line verbatim to the matching parent stream.
    /// - Stops at the first closure of a command with an exit code, or when
    ///   every channel has closed.
    ///
    /// Returning does not touch children that are still running.
    pub async fn run(mut self) -> Result<Termination> {
        if let Step::Exit(termination) = self.core.start() {
            info!("no commands to run");
            return Ok(termination);
        }

        while let Some((index, signal)) = self.channels.next().await {
            match signal {
                Signal::Line(line) => self.write_line(&line).await?,
                Signal::Closed => {
                    debug!(
                        command = index,
                        remaining = self.core.open_channels().saturating_sub(1),
                        "command channel closed"
                    );
                    if let Step::Exit(termination) = self.core.on_closed(index) {
                        info!(?termination, "dispatcher finished");
                        return Ok(termination);
                    }
                }
            }
        }

        // Every stream ends with its `Closed` signal, so the core has
        // already reported `AllClosed` by the time the map runs dry.
        Ok(Termination::AllClosed)
    }

    async fn write_line(&mut self, line: &Line) -> Result<()> {
        if line.kind.is_error_stream() {
            self.stderr.write_all(line.text.as_bytes()).await?;
            self.stderr.flush().await?;
        } else {
            self.stdout.write_all(line.text.as_bytes()).await?;
            self.stdout.flush().await?;
        }
        Ok(())
    }
}

use mux::types::Line;
use tokio::sync::mpsc;

/// A channel that delivers `lines` and then closes, the way a supervisor's
/// channel does once its child has exited.
pub fn scripted_channel(lines: Vec<Line>) -> mpsc::Receiver<Line> {
    let (tx, rx) = mpsc::channel(lines.len().max(1));
    for line in lines {
        tx.try_send(line).expect("scripted channel has room for every line");
    }
    rx
}

/// A channel that stays open until the returned sender is dropped.
///
/// Stands in for a command that is still running.
pub fn held_channel() -> (mpsc::Sender<Line>, mpsc::Receiver<Line>) {
    mpsc::channel(16)
}

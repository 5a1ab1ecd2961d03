// tests/emitter.rs

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::sync::mpsc;

use mux::config::DisplayConfig;
use mux::exec::{LineEmitter, LineFormatter};
use mux::types::{Line, LineKind};
use mux_test_utils::{drain, init_tracing, with_timeout};

/// Reader that fails on the first read.
struct FailingReader;

impl AsyncRead for FailingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("pipe exploded")))
    }
}

fn emitter(kind: LineKind, name: Option<&str>) -> (LineEmitter, mpsc::Receiver<Line>) {
    let display = DisplayConfig::from_names([name]);
    let formatter = Arc::new(LineFormatter::new(name, &display));
    let (tx, rx) = mpsc::channel(16);
    (LineEmitter::new("test", kind, formatter, tx), rx)
}

#[tokio::test]
async fn records_are_split_on_newline_and_trailing_partial_is_kept() {
    init_tracing();

    let (emitter, rx) = emitter(LineKind::Stdout, None);
    let forwarded = emitter.run(&b"a\nb\nc"[..]).await;

    assert_eq!(forwarded, 3);
    let lines = with_timeout(drain(rx)).await;
    assert_eq!(
        lines,
        vec![
            Line::new(LineKind::Stdout, "| a\n"),
            Line::new(LineKind::Stdout, "| b\n"),
            Line::new(LineKind::Stdout, "| c"),
        ]
    );
}

#[tokio::test]
async fn empty_stream_emits_nothing() {
    let (emitter, rx) = emitter(LineKind::Stderr, None);
    assert_eq!(emitter.run(&b""[..]).await, 0);
    assert!(with_timeout(drain(rx)).await.is_empty());
}

#[tokio::test]
async fn blank_lines_are_records_too() {
    let (emitter, rx) = emitter(LineKind::Stderr, Some("w"));
    emitter.run(&b"\n\nx\n"[..]).await;

    let texts: Vec<_> = with_timeout(drain(rx)).await.into_iter().map(|l| l.text).collect();
    assert_eq!(texts, vec!["w | \n", "w | \n", "w | x\n"]);
}

#[tokio::test]
async fn colour_codes_are_stripped_before_forwarding() {
    let (emitter, rx) = emitter(LineKind::Stdout, Some("foo"));
    emitter.run(&b"\x1b[31mred\x1b[0m\n"[..]).await;

    let lines = with_timeout(drain(rx)).await;
    assert_eq!(lines, vec![Line::new(LineKind::Stdout, "foo | red\n")]);
}

#[tokio::test]
async fn invalid_utf8_is_replaced_not_dropped() {
    let (emitter, rx) = emitter(LineKind::Stdout, None);
    emitter.run(&b"ok\xff\n"[..]).await;

    let lines = with_timeout(drain(rx)).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "| ok\u{fffd}\n");
}

#[tokio::test]
async fn read_error_becomes_one_auxiliary_line() {
    init_tracing();

    let (emitter, rx) = emitter(LineKind::Stdout, None);
    let reader = (&b"before\n"[..]).chain(FailingReader);
    let forwarded = emitter.run(reader).await;

    assert_eq!(forwarded, 1);
    let lines = with_timeout(drain(rx)).await;
    assert_eq!(
        lines,
        vec![
            Line::new(LineKind::Stdout, "| before\n"),
            Line::new(LineKind::Auxiliary, "! pipe exploded\n"),
        ]
    );
}

#[tokio::test]
async fn emitter_stops_when_receiver_is_gone() {
    let (emitter, rx) = emitter(LineKind::Stdout, None);
    drop(rx);

    let forwarded = with_timeout(emitter.spawn(&b"a\nb\n"[..])).await.unwrap();
    assert_eq!(forwarded, 0);
}

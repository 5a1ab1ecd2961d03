// tests/dispatcher.rs

use std::time::Duration;

use tokio::time::timeout;

use mux::engine::{DispatchCore, Dispatcher, Termination};
use mux::types::{Line, LineKind};
use mux_test_utils::fake_supervisor::{held_channel, scripted_channel};
use mux_test_utils::{init_tracing, with_timeout};

fn out(text: &str) -> Line {
    Line::new(LineKind::Stdout, text)
}

fn err(text: &str) -> Line {
    Line::new(LineKind::Stderr, text)
}

fn aux(text: &str) -> Line {
    Line::new(LineKind::Auxiliary, text)
}

#[tokio::test]
async fn lines_are_routed_by_kind() {
    init_tracing();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let channels = vec![scripted_channel(vec![
        out("| one\n"),
        err("| two\n"),
        aux("! three\n"),
        out("| four"),
    ])];

    let termination = with_timeout(
        Dispatcher::new(DispatchCore::new(vec![None]), channels, &mut stdout, &mut stderr).run(),
    )
    .await
    .unwrap();

    assert_eq!(termination, Termination::AllClosed);
    assert_eq!(String::from_utf8(stdout).unwrap(), "| one\n| four");
    assert_eq!(String::from_utf8(stderr).unwrap(), "| two\n! three\n");
}

#[tokio::test]
async fn order_within_a_channel_is_preserved_across_channels() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let channels = vec![
        scripted_channel(vec![out("a1\n"), out("a2\n"), out("a3\n")]),
        scripted_channel(vec![out("b1\n"), out("b2\n")]),
    ];

    let termination = with_timeout(
        Dispatcher::new(
            DispatchCore::new(vec![None, None]),
            channels,
            &mut stdout,
            &mut stderr,
        )
        .run(),
    )
    .await
    .unwrap();

    assert_eq!(termination.exit_code(), 0);

    let written = String::from_utf8(stdout).unwrap();
    let a: Vec<_> = written.lines().filter(|l| l.starts_with('a')).collect();
    let b: Vec<_> = written.lines().filter(|l| l.starts_with('b')).collect();
    assert_eq!(a, vec!["a1", "a2", "a3"]);
    assert_eq!(b, vec!["b1", "b2"]);
    assert!(stderr.is_empty());
}

#[tokio::test]
async fn no_channels_terminates_immediately() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let termination = with_timeout(
        Dispatcher::new(DispatchCore::new(vec![]), vec![], &mut stdout, &mut stderr).run(),
    )
    .await
    .unwrap();

    assert_eq!(termination, Termination::AllClosed);
    assert!(stdout.is_empty() && stderr.is_empty());
}

#[tokio::test]
async fn forced_exit_does_not_wait_for_running_commands() {
    init_tracing();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    // Command 0 is still running for the whole test.
    let (_running, still_open) = held_channel();
    let finished = scripted_channel(vec![out("done\n")]);

    let termination = with_timeout(
        Dispatcher::new(
            DispatchCore::new(vec![None, Some(42)]),
            vec![still_open, finished],
            &mut stdout,
            &mut stderr,
        )
        .run(),
    )
    .await
    .unwrap();

    assert_eq!(
        termination,
        Termination::Forced {
            command: 1,
            code: 42
        }
    );
    assert_eq!(termination.exit_code(), 42);
    // Lines sent before the close are still written.
    assert_eq!(String::from_utf8(stdout).unwrap(), "done\n");
}

#[tokio::test]
async fn without_forced_exit_dispatcher_waits_for_every_channel() {
    let (tx, still_open) = held_channel();
    let finished = scripted_channel(vec![]);

    let dispatcher = Dispatcher::new(
        DispatchCore::new(vec![None, None]),
        vec![finished, still_open],
        tokio::io::sink(),
        tokio::io::sink(),
    );
    let handle = tokio::spawn(dispatcher.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished(), "one channel is still open");

    tx.send(out("late\n")).await.unwrap();
    drop(tx);

    let termination = with_timeout(handle).await.unwrap().unwrap();
    assert_eq!(termination, Termination::AllClosed);
}

#[tokio::test]
async fn first_forced_exit_to_close_wins() {
    let (tx_slow, slow) = held_channel();
    let fast = scripted_channel(vec![]);

    let dispatcher = Dispatcher::new(
        DispatchCore::new(vec![Some(7), Some(9)]),
        vec![slow, fast],
        tokio::io::sink(),
        tokio::io::sink(),
    );

    let termination = with_timeout(dispatcher.run()).await.unwrap();
    assert_eq!(termination.exit_code(), 9);

    // The still-running command's channel has been let go.
    assert!(timeout(Duration::from_millis(10), tx_slow.closed()).await.is_ok());
}

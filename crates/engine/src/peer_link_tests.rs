// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ricart_adapters::FakePeerAdapter;
use std::time::Duration;

fn stamp(clock: u64, pid: u32) -> Stamp {
    Stamp::new(clock, ProcessId(pid))
}

fn peers(ports: &[(u32, u16)]) -> Vec<(ProcessId, PeerAddress)> {
    ports
        .iter()
        .map(|(pid, port)| (ProcessId(*pid), PeerAddress::any(*port)))
        .collect()
}

fn drain(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn link_sends_request_and_forwards_reply() {
    let adapter = FakePeerAdapter::new();
    adapter.reply_from(":10002", "reply<4,2>");
    let (tx, mut rx) = mpsc::channel(8);

    let link = PeerLink::new(adapter.clone(), ProcessId(2), PeerAddress::any(10002), tx);
    let granted = link.run(stamp(3, 1)).await.unwrap();

    assert_eq!(granted, stamp(4, 2));
    assert_eq!(adapter.sent_to(":10002"), vec![b"req<3,1>".to_vec()]);
    assert_eq!(drain(&mut rx), vec![Event::PeerReply { stamp: stamp(4, 2) }]);
}

#[tokio::test]
async fn link_skips_malformed_and_foreign_datagrams() {
    let adapter = FakePeerAdapter::new();
    for payload in ["garbage", "reply<4,3>", "req<1,2>", "reply<x,2>", "reply<5,2>"] {
        adapter.reply_from(":10002", payload);
    }
    let (tx, mut rx) = mpsc::channel(8);

    let link = PeerLink::new(adapter, ProcessId(2), PeerAddress::any(10002), tx);
    let granted = link.run(stamp(3, 1)).await.unwrap();

    assert_eq!(granted, stamp(5, 2));
    assert_eq!(drain(&mut rx), vec![Event::PeerReply { stamp: stamp(5, 2) }]);
}

#[tokio::test]
async fn round_queues_enter_after_every_reply() {
    let adapter = FakePeerAdapter::new();
    adapter.reply_from(":10002", "reply<4,2>");
    adapter.reply_from(":10003", "reply<6,3>");
    let (tx, mut rx) = mpsc::channel(8);

    run_round(adapter, peers(&[(2, 10002), (3, 10003)]), stamp(3, 1), tx).await;

    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert!(events[..2]
        .iter()
        .all(|e| matches!(e, Event::PeerReply { .. })));
    assert_eq!(events[2], Event::Section(SectionLifecycle::Enter));
}

#[tokio::test]
async fn round_without_peers_enters_immediately() {
    let (tx, mut rx) = mpsc::channel(8);
    run_round(FakePeerAdapter::new(), Vec::new(), stamp(1, 1), tx).await;
    assert_eq!(drain(&mut rx), vec![Event::Section(SectionLifecycle::Enter)]);
}

#[tokio::test]
async fn failed_link_stalls_the_round() {
    let adapter = FakePeerAdapter::new();
    adapter.reply_from(":10002", "reply<4,2>");
    adapter.set_unreachable(":10003");
    let (tx, mut rx) = mpsc::channel(8);

    run_round(adapter, peers(&[(2, 10002), (3, 10003)]), stamp(3, 1), tx).await;

    assert_eq!(drain(&mut rx), vec![Event::PeerReply { stamp: stamp(4, 2) }]);
}

#[tokio::test]
async fn round_waits_for_a_deferring_peer() {
    let adapter = FakePeerAdapter::new();
    adapter.reply_from(":10002", "reply<4,2>");
    let (tx, mut rx) = mpsc::channel(8);

    let round = tokio::spawn(run_round(
        adapter.clone(),
        peers(&[(2, 10002), (3, 10003)]),
        stamp(3, 1),
        tx,
    ));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!round.is_finished());
    assert_eq!(drain(&mut rx), vec![Event::PeerReply { stamp: stamp(4, 2) }]);

    // Peer 3 releases the section and flushes its deferred reply
    adapter.reply_from(":10003", "reply<9,3>");
    tokio::time::timeout(Duration::from_secs(2), round)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        drain(&mut rx),
        vec![
            Event::PeerReply { stamp: stamp(9, 3) },
            Event::Section(SectionLifecycle::Enter),
        ]
    );
}

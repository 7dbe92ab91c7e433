//! Section display service specs

use crate::prelude::*;
use std::net::UdpSocket;
use std::time::Duration;

#[test]
fn help_shows_options() {
    Workspace::empty()
        .section()
        .args(&["--help"])
        .passes()
        .stdout_has("--bind")
        .stdout_has("--format");
}

#[test]
fn taken_port_fails_to_start() {
    let taken = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    Workspace::empty()
        .section()
        .args(&["--bind", &addr])
        .fails()
        .code(1);
}

#[test]
fn prints_interactions_as_they_arrive() {
    let ws = Workspace::empty();
    let port = free_port();
    let section = ws.spawn_section(port, &[]);

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender
        .send_to(b"cs<7,2>(interaction with cs begins)", ("127.0.0.1", port))
        .unwrap();
    sender.send_to(b"not a message", ("127.0.0.1", port)).unwrap();
    sender
        .send_to(b"cs<7,2>(interaction with cs ends)", ("127.0.0.1", port))
        .unwrap();

    similar_asserts::assert_eq!(
        section.take_lines(2),
        vec![
            "[PID: 2, Clock: 7] interaction with cs begins".to_string(),
            "[PID: 2, Clock: 7] interaction with cs ends".to_string(),
        ]
    );
}

#[test]
fn json_format_prints_objects() {
    let ws = Workspace::empty();
    let port = free_port();
    let section = ws.spawn_section(port, &["--format", "json"]);

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender.send_to(b"cs<3,1>(hello)", ("127.0.0.1", port)).unwrap();

    let line = section.take_lines(1).remove(0);
    similar_asserts::assert_eq!(line, r#"{"pid":1,"clock":3,"text":"hello"}"#);
}

#[test]
fn log_file_is_written() {
    let ws = Workspace::empty();
    let port = free_port();
    let log = ws.path().join("logs").join("section.log");
    let section = ws.spawn_section(port, &["--log-file", log.to_str().unwrap()]);

    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
    sender.send_to(b"garbage", ("127.0.0.1", port)).unwrap();
    sender.send_to(b"cs<1,1>(after)", ("127.0.0.1", port)).unwrap();
    section.take_lines(1);

    // The appender flushes from a background thread
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    loop {
        let text = std::fs::read_to_string(&log).unwrap_or_default();
        if text.contains("skipping malformed datagram") {
            break;
        }
        assert!(
            std::time::Instant::now() < deadline,
            "log file missing warning:\n{}",
            text
        );
        std::thread::sleep(Duration::from_millis(50));
    }
}

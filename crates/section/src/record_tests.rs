// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn decodes_section_message() {
    let record = SectionRecord::decode(b"cs<12,3>(interaction with cs begins)").unwrap();
    assert_eq!(
        record,
        SectionRecord {
            pid: 3,
            clock: 12,
            text: "interaction with cs begins".to_string(),
        }
    );
}

#[test]
fn displays_pid_then_clock() {
    let record = SectionRecord {
        pid: 2,
        clock: 7,
        text: "hello".to_string(),
    };
    assert_eq!(record.to_string(), "[PID: 2, Clock: 7] hello");
}

#[test]
fn rejects_protocol_messages() {
    let err = SectionRecord::decode(b"req<1,1>").unwrap_err();
    assert!(matches!(err, RecordError::NotSection("req")));
}

#[test]
fn rejects_garbage() {
    assert!(matches!(
        SectionRecord::decode(b"cs<x,1>(hi)"),
        Err(RecordError::Parse(_))
    ));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn stamp(clock: u64, pid: u32) -> Stamp {
    Stamp::new(clock, ProcessId(pid))
}

#[test]
fn reply_fields_name_destination_and_requester() {
    let effect = Effect::Reply {
        to: ReplyTo("127.0.0.1:5000".parse().unwrap()),
        stamp: stamp(4, 1),
        requester: stamp(3, 2),
    };

    assert_eq!(effect.name(), "reply");
    let fields = effect.fields();
    assert!(fields.contains(&("to", "127.0.0.1:5000".to_string())));
    assert!(fields.contains(&("clock", "4".to_string())));
    assert!(fields.contains(&("requester", "3,2".to_string())));
}

#[test]
fn emit_field_carries_notice_name() {
    let effect = Effect::Emit(Notice::Released { flushed: 2 });
    assert_eq!(effect.name(), "emit");
    assert_eq!(effect.fields(), vec![("notice", "section:released".to_string())]);
}

#[test]
fn notice_serializes_with_tag() {
    let notice = Notice::TriggerIgnored {
        state: ProcessState::Held,
    };
    let json = serde_json::to_value(&notice).unwrap();
    assert_eq!(json["notice"], "trigger_ignored");
    assert_eq!(json["state"], "held");
}

#[test]
fn effect_names_are_stable_span_labels() {
    let names: Vec<&str> = [
        Effect::Broadcast {
            request: stamp(1, 1),
        },
        Effect::EnterSection {
            request: stamp(1, 1),
        },
        Effect::ExitSection,
    ]
    .iter()
    .map(TracedEffect::name)
    .collect();
    assert_eq!(names, vec!["broadcast", "enter_section", "exit_section"]);
}

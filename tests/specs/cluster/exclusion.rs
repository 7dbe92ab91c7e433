//! Mutual exclusion across real processes
//!
//! Each scenario runs `ricart-section` plus one `ricart` per process and
//! reads the interactions the section service prints.

use crate::prelude::*;

fn ricart_args(id: usize, addresses: &[String], section: u16) -> Vec<String> {
    let mut args = vec![id.to_string()];
    args.extend(addresses.iter().cloned());
    args.extend([
        "--section".to_string(),
        format!("127.0.0.1:{}", section),
        "--hold".to_string(),
        "50ms".to_string(),
    ]);
    args
}

#[test]
fn single_process_enters_on_keyword() {
    let ws = Workspace::empty();
    let section_port = free_port();
    let section = ws.spawn_section(section_port, &[]);

    let addresses = vec!["127.0.0.1:0".to_string()];
    let mut process = ws.spawn_ricart(&ricart_args(1, &addresses, section_port));
    process.type_line("x");

    similar_asserts::assert_eq!(
        section.take_lines(2),
        vec![
            format!("[PID: 1, Clock: 1] {}", BEGINS),
            format!("[PID: 1, Clock: 1] {}", ENDS),
        ]
    );
}

#[test]
fn competing_processes_take_turns() {
    let ws = Workspace::empty();
    let section_port = free_port();
    let section = ws.spawn_section(section_port, &[]);

    let addresses: Vec<String> = (0..3)
        .map(|_| format!("127.0.0.1:{}", free_port()))
        .collect();
    let mut processes: Vec<Background> = (1..=3)
        .map(|id| ws.spawn_ricart(&ricart_args(id, &addresses, section_port)))
        .collect();

    // Give every process time to bind its listen socket
    std::thread::sleep(std::time::Duration::from_millis(500));
    for process in &mut processes {
        process.type_line("x");
    }

    let lines = section.take_lines(6);
    let mut entered = Vec::new();
    for pair in lines.chunks(2) {
        let begin = pair[0].strip_suffix(BEGINS).unwrap_or_else(|| {
            panic!("expected a begin line, got {:?}", lines);
        });
        let end = pair[1].strip_suffix(ENDS).unwrap_or_else(|| {
            panic!("expected an end line, got {:?}", lines);
        });
        similar_asserts::assert_eq!(begin, end);
        entered.push(begin.to_string());
    }

    entered.sort();
    entered.dedup_by(|a, b| a.split(',').next() == b.split(',').next());
    similar_asserts::assert_eq!(entered.len(), 3, "lines: {:?}", lines);
}

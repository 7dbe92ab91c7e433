//! CLI usage specs
//!
//! Bad positional arguments are reported on stderr with exit code 1.

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    Workspace::empty()
        .ricart()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage: ricart")
        .stdout_has("<ID>")
        .stdout_has("<ADDRESSES>...");
}

#[test]
fn no_arguments_prints_usage() {
    Workspace::empty()
        .ricart()
        .fails()
        .code(1)
        .stderr_has("Usage: ricart");
}

#[test]
fn id_without_addresses_prints_usage() {
    Workspace::empty()
        .ricart()
        .args(&["1"])
        .fails()
        .code(1)
        .stderr_has("Usage: ricart");
}

#[test]
fn non_numeric_id_is_rejected() {
    Workspace::empty()
        .ricart()
        .args(&["first", ":10001", ":10002"])
        .fails()
        .code(1)
        .stderr_has("error: invalid id: first");
}

#[test]
fn zero_id_is_out_of_range() {
    Workspace::empty()
        .ricart()
        .args(&["0", ":10001", ":10002"])
        .fails()
        .code(1)
        .stderr_has("invalid id: 0")
        .stderr_has("valid ids are 1..=2");
}

#[test]
fn id_past_the_address_list_is_out_of_range() {
    Workspace::empty()
        .ricart()
        .args(&["3", ":10001", ":10002"])
        .fails()
        .code(1)
        .stderr_has("invalid id: 3");
}

#[test]
fn malformed_address_is_rejected() {
    Workspace::empty()
        .ricart()
        .args(&["1", ":10001", "localhost"])
        .fails()
        .code(1)
        .stderr_has("invalid address 'localhost'")
        .stderr_has("HOST:PORT");
}

#[test]
fn unparseable_hold_is_rejected() {
    Workspace::empty()
        .ricart()
        .args(&["--hold", "forever", "1", ":10001"])
        .fails()
        .code(1)
        .stderr_has("--hold");
}

#[test]
fn taken_listen_port_is_fatal() {
    let taken = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    Workspace::empty()
        .ricart()
        .args(&["1", &addr])
        .fails()
        .code(1)
        .stderr_has(&format!("cannot listen on {}", addr));
}

//! CLI configuration specs
//!
//! Settings come from --config, then RICART_CONFIG, then the user config dir.

use crate::prelude::*;

#[test]
fn missing_config_file_is_reported() {
    let ws = Workspace::empty();
    let path = ws.path().join("absent.toml");

    ws.ricart()
        .args(&["--config", path.to_str().unwrap(), "1", ":0"])
        .fails()
        .code(1)
        .stderr_has("invalid configuration")
        .stderr_has("absent.toml");
}

#[test]
fn environment_config_is_read() {
    let ws = Workspace::empty();
    let path = ws.config("env.toml", "colour = \"blue\"\n");

    ws.ricart()
        .env("RICART_CONFIG", &path)
        .args(&["1", ":0"])
        .fails()
        .code(1)
        .stderr_has("unknown field `colour`");
}

#[test]
fn flag_wins_over_environment() {
    let ws = Workspace::empty();
    let broken = ws.config("broken.toml", "hold = 3\n");
    let flagged = ws.config("flagged.toml", "request_keyword = \"\"\n");

    ws.ricart()
        .env("RICART_CONFIG", &broken)
        .args(&["--config", flagged.to_str().unwrap(), "1", ":0"])
        .fails()
        .code(1)
        .stderr_has("request_keyword");
}

#[test]
fn user_config_dir_is_read() {
    let ws = Workspace::empty();
    std::fs::create_dir_all(ws.path().join("ricart")).unwrap();
    std::fs::write(
        ws.path().join("ricart").join("config.toml"),
        "event_buffer = 0\n",
    )
    .unwrap();

    ws.ricart()
        .args(&["1", ":0"])
        .fails()
        .code(1)
        .stderr_has("event_buffer");
}

#[test]
fn invalid_keyword_flag_is_reported() {
    Workspace::empty()
        .ricart()
        .args(&["--keyword", " x", "1", ":0"])
        .fails()
        .code(1)
        .stderr_has("fix the value of 'request_keyword'");
}

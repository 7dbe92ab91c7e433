//! Shared helpers for the behavioral specs

use assert_cmd::Command;
use std::io::{BufRead, BufReader, Write};
use std::net::UdpSocket;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub const BEGINS: &str = "interaction with cs begins";
pub const ENDS: &str = "interaction with cs ends";

/// An isolated home directory, so no user config leaks into a run
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write a settings file and return its path
    pub fn config(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn ricart(&self) -> Cli {
        Cli {
            cmd: self.command("ricart"),
        }
    }

    pub fn section(&self) -> Cli {
        Cli {
            cmd: self.command("ricart-section"),
        }
    }

    /// Start `ricart-section` on `port` and wait until it displays datagrams
    pub fn spawn_section(&self, port: u16, extra: &[&str]) -> Background {
        let mut args = vec!["--bind".to_string(), format!("127.0.0.1:{}", port)];
        args.extend(extra.iter().map(|s| s.to_string()));
        let mut section = self.spawn("ricart-section", &args);

        let probe = UdpSocket::bind("127.0.0.1:0").unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            probe
                .send_to(b"cs<0,0>(probe)", ("127.0.0.1", port))
                .unwrap();
            if section.lines.recv_timeout(Duration::from_millis(100)).is_ok() {
                break;
            }
            assert!(Instant::now() < deadline, "section service never came up");
        }
        // Late duplicates of the probe
        std::thread::sleep(Duration::from_millis(200));
        while section.lines.try_recv().is_ok() {}
        section
    }

    /// Start a `ricart` process with piped stdin
    pub fn spawn_ricart(&self, args: &[String]) -> Background {
        self.spawn("ricart", args)
    }

    fn spawn(&self, bin: &str, args: &[String]) -> Background {
        let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin(bin))
            .args(args)
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("RICART_CONFIG")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let (tx, lines) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { return };
                if tx.send(line).is_err() {
                    return;
                }
            }
        });

        let stdin = child.stdin.take();
        Background {
            child,
            stdin,
            lines,
        }
    }

    fn command(&self, bin: &str) -> Command {
        let mut cmd = Command::cargo_bin(bin).unwrap();
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("RICART_CONFIG")
            .env("RUST_LOG", "warn")
            .timeout(Duration::from_secs(10));
        cmd
    }
}

/// A free loopback UDP port
pub fn free_port() -> u16 {
    UdpSocket::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr:\n{}",
            run.output.status.code(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit code
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn code(self, expected: i32) -> Self {
        similar_asserts::assert_eq!(self.output.status.code(), Some(expected));
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            stderr
        );
        self
    }
}

/// A long-running child, killed on drop
pub struct Background {
    child: Child,
    stdin: Option<ChildStdin>,
    pub lines: mpsc::Receiver<String>,
}

impl Background {
    /// Type a line on the child's stdin
    pub fn type_line(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().unwrap();
        writeln!(stdin, "{}", line).unwrap();
        stdin.flush().unwrap();
    }

    /// Collect `count` stdout lines, failing after a generous timeout
    pub fn take_lines(&self, count: usize) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(15);
        let mut lines = Vec::new();
        while lines.len() < count {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(left) {
                Ok(line) => lines.push(line),
                Err(_) => panic!("got {} of {} lines: {:?}", lines.len(), count, lines),
            }
        }
        lines
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}


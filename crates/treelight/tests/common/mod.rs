//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Path of the treelight binary built for this test run
pub fn treelight_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_treelight"))
}

fn command_in(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(treelight_binary());
    command
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    command
}

/// Run the treelight binary in the specified directory
pub fn run_treelight_in_dir(dir: &Path, args: &[&str]) -> Output {
    command_in(dir, args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute treelight binary")
}

/// Run the treelight binary with `input` on stdin
pub fn run_treelight_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = command_in(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn treelight binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for treelight")
}

/// Write `treesitter/<language>/highlights.scm` under `root`
pub fn write_query(root: &Path, language: &str, query: &str) {
    let dir = root.join("treesitter").join(language);
    std::fs::create_dir_all(&dir).expect("Failed to create language directory");
    std::fs::write(dir.join("highlights.scm"), query).expect("Failed to write query");
}

/// Remove every `<span ...>` and `</span>` tag, then undo HTML escaping
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let close = rest[open..].find('>').expect("unterminated tag") + open;
        rest = &rest[close + 1..];
    }
    text.push_str(rest);

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

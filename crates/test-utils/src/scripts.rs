//! Builders for fake pipeline scripts.
//!
//! The launcher runs `<python> <script_dir>/<name> <data_path>`. The fakes
//! written here are plain shell scripts executed with `sh` standing in as
//! the interpreter, emitting the same JSON-line stream the real Python
//! scripts produce. `sh` reads the script by path, so no exec bit is
//! needed.

use std::fs;
use std::path::Path;

use rfpipe::context::SharedContext;
use rfpipe::types::ScriptKind;
use tempfile::TempDir;

/// Write a fake script with the given shell `body` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("write fake script");
}

/// Shell body that emits each line on stdout and exits 0.
pub fn emit_lines(lines: &[&str]) -> String {
    let mut body = String::from("#!/bin/sh\n");
    for line in lines {
        body.push_str("echo '");
        body.push_str(line);
        body.push_str("'\n");
    }
    body
}

/// Build a context whose two scripts are shell fakes run via `sh`.
///
/// Returns the tempdir guard alongside the context; dropping the guard
/// removes the scripts.
pub fn context_with_scripts(formatter_body: &str, trainer_body: &str) -> (TempDir, SharedContext) {
    let root = TempDir::new().expect("create tempdir");
    let script_dir = root.path().join("pySetup");
    let data_dir = root.path().join("input");
    fs::create_dir_all(&script_dir).expect("create script dir");
    fs::create_dir_all(&data_dir).expect("create data dir");

    write_script(
        &script_dir,
        ScriptKind::DataFormatter.file_name(),
        formatter_body,
    );
    write_script(&script_dir, ScriptKind::Trainer.file_name(), trainer_body);
    fs::write(data_dir.join("iris.csv"), "sepal_length,species\n5.1,setosa\n")
        .expect("write data file");

    let ctx = SharedContext::new(script_dir, data_dir, "iris.csv", "sh");
    (root, ctx)
}

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_studentformd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn studentformd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn row_count(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    table: &str,
) -> usize {
    let state = request(stdin, reader, id, "form.state", json!({}));
    state
        .get("result")
        .and_then(|r| r.get(table))
        .and_then(|t| t.get("rows"))
        .and_then(|v| v.as_array())
        .map(|a| a.len())
        .expect("table rows in state")
}

#[test]
fn tenth_add_is_rejected_and_leaves_state_unchanged() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request(&mut stdin, &mut reader, "open", "form.open", json!({}));
    assert_eq!(row_count(&mut stdin, &mut reader, "s0", "past"), 6);

    // Six initial rows plus five manual attempts: only three fit under
    // the capacity of nine.
    let mut rejected = 0;
    for i in 0..5 {
        let resp = request(
            &mut stdin,
            &mut reader,
            &format!("add-{}", i),
            "rows.add",
            json!({ "table": "past" }),
        );
        let ok = resp.get("ok").and_then(|v| v.as_bool()).unwrap_or(false);
        if i < 3 {
            assert!(ok, "add {} should succeed: {}", i, resp);
            assert_eq!(
                resp.get("result")
                    .and_then(|r| r.get("rows"))
                    .and_then(|v| v.as_u64()),
                Some(7 + i as u64)
            );
        } else {
            assert!(!ok, "add {} should be rejected: {}", i, resp);
            let error = resp.get("error").expect("error envelope");
            assert_eq!(
                error.get("code").and_then(|v| v.as_str()),
                Some("capacity_exceeded")
            );
            // The user notification text, surfaced once per attempt.
            assert_eq!(
                error.get("message").and_then(|v| v.as_str()),
                Some("Max courses reached")
            );
            rejected += 1;
        }
    }
    assert_eq!(rejected, 2);
    assert_eq!(row_count(&mut stdin, &mut reader, "s1", "past"), 9);

    // The bound is per table: the current table is untouched.
    assert_eq!(row_count(&mut stdin, &mut reader, "s2", "current"), 6);
    let resp = request(
        &mut stdin,
        &mut reader,
        "add-current",
        "rows.add",
        json!({ "table": "current" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn rows_add_requires_an_open_form() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "rows.add",
        json!({ "table": "past" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        resp.get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("no_form")
    );
}

#[test]
fn rows_add_rejects_unknown_table() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request(&mut stdin, &mut reader, "open", "form.open", json!({}));
    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "rows.add",
        json!({ "table": "failed" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        resp.get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("bad_params")
    );
}

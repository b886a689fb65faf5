use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

const GO_TEMPLATE: &str = "# Created by gitignore.io\n*.exe\n*.test\n";

/// Starts a stub gitignore API answering `requests` requests, returning its base URL.
fn stub_api(requests: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api", listener.local_addr().unwrap());
    thread::spawn(move || {
        for stream in listener.incoming().take(requests) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            let path = request_line.split_whitespace().nth(1).unwrap_or_default();
            let (status, body) = match path {
                "/api/list" => ("200 OK", "go,python\nrust\n".to_string()),
                "/api/go" => ("200 OK", GO_TEMPLATE.to_string()),
                "/api/go,rust" => ("200 OK", format!("{}# rust\n/target\n", GO_TEMPLATE)),
                "/api/broken" => ("500 Internal Server Error", String::new()),
                _ => ("404 Not Found", String::new()),
            };
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
        }
    });
    url
}

fn read_gitignore(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join(".gitignore")).unwrap()
}

fn gi(dir: &TempDir, api: &str) -> Command {
    let mut cmd = Command::cargo_bin("gi").unwrap();
    cmd.current_dir(dir.path()).env("GI_API_URL", api);
    cmd
}

#[test]
fn test_creates_gitignore() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .arg("go")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created new .gitignore file."));

    assert_eq!(read_gitignore(&dir), GO_TEMPLATE);
}

#[test]
fn test_multiple_subjects() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api).args(["go", "rust"]).assert().success();

    let written = read_gitignore(&dir);
    assert_eq!(written, format!("{}# rust\n/target\n", GO_TEMPLATE));
}

#[test]
fn test_append_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), "A").unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .args(["--append", "go"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Appended templates"));

    assert_eq!(read_gitignore(&dir), format!("A{}", GO_TEMPLATE));
}

#[test]
fn test_overwrite_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), "old\n").unwrap();
    let api = stub_api(1);

    gi(&dir, &api).args(["-o", "go"]).assert().success();

    assert_eq!(read_gitignore(&dir), GO_TEMPLATE);
}

#[test]
fn test_existing_file_without_terminal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), "A").unwrap();
    let api = stub_api(1);

    gi(&dir, &api).arg("go").assert().code(1);

    assert_eq!(read_gitignore(&dir), "A");
}

#[test]
fn test_not_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), "A").unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .arg("NotARealLanguage123")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("NotARealLanguage123"));

    assert_eq!(read_gitignore(&dir), "A");
}

#[test]
fn test_fetch_failure() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api).arg("broken").assert().code(6);

    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn test_network_error() {
    let dir = TempDir::new().unwrap();
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    gi(&dir, &format!("http://127.0.0.1:{}/api", port))
        .arg("go")
        .assert()
        .code(2);
}

#[test]
fn test_print() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .args(["--print", "go"])
        .assert()
        .success()
        .stdout(GO_TEMPLATE);

    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn test_list() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .arg("--list")
        .assert()
        .success()
        .stdout("go\npython\nrust\n");
}

#[test]
fn test_list_filter() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api)
        .args(["--list", "PY"])
        .assert()
        .success()
        .stdout("python\n");
}

#[test]
fn test_list_with_subjects_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    gi(&dir, "http://127.0.0.1:9/api")
        .args(["go", "--list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_no_subjects_without_terminal() {
    let dir = TempDir::new().unwrap();
    let api = stub_api(1);

    gi(&dir, &api).assert().code(1);

    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();

    gi(&dir, "http://127.0.0.1:9/api")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--append"));
}

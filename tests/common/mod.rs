#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use tempfile::TempDir;

pub const APP_YAML: &str = "\
cache:
  enabled: true
  path: /tmp
database:
  host: localhost
  port: 5432
  credentials:
    username: user
    password: pass
";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let dir = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&dir).expect("create work dir");
        Self {
            _tmp: tmp,
            home,
            dir,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read output")
    }

    /// Writes `config.yaml` in the work dir. `include` is the YAML list body.
    pub fn write_config(&self, input: &str, output: &str, cache: Option<&Path>, include: &str) -> PathBuf {
        let cache = match cache {
            Some(p) => format!("cache:\n  enabled: true\n  path: {}\n", p.display()),
            None => String::new(),
        };
        self.write(
            "config.yaml",
            &format!("input: {}\noutput: {}\n{}include:\n{}", input, output, cache, include),
        )
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("yamltrimmer");
        cmd.current_dir(&self.dir)
            .env("HOME", &self.home)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("HTTPS_PROXY")
            .env_remove("https_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

/// Serves `count` HTTP requests on loopback. Answers 304 when `If-None-Match`
/// equals `etag`, otherwise 200 with `body`. Yields the `If-None-Match` values.
pub fn serve(
    count: usize,
    etag: &'static str,
    body: &'static str,
) -> (String, JoinHandle<Vec<Option<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/app.yaml", listener.local_addr().expect("addr"));
    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for stream in listener.incoming().take(count) {
            let mut stream = stream.expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut if_none_match = None;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).expect("read") == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("if-none-match") {
                        if_none_match = Some(value.trim().to_string());
                    }
                }
            }
            let response = if if_none_match.as_deref() == Some(etag) {
                format!(
                    "HTTP/1.1 304 Not Modified\r\nETag: {}\r\nConnection: close\r\n\r\n",
                    etag
                )
            } else {
                format!(
                    "HTTP/1.1 200 OK\r\nETag: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    etag,
                    body.len(),
                    body
                )
            };
            stream.write_all(response.as_bytes()).expect("write");
            seen.push(if_none_match);
        }
        seen
    });
    (url, handle)
}

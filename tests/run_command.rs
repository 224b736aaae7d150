//! Integration tests driving `run` end to end.
//!
//! None of these reach a database. Most invocations fail before a connection is
//! attempted; the rest connect to a local port with no MySQL server behind it.

use check_vspheredb_data::Host;
use core::time::Duration;
use std::fs;
use std::net::TcpListener;
use std::time::Instant;

/// Test host that captures output and the exit code.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        assert!(self.exit_code.is_none(), "exit called twice");
        self.exit_code = Some(code);
    }
}

async fn run(args: &[&str]) -> TestHost {
    let mut host = TestHost::default();
    let argv = std::iter::once("check_vspheredb_data").chain(args.iter().copied());
    let result = check_vspheredb_data::run(&mut host, argv).await;
    assert!(result.is_ok(), "run should report through the host: {result:?}");
    host
}

#[tokio::test]
async fn test_help_lists_every_check() {
    let host = run(&["--help"]).await;
    assert_eq!(host.exit_code, Some(0));

    let output = host.output_str();
    for check in ["cpu", "memory", "datastore", "hba", "nic", "temperature"] {
        assert!(output.contains(check), "help should mention '{check}': {output}");
    }
}

#[tokio::test]
async fn test_subcommand_help_exits_ok() {
    let host = run(&["datastore", "--help"]).await;
    assert_eq!(host.exit_code, Some(0));
    assert!(host.output_str().contains("--datastore"));
}

#[tokio::test]
async fn test_missing_machine_is_unknown() {
    let host = run(&["temperature", "--host", "db.example.com"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().starts_with("[UNKNOWN] - "));
    assert!(host.output_str().contains("--machine"));
}

#[tokio::test]
async fn test_bad_threshold_is_unknown() {
    let host = run(&["--machine", "esx1", "--host", "db.example.com", "datastore", "--critical", "abc"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().starts_with("[UNKNOWN] - "));
    assert!(host.output_str().contains("'abc'"));
    assert_eq!(host.output_str().lines().count(), 1);
}

#[tokio::test]
async fn test_inverted_lower_greater_than_upper_is_unknown() {
    let host = run(&["-m", "esx1", "-H", "db.example.com", "memory", "-w", "@20:10"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().contains("greater than upper bound"));
}

#[tokio::test]
async fn test_usage_error_is_unknown() {
    let host = run(&["cpu", "--no-such-flag"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().starts_with("[UNKNOWN] - "));
    assert!(!host.error_buf.is_empty());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_missing_credentials_file_is_unknown() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("credentials.json");

    let host = run(&[
        "-m",
        "esx1",
        "-H",
        "db.example.com",
        "-f",
        path.to_str().unwrap(),
        "nic",
    ])
    .await;

    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().contains("credentials.json"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_invalid_credentials_file_is_unknown() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("credentials.json");
    fs::write(&path, r#"{"username": "monitor"}"#).unwrap();

    let host = run(&["-m", "esx1", "-H", "db.example.com", "-f", path.to_str().unwrap(), "cpu"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().starts_with("[UNKNOWN] - "));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_invalid_config_file_is_unknown() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("check.toml");
    fs::write(&path, "[cpu]\nwarning = \"eighty\"\n").unwrap();

    let host = run(&["-m", "esx1", "-H", "db.example.com", "--config", path.to_str().unwrap(), "cpu"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().contains("check.toml"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_host_can_come_from_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("check.toml");

    // no --host flag: the configuration supplies it, so the check gets as far as the bad threshold
    fs::write(&path, "[database]\nhost = \"db.example.com\"\n").unwrap();

    let host = run(&["-m", "esx1", "--config", path.to_str().unwrap(), "temperature", "-c", "60:50"]).await;
    assert_eq!(host.exit_code, Some(3));
    assert!(host.output_str().contains("'60:50'"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_config_syntax_error_is_one_line() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("check.toml");
    fs::write(&path, "[cpu]\nwarning = \n").unwrap();

    let host = run(&["-m", "esx1", "-H", "db.example.com", "--config", path.to_str().unwrap(), "cpu"]).await;
    assert_eq!(host.exit_code, Some(3));

    let output = host.output_str();
    assert_eq!(output.lines().count(), 1, "{output}");
    assert!(output.contains("check.toml"));
    assert!(output.contains("line 2"));
}

#[tokio::test]
async fn test_refused_connection_fails_fast() {
    // nothing listens on port 1
    let start = Instant::now();
    let host = run(&["-m", "esx1", "-H", "127.0.0.1", "-p", "1", "--timeout", "20", "cpu"]).await;
    let elapsed = start.elapsed();

    assert_eq!(host.exit_code, Some(3));
    let output = host.output_str();
    assert!(output.starts_with("[UNKNOWN] - could not connect to database 'vspheredb' on 127.0.0.1:1"), "{output}");
    assert_eq!(output.lines().count(), 1);
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
}

#[tokio::test]
async fn test_silent_server_times_out() {
    // accepts the TCP handshake but never sends the MySQL greeting
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let start = Instant::now();
    let host = run(&["-m", "esx1", "-H", "127.0.0.1", "-p", &port, "--timeout", "1", "memory"]).await;
    let elapsed = start.elapsed();

    assert_eq!(host.exit_code, Some(3));
    let output = host.output_str();
    assert!(output.contains("check did not complete within 1s"), "{output}");
    assert_eq!(output.lines().count(), 1);
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
    drop(listener);
}

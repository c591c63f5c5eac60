//! End-to-end input resolution through the runner against a mock server

use aoc_companion::{
    AocClient, ConfigError, Day, DayConfig, DayInstance, InputFetcher, NOT_UNLOCKED_MESSAGE,
    Runner, TaskResult,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Counts non-empty lines
struct Day05;

impl Day for Day05 {
    type Data = Vec<String>;

    fn from_config(_config: &DayConfig) -> Result<Self, ConfigError> {
        Ok(Day05)
    }

    fn run_t1(&self, data: &mut Self::Data) -> Option<TaskResult> {
        Some(TaskResult::new(data.iter().filter(|l| !l.is_empty()).count()))
    }

    fn run_t2(&self, _data: &mut Self::Data) -> Option<TaskResult> {
        None
    }
}

fn runner_for(server: &mockito::Server, folder: &Path, session: &str) -> Runner {
    let client = AocClient::builder()
        .base_url(server.url())
        .unwrap()
        .build()
        .unwrap();
    let mut runner = Runner::new(2022, InputFetcher::new(client));
    runner
        .register(Box::new(
            DayInstance::new(Day05, 2022, folder).with_session(session),
        ))
        .unwrap();
    runner
}

#[test]
fn test_first_run_downloads_and_later_runs_use_cache() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/2022/day/5/input")
        .match_header("cookie", "session=0123abcd")
        .match_header("user-agent", "Mozilla/5.0")
        .with_status(200)
        .with_body("    [D]\n[N] [C]\n\nmove 1 from 2 to 1\n")
        .expect(1)
        .create();

    let temp = TempDir::new().unwrap();
    let runner = runner_for(&server, temp.path(), "0123abcd");

    let first = runner.run(&[5]).unwrap();
    let second = runner.run(&[5]).unwrap();

    assert_eq!(first[0].result(), "3");
    assert_eq!(second[0].result(), "3");
    assert!(temp.path().join("input.txt").is_file());
    mock.assert();
}

#[test]
fn test_cached_input_wins_over_invalid_session() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(400)
        .expect(0)
        .create();

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("input.txt"), "a\nb").unwrap();
    let runner = runner_for(&server, temp.path(), "expired");

    let results = runner.run(&[]).unwrap();
    assert_eq!(results[0].result(), "2");
    mock.assert();
}

#[test]
fn test_locked_puzzle_is_refetched_on_next_run() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/2022/day/5/input")
        .with_status(404)
        .with_body(format!("{}\n", NOT_UNLOCKED_MESSAGE))
        .expect(2)
        .create();

    let temp = TempDir::new().unwrap();
    let runner = runner_for(&server, temp.path(), "0123abcd");

    assert_eq!(runner.run(&[5]).unwrap()[0].result(), "0");
    assert!(!temp.path().join("input.txt").exists());
    assert_eq!(runner.run(&[5]).unwrap()[0].result(), "0");
    mock.assert();
}

// SPDX-License-Identifier: Apache-2.0

//! End-to-end reporter tests against a mock backend and AI endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;
use snitch_core::{
    AiConfig, AuxData, BackendConfig, ErrorReport, GithubBackend, LogValue, OpenRouterClient,
    Reporter, RouteEntry, WarnReport,
};

fn backend(server: &MockServer) -> GithubBackend {
    let config = BackendConfig::new(SecretString::from("test-token".to_string()), "octo", "widgets");
    GithubBackend::with_base_url(config, server.base_url()).expect("backend should construct")
}

fn ai_client(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_api_key(SecretString::from("test-key".to_string()), &AiConfig::default())
        .expect("AI client should construct")
        .with_api_url(format!("{}/ai/chat/completions", server.base_url()))
}

/// Polls until the mock has been hit `expected` times, or panics.
async fn wait_for_hits(mock: &httpmock::Mock<'_>, expected: usize) {
    for _ in 0..200 {
        if mock.hits() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("mock was hit {} times, expected {expected}", mock.hits());
}

#[tokio::test]
async fn development_mode_never_touches_the_network() {
    let server = MockServer::start();
    let any_post = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(json!({"number": 1}));
    });

    let reporter = Reporter::builder(backend(&server)).build();

    reporter.error(ErrorReport::new("disk full")).await;
    reporter.warn(WarnReport::new("low disk space").report_as_issue());
    reporter.log("noise");
    reporter.time_start("save", true);
    reporter.time_end("save").await;

    any_post.assert_hits(0);
}

#[tokio::test]
async fn failing_transport_resolves_and_still_invokes_hook() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues");
        then.status(500).body("backend down");
    });

    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hook_calls);
    let reporter = Reporter::builder(backend(&server))
        .production(true)
        .on_error(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    // Must not panic or propagate the transport failure.
    reporter.error(ErrorReport::new("disk full")).await;

    issue_mock.assert();
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn error_creates_issue_then_ai_comment() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/octo/widgets/issues")
            .json_body_includes(
                json!({"title": "Error disk full", "assignees": ["octo"], "labels": ["bug"]})
                    .to_string(),
            )
            .body_includes("## Important Data")
            .body_includes("|28|")
            .body_includes("## Routes");
        then.status(201).json_body(json!({"number": 7}));
    });
    let ai_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ai/chat/completions")
            .body_includes("Error disk full");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "try fsck"}}]
        }));
    });
    let comment_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/octo/widgets/issues/7/comments")
            .json_body_includes(json!({"body": "try fsck"}).to_string());
        then.status(201).json_body(json!({"id": 1}));
    });

    let reporter = Reporter::builder(backend(&server))
        .production(true)
        .ai(ai_client(&server))
        .build();

    let mut data = AuxData::new();
    data.insert("code".to_string(), json!(28));
    reporter
        .error(
            ErrorReport::new(LogValue::failure("disk full", "Error: disk full\n    at upload"))
                .with_data(data)
                .with_routes(vec![RouteEntry::new("upload", json!({"file": "a.png"}))])
                .with_labels(vec!["bug".to_string()]),
        )
        .await;

    issue_mock.assert();
    ai_mock.assert();
    comment_mock.assert();
}

#[tokio::test]
async fn empty_ai_answer_skips_the_comment() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues");
        then.status(201).json_body(json!({"number": 9}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/ai/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        }));
    });
    let comment_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues/9/comments");
        then.status(201).json_body(json!({"id": 1}));
    });

    let reporter = Reporter::builder(backend(&server))
        .production(true)
        .ai(ai_client(&server))
        .build();
    reporter.error(ErrorReport::new("boom")).await;

    issue_mock.assert();
    comment_mock.assert_hits(0);
}

#[tokio::test]
async fn ai_failure_still_leaves_the_issue() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues");
        then.status(201).json_body(json!({"number": 3}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/ai/chat/completions");
        then.status(500).body("model unavailable");
    });
    let comment_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues/3/comments");
        then.status(201).json_body(json!({"id": 1}));
    });

    let reporter = Reporter::builder(backend(&server))
        .production(true)
        .ai(ai_client(&server))
        .build();
    reporter.error(ErrorReport::new("boom")).await;

    issue_mock.assert();
    comment_mock.assert_hits(0);
}

#[tokio::test]
async fn issue_worthy_warning_dispatches_detached() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/octo/widgets/issues")
            .json_body_includes(json!({"title": "low disk space"}).to_string());
        then.status(201).json_body(json!({"number": 4}));
    });

    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hook_calls);
    let reporter = Reporter::builder(backend(&server))
        .production(true)
        .on_warn(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    reporter.warn(WarnReport::new("low disk space").report_as_issue());

    // Detached dispatch: the call returned immediately, delivery follows.
    wait_for_hits(&issue_mock, 1).await;
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unflagged_warning_never_dispatches() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues");
        then.status(201).json_body(json!({"number": 4}));
    });

    let reporter = Reporter::builder(backend(&server)).production(true).build();
    reporter.warn(WarnReport::new("low disk space"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    issue_mock.assert_hits(0);
}

#[tokio::test]
async fn timer_dispatches_exactly_once() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/octo/widgets/issues")
            .body_includes("save ")
            .body_includes("ms");
        then.status(201).json_body(json!({"number": 5}));
    });

    let reporter = Reporter::builder(backend(&server)).production(true).build();

    reporter.time_start("save", true);
    tokio::time::sleep(Duration::from_millis(5)).await;
    reporter.time_end("save").await;
    issue_mock.assert_hits(1);

    // The entry was consumed; a second stop is a no-op.
    reporter.time_end("save").await;
    issue_mock.assert_hits(1);
}

#[tokio::test]
async fn timer_without_issue_flag_records_nothing() {
    let server = MockServer::start();
    let issue_mock = server.mock(|when, then| {
        when.method(POST).path("/repos/octo/widgets/issues");
        then.status(201).json_body(json!({"number": 5}));
    });

    let reporter = Reporter::builder(backend(&server)).production(true).build();
    reporter.time_start("save", false);
    reporter.time_end("save").await;

    issue_mock.assert_hits(0);
}

// tests/message_routing.rs

//! Routing of subprocess messages to the console and diagnostic sinks.

#![cfg(unix)]

use std::sync::Arc;

use rfpipe::exec::launch_with_sink;
use rfpipe::messages::InboundMessage;
use rfpipe::types::ScriptKind;
use rfpipe_test_utils::scripts::{context_with_scripts, emit_lines};
use rfpipe_test_utils::sinks::{RecordingSink, SinkEvent};
use rfpipe_test_utils::{init_tracing, with_timeout};
use serde_json::json;

#[tokio::test]
async fn console_log_text_reaches_console_sink() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        &emit_lines(&[r#"{"type":"console.log","text":"hello"}"#]),
        "#!/bin/sh\n",
    );

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    let results = with_timeout(handle.wait()).await.expect("formatter run");

    assert_eq!(sink.console_texts(), vec!["hello".to_string()]);
    assert!(sink.diagnostics().is_empty());
    assert_eq!(
        results,
        vec![InboundMessage::ConsoleLog {
            text: "hello".to_string()
        }]
    );
}

#[tokio::test]
async fn unclassified_message_reaches_diagnostic_sink_unmodified() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        &emit_lines(&[r#"{"type":"progress","pct":50}"#]),
        "#!/bin/sh\n",
    );

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    with_timeout(handle.wait()).await.expect("formatter run");

    assert!(sink.console_texts().is_empty());
    assert_eq!(sink.diagnostics(), vec![json!({"type":"progress","pct":50})]);
}

#[tokio::test]
async fn message_without_type_goes_to_diagnostic_sink() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(&emit_lines(&[r#"{"pct":50}"#]), "#!/bin/sh\n");

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    with_timeout(handle.wait()).await.expect("formatter run");

    assert!(sink.console_texts().is_empty());
    assert_eq!(sink.diagnostics(), vec![json!({"pct":50})]);
}

#[tokio::test]
async fn messages_are_forwarded_in_arrival_order() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        &emit_lines(&[
            r#"{"type":"console.log","text":"one"}"#,
            r#"{"type":"progress","pct":50}"#,
            r#"{"type":"console.log","text":"two"}"#,
        ]),
        "#!/bin/sh\n",
    );

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    let results = with_timeout(handle.wait()).await.expect("formatter run");

    assert_eq!(
        sink.events(),
        vec![
            SinkEvent::ConsoleLog {
                script: ScriptKind::DataFormatter,
                text: "one".to_string()
            },
            SinkEvent::Diagnostic {
                script: ScriptKind::DataFormatter,
                message: json!({"type":"progress","pct":50})
            },
            SinkEvent::ConsoleLog {
                script: ScriptKind::DataFormatter,
                text: "two".to_string()
            },
        ]
    );
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn subprocess_with_no_output_completes_with_empty_results() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts("#!/bin/sh\n", "#!/bin/sh\n");

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    let results = with_timeout(handle.wait()).await.expect("formatter run");

    assert!(results.is_empty());
    assert!(sink.events().is_empty());
}

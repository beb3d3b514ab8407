// tests/launcher.rs

//! Launch mechanics: registration, result collection, termination.

#![cfg(unix)]

use std::sync::Arc;

use rfpipe::errors::TaskError;
use rfpipe::exec::{launch, launch_with_sink};
use rfpipe::messages::InboundMessage;
use rfpipe::types::ScriptKind;
use rfpipe_test_utils::scripts::{context_with_scripts, emit_lines};
use rfpipe_test_utils::sinks::RecordingSink;
use rfpipe_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn launch_registers_child_before_returning() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts("#!/bin/sh\nsleep 1\n", "#!/bin/sh\n");

    let handle = launch(&ctx, ScriptKind::DataFormatter);

    // The child is registered synchronously, while the subprocess is still
    // running.
    assert_eq!(ctx.children.len(), 1);
    assert_eq!(ctx.children.scripts(), vec![ScriptKind::DataFormatter]);
    assert!(ctx.children.pids()[0].is_some());

    with_timeout(handle.wait()).await.expect("formatter run");
}

#[tokio::test]
async fn two_launches_produce_two_independent_children() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        &emit_lines(&[r#"{"type":"console.log","text":"hello"}"#]),
        "#!/bin/sh\n",
    );

    let first_sink = Arc::new(RecordingSink::default());
    let second_sink = Arc::new(RecordingSink::default());
    let first = launch_with_sink(&ctx, ScriptKind::DataFormatter, first_sink.clone());
    let second = launch_with_sink(&ctx, ScriptKind::DataFormatter, second_sink.clone());

    assert_eq!(ctx.children.len(), 2);

    let first_results = with_timeout(first.wait()).await.expect("first run");
    let second_results = with_timeout(second.wait()).await.expect("second run");

    // Each handle has its own independently-ordered stream and result list.
    assert_eq!(first_results.len(), 1);
    assert_eq!(second_results.len(), 1);
    assert_eq!(first_sink.console_texts(), vec!["hello".to_string()]);
    assert_eq!(second_sink.console_texts(), vec!["hello".to_string()]);
}

#[tokio::test]
async fn collected_results_preserve_variants_and_order() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        "#!/bin/sh\n",
        &emit_lines(&[
            r#"{"type":"console.log","text":"fitting"}"#,
            r#"{"type":"score","value":0.93}"#,
            r#"{"type":"console.log","text":"done"}"#,
        ]),
    );

    let handle = launch(&ctx, ScriptKind::Trainer);
    let results = with_timeout(handle.wait()).await.expect("trainer run");

    assert_eq!(results.len(), 3);
    assert!(matches!(&results[0], InboundMessage::ConsoleLog { text } if text == "fitting"));
    assert!(matches!(&results[1], InboundMessage::Unrecognized(_)));
    assert!(matches!(&results[2], InboundMessage::ConsoleLog { text } if text == "done"));
}

#[tokio::test]
async fn malformed_line_fails_the_run_but_forwarding_continues() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts(
        &emit_lines(&[
            r#"{"type":"console.log","text":"before"}"#,
            "this is not json",
            r#"{"type":"console.log","text":"after"}"#,
        ]),
        "#!/bin/sh\n",
    );

    let sink = Arc::new(RecordingSink::default());
    let handle = launch_with_sink(&ctx, ScriptKind::DataFormatter, sink.clone());
    let err = with_timeout(handle.wait())
        .await
        .expect_err("malformed output must fail the run");

    assert!(matches!(
        err,
        TaskError::MalformedOutput { line, .. } if line == "this is not json"
    ));
    // Valid lines around the bad one were still forwarded.
    assert_eq!(
        sink.console_texts(),
        vec!["before".to_string(), "after".to_string()]
    );
}

#[tokio::test]
async fn nonzero_exit_wins_over_malformed_output() {
    init_tracing();

    let (_guard, ctx) =
        context_with_scripts("#!/bin/sh\necho 'not json'\nexit 2\n", "#!/bin/sh\n");

    let handle = launch(&ctx, ScriptKind::DataFormatter);
    let err = with_timeout(handle.wait())
        .await
        .expect_err("non-zero exit must fail the run");

    assert!(matches!(err, TaskError::Exit { code: 2, .. }));
}

#[tokio::test]
async fn terminate_all_kills_a_running_child() {
    init_tracing();

    let (_guard, ctx) = context_with_scripts("#!/bin/sh\nsleep 30\n", "#!/bin/sh\n");

    let handle = launch(&ctx, ScriptKind::DataFormatter);
    assert_eq!(ctx.children.terminate_all(), 1);

    let err = with_timeout(handle.wait())
        .await
        .expect_err("terminated run must not succeed");
    assert!(matches!(err, TaskError::Terminated { .. }));

    // The termination request was already consumed.
    assert_eq!(ctx.children.terminate_all(), 0);
}

//! End-to-end tests of the send-message workflow against the mock endpoint.

use std::sync::Arc;
use std::time::Duration;

use jobchat::{
    Conversation, InferenceOrchestrator, MockInferenceEndpoint, OutputEntry, PollPolicy, Sender,
    SendMessageUseCase, StatusReport, FAILURE_REPLY, NO_REPLY_FALLBACK,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn use_case_for(endpoint: Arc<MockInferenceEndpoint>) -> SendMessageUseCase {
    SendMessageUseCase::new(Arc::new(InferenceOrchestrator::new(endpoint)))
}

fn transcript(conversation: &Conversation) -> Vec<(&str, Sender)> {
    conversation
        .messages()
        .iter()
        .map(|m| (m.text(), m.sender()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn hello_round_trip_produces_user_and_bot_messages() {
    let endpoint = Arc::new(MockInferenceEndpoint::scripted(
        "x",
        vec![
            StatusReport::pending("IN_PROGRESS"),
            StatusReport::completed(vec![OutputEntry::assistant("hi")]),
        ],
    ));
    let use_case = use_case_for(endpoint.clone());
    let mut conversation = Conversation::new();

    let started = Instant::now();
    use_case
        .execute(&mut conversation, "hello", &CancellationToken::new())
        .await
        .expect("bot reply");

    assert_eq!(
        transcript(&conversation),
        vec![("hello", Sender::User), ("hi", Sender::Bot)]
    );
    assert_eq!(endpoint.poll_count(), 2);
    assert_eq!(started.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn failed_job_yields_generic_failure_message() {
    let endpoint = Arc::new(MockInferenceEndpoint::scripted(
        "x",
        vec![StatusReport::failed()],
    ));
    let use_case = use_case_for(endpoint);
    let mut conversation = Conversation::new();

    use_case
        .execute(&mut conversation, "hello", &CancellationToken::new())
        .await;

    let last = conversation.last().expect("bot message");
    assert_eq!(last.sender(), Sender::Bot);
    assert_eq!(last.text(), FAILURE_REPLY);
}

#[tokio::test(start_paused = true)]
async fn completed_without_assistant_uses_fallback_reply() {
    let endpoint = Arc::new(MockInferenceEndpoint::scripted(
        "x",
        vec![StatusReport::completed(vec![OutputEntry::new("user", "hello")])],
    ));
    let use_case = use_case_for(endpoint);
    let mut conversation = Conversation::new();

    let reply = use_case
        .execute(&mut conversation, "hello", &CancellationToken::new())
        .await
        .expect("bot reply");

    assert_eq!(reply.text(), NO_REPLY_FALLBACK);
}

#[tokio::test(start_paused = true)]
async fn whitespace_only_input_produces_nothing() {
    let endpoint = Arc::new(MockInferenceEndpoint::echo(0));
    let use_case = use_case_for(endpoint.clone());
    let mut conversation = Conversation::new();

    for input in ["", " ", "\n\t  "] {
        let reply = use_case
            .execute(&mut conversation, input, &CancellationToken::new())
            .await;
        assert!(reply.is_none());
    }

    assert!(conversation.is_empty());
    assert!(endpoint.submissions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stuck_job_times_out_into_failure_reply() {
    let endpoint = Arc::new(MockInferenceEndpoint::scripted(
        "x",
        vec![StatusReport::pending("IN_QUEUE")],
    ));
    let orchestrator = InferenceOrchestrator::new(endpoint)
        .with_policy(PollPolicy::default().with_timeout(Duration::from_secs(30)));
    let use_case = SendMessageUseCase::new(Arc::new(orchestrator));
    let mut conversation = Conversation::new();

    let started = Instant::now();
    let reply = use_case
        .execute(&mut conversation, "hello", &CancellationToken::new())
        .await
        .expect("bot reply");

    assert_eq!(reply.text(), FAILURE_REPLY);
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn sequential_messages_keep_submission_order() {
    let endpoint = Arc::new(MockInferenceEndpoint::echo(1));
    let use_case = use_case_for(endpoint.clone());
    let mut conversation = Conversation::new();

    for input in ["one", "two", "three"] {
        use_case
            .execute(&mut conversation, input, &CancellationToken::new())
            .await
            .expect("bot reply");
    }

    assert_eq!(
        transcript(&conversation),
        vec![
            ("one", Sender::User),
            ("echo: one", Sender::Bot),
            ("two", Sender::User),
            ("echo: two", Sender::Bot),
            ("three", Sender::User),
            ("echo: three", Sender::Bot),
        ]
    );
    assert!(conversation.pending_submissions().is_empty());
    assert_eq!(
        endpoint.submissions(),
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn user_message_is_recorded_before_the_reply_arrives() {
    let endpoint = Arc::new(MockInferenceEndpoint::scripted(
        "x",
        vec![StatusReport::pending("IN_PROGRESS")],
    ));
    let orchestrator = Arc::new(InferenceOrchestrator::new(endpoint).with_policy(
        PollPolicy::default().unbounded(),
    ));
    let mut conversation = Conversation::new();

    // Open the submission, then run the orchestration separately.
    let submission = conversation.begin_submission("hello").expect("accepted");
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.pending_submissions(), vec![submission]);

    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let cancel = cancel.clone();
        async move { orchestrator.run("hello", &cancel).await }
    });

    tokio::time::sleep(Duration::from_secs(5)).await;
    cancel.cancel();
    let result = handle.await.expect("join");
    assert!(result.unwrap_err().is_cancelled());

    conversation.record_reply(submission, FAILURE_REPLY);
    assert!(conversation.pending_submissions().is_empty());
}

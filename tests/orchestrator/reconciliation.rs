use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;

use novibe_activities::activity::ResponseEnvelope;
use novibe_activities::ledger::BalancePoller;

use crate::support::{Harness, RecordingAudit, Reply, ScriptedLedger, StubExecutor, request};

// Paused-clock timers fire on millisecond ticks.
fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {actual:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn word_of_the_day_end_to_end() {
    let h = Harness::new(
        StubExecutor::new(Reply::Text("Here's your word!")),
        ScriptedLedger::converging_on(2, json!({"points": 15})),
        RecordingAudit::new(),
    );

    let envelope = h
        .orchestrator
        .clone()
        .respond(request("bot_mentor", "word_of_the_day"))
        .await;

    let body = serde_json::to_value(&envelope).unwrap();
    assert_eq!(body["reply"], "Here's your word!");
    assert_eq!(body["xp_award"]["success"], true);
    assert_eq!(body["xp_amount"], 3);
    assert_eq!(body["xp_status"], json!({"points": 15}));
    assert_eq!(body["xp_status_resolved"], true);
    assert!(body.get("error").is_none());

    assert_eq!(h.ledger.read_count(), 2);
    assert_close(h.ledger.read_gaps()[0], Duration::from_secs(1));

    let awards = h.ledger.awards.lock().unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].email, "a@x.com");
    assert_eq!(awards[0].bot_id, "bot_mentor");
    assert_eq!(awards[0].xp_amount, 3);
    assert_eq!(awards[0].coin_amount, 0);
    assert_eq!(awards[0].reason, "Completed activity: word_of_the_day");

    let records = h.audit.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bot_response, "Here's your word!");
    assert_eq!(records[0].user_message, "hi");
    assert_eq!(records[0].platform, "game_activity");
}

#[tokio::test(start_paused = true)]
async fn unconverged_balance_returns_last_read_after_five_attempts() {
    let h = Harness::new(
        StubExecutor::new(Reply::Text("Nice one.")),
        ScriptedLedger::new(
            Some(json!({"success": true})),
            vec![Some(json!({"detail": "User XP not found"}))],
        ),
        RecordingAudit::new(),
    );
    let started = Instant::now();

    let completion = h
        .orchestrator
        .complete(&request("bot_friend", "city_shuffle"))
        .await
        .unwrap();

    assert_eq!(h.ledger.read_count(), 5);
    for gap in h.ledger.read_gaps() {
        assert_close(gap, Duration::from_secs(1));
    }
    assert_close(started.elapsed(), Duration::from_secs(4));
    assert!(!completion.balance.resolved);
    assert_eq!(
        completion.balance.value,
        Some(json!({"detail": "User XP not found"}))
    );
    assert_eq!(completion.reply, "Nice one.");
}

#[tokio::test(start_paused = true)]
async fn settle_delay_runs_before_first_read() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("ok")),
        ScriptedLedger::converging_on(1, json!({"points": 2})),
        RecordingAudit::new(),
        BalancePoller::default().with_settle_delay(Duration::from_millis(2_500)),
    );
    let started = Instant::now();

    h.orchestrator
        .complete(&request("bot_spiritual", "karma_knot"))
        .await
        .unwrap();

    let first_read = h.ledger.read_at.lock().unwrap()[0];
    assert_close(first_read - started, Duration::from_millis(2_500));
}

#[tokio::test]
async fn unlisted_activity_awards_default_points() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("ok")),
        ScriptedLedger::converging_on(1, json!({"points": 2})),
        RecordingAudit::new(),
        BalancePoller::new(1, Duration::ZERO),
    );

    // Present in the catalog with an explicit value.
    let completion = h
        .orchestrator
        .complete(&request("bot_romantic", "date_duel"))
        .await
        .unwrap();
    let listed = h.orchestrator.rewards().lookup("date_duel");
    assert_eq!(completion.reward.requested_amount, listed);

    assert_eq!(h.orchestrator.rewards().lookup("not_a_real_activity"), 2);
}

#[tokio::test]
async fn structured_output_is_unwrapped_to_text() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Structured(json!({"raw": "Breathe in."}))),
        ScriptedLedger::converging_on(1, json!({"points": 1})),
        RecordingAudit::new(),
        BalancePoller::new(1, Duration::ZERO),
    );

    let envelope = h
        .orchestrator
        .clone()
        .respond(request("bot_spiritual", "spiritual_whisper"))
        .await;
    let ResponseEnvelope::Completed { reply, .. } = envelope else {
        panic!("expected completed envelope");
    };
    assert_eq!(reply, "Breathe in.");
}

#[tokio::test]
async fn task_carries_history_and_user_input() {
    let h = Harness::with_poller(
        StubExecutor::new(Reply::Text("ok")),
        ScriptedLedger::converging_on(1, json!({"points": 1})),
        RecordingAudit::new(),
        BalancePoller::new(1, Duration::ZERO),
    );
    let mut req = request("bot_friend", "nickname_game");
    req.user_input = "call me Bean".into();
    req.history = vec!["Riley: pick a nickname".into(), "alice: hmm".into()];

    h.orchestrator.complete(&req).await.unwrap();

    let tasks = h.executor.tasks.lock().unwrap();
    let description = &tasks[0].description;
    assert!(description.contains("call me Bean"), "{description}");
    let first = description.find("Riley: pick a nickname").unwrap();
    let second = description.find("alice: hmm").unwrap();
    assert!(first < second);
}

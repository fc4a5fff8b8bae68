//! Tests for the preview simulation state machine.
mod common;
use botflow::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_suspend_and_resume_at_question() {
    let mut session = PreviewSession::new(email_flow());
    let generation = session.start();

    assert_eq!(
        session.run_to_suspension(generation),
        StepOutcome::AwaitingInput
    );
    assert!(session.is_awaiting_input());
    assert_eq!(
        contents(&session),
        vec![(Role::Bot, "Email?".to_string())]
    );

    assert_eq!(
        session.submit_answer(generation, "a@b.com"),
        StepOutcome::Emitted
    );
    assert_eq!(
        session.variables().get("email").map(String::as_str),
        Some("a@b.com")
    );

    assert_eq!(session.run_to_suspension(generation), StepOutcome::Complete);
    assert!(session.is_complete());
    assert_eq!(
        contents(&session),
        vec![
            (Role::Bot, "Email?".to_string()),
            (Role::User, "a@b.com".to_string()),
            (Role::Bot, CLOSING_MESSAGE.to_string()),
        ]
    );
}

#[test]
fn test_pending_blocks_are_skipped_silently() {
    let mut pending_question = question_block("q0", "Never asked?", "ghost", "q1");
    pending_question.status = BlockStatus::Pending;

    let blocks = vec![
        start_block("q0"),
        pending_question,
        question_block("q1", "Email?", "email", "end"),
        end_block(),
    ];
    let mut session = PreviewSession::new(blocks);
    let generation = session.start();

    session.run_to_suspension(generation);
    // The run never halts at the pending block and emits nothing for it.
    assert_eq!(contents(&session), vec![(Role::Bot, "Email?".to_string())]);
    assert_eq!(session.variables().get("ghost"), None);
}

#[test]
fn test_variable_interpolation_in_messages() {
    let blocks = vec![
        start_block("q1"),
        question_block("q1", "May I have your name?", "name", "m1"),
        message_block("m1", "Hi {name}, welcome {name}! Phone: {phone}", "end"),
        end_block(),
    ];
    let mut session = PreviewSession::new(blocks);
    let generation = session.start();

    session.run_to_suspension(generation);
    session.submit_answer(generation, "Ana");
    session.run_to_suspension(generation);

    // Every occurrence of a collected variable is replaced; placeholders
    // with no collected value stay literal.
    assert!(
        contents(&session).contains(&(Role::Bot, "Hi Ana, welcome Ana! Phone: {phone}".to_string()))
    );
}

#[test]
fn test_answers_containing_placeholders_stay_literal() {
    // An answer that itself looks like a placeholder must be inserted
    // verbatim, never re-substituted with another collected value, no
    // matter which order the variables were collected in.
    let blocks = vec![
        start_block("q1"),
        question_block("q1", "First?", "a", "q2"),
        question_block("q2", "Second?", "b", "m1"),
        message_block("m1", "{a}", "end"),
        end_block(),
    ];
    let mut session = PreviewSession::new(blocks);
    let generation = session.start();

    session.run_to_suspension(generation);
    session.submit_answer(generation, "{b}");
    session.run_to_suspension(generation);
    session.submit_answer(generation, "X");
    session.run_to_suspension(generation);

    assert!(contents(&session).contains(&(Role::Bot, "{b}".to_string())));
}

#[test]
fn test_unconfigured_blocks_degrade_to_skip() {
    // Force a ready block with no usable config: executed, emits nothing.
    let mut empty_message = Block::new("m1", BlockType::SendMessage);
    empty_message.status = BlockStatus::Ready;
    empty_message
        .connections
        .push(BlockConnection::new("c-m1", "m1", "end"));

    let blocks = vec![start_block("m1"), empty_message, end_block()];
    let mut session = PreviewSession::new(blocks);
    let generation = session.start();

    assert_eq!(session.run_to_suspension(generation), StepOutcome::Complete);
    assert_eq!(contents(&session), vec![(Role::Bot, CLOSING_MESSAGE.to_string())]);
}

#[test]
fn test_connected_integration_emits_generic_ack() {
    let integration = Block::new("crm", BlockType::ExternalIntegration)
        .with_config(config(json!({ "connected": true })))
        .with_connection(BlockConnection::new("c-crm", "crm", "end"));
    let blocks = vec![start_block("crm"), integration, end_block()];

    let mut session = PreviewSession::new(blocks);
    let generation = session.start();
    session.run_to_suspension(generation);

    let transcript = contents(&session);
    assert_eq!(transcript[0], (Role::Bot, INTEGRATION_ACK.to_string()));
    // The acknowledgement must not name the third-party service.
    assert!(!transcript[0].1.to_lowercase().contains("hubspot"));
    assert!(!transcript[0].1.to_lowercase().contains("crm"));
}

#[test]
fn test_disconnected_integration_is_skipped() {
    let mut integration = Block::new("crm", BlockType::ExternalIntegration)
        .with_connection(BlockConnection::new("c-crm", "crm", "end"));
    integration.status = BlockStatus::Ready;
    let blocks = vec![start_block("crm"), integration, end_block()];

    let mut session = PreviewSession::new(blocks);
    let generation = session.start();
    session.run_to_suspension(generation);

    assert_eq!(contents(&session), vec![(Role::Bot, CLOSING_MESSAGE.to_string())]);
}

#[test]
fn test_agent_is_a_silent_pass_through() {
    let agent = Block::new("agent", BlockType::AiAgent)
        .with_config(config(json!({
            "agentName": "Router",
            "agentPrompt": "Route the user.",
            "outputs": [
                { "id": "yes", "label": "Yes" },
                { "id": "no", "label": "No" }
            ],
        })))
        .with_connection(BlockConnection::new("c-a1", "agent", "m1").with_output("yes", "Yes"))
        .with_connection(BlockConnection::new("c-a2", "agent", "end").with_output("no", "No"));
    let blocks = vec![
        start_block("agent"),
        agent,
        message_block("m1", "first branch", "end"),
        end_block(),
    ];

    let mut session = PreviewSession::new(blocks);
    let generation = session.start();
    session.run_to_suspension(generation);

    // No transcript entry for the agent; advancement follows array order,
    // which is the first declared output's branch.
    assert_eq!(
        contents(&session),
        vec![
            (Role::Bot, "first branch".to_string()),
            (Role::Bot, CLOSING_MESSAGE.to_string()),
        ]
    );
}

#[test]
fn test_submit_answer_ignored_outside_suspension() {
    let mut session = PreviewSession::new(email_flow());
    let generation = session.start();

    // Still advancing: nothing stored, nothing appended.
    assert_eq!(
        session.submit_answer(generation, "early"),
        StepOutcome::Ignored
    );
    assert!(session.transcript().is_empty());

    session.run_to_suspension(generation);
    session.submit_answer(generation, "a@b.com");
    session.run_to_suspension(generation);

    assert_eq!(
        session.submit_answer(generation, "late"),
        StepOutcome::Ignored
    );
    assert_eq!(session.transcript().len(), 3);
}

#[test]
fn test_restart_reproduces_identical_transcript() {
    let mut session = PreviewSession::new(sample_flow());
    let answers = ["Ana", "ana@example.com", "$200k", "House"];

    let generation = session.start();
    run_with_answers(&mut session, generation, &answers);
    let first = contents(&session);

    let generation = session.restart();
    assert!(session.transcript().is_empty());
    assert!(session.variables().is_empty());
    run_with_answers(&mut session, generation, &answers);

    assert_eq!(contents(&session), first);
}

#[test]
fn test_stale_generation_cannot_touch_reset_transcript() {
    let mut session = PreviewSession::new(email_flow());
    let old = session.start();
    session.run_to_suspension(old);

    let fresh = session.restart();

    // In-flight callbacks from before the restart are discarded.
    assert_eq!(session.step(old), StepOutcome::Stale);
    assert_eq!(session.submit_answer(old, "a@b.com"), StepOutcome::Stale);
    assert!(session.transcript().is_empty());
    assert!(session.variables().is_empty());

    session.run_to_suspension(fresh);
    assert_eq!(contents(&session), vec![(Role::Bot, "Email?".to_string())]);
}

#[test]
fn test_close_releases_session() {
    let mut session = PreviewSession::new(email_flow());
    let generation = session.start();
    session.run_to_suspension(generation);

    session.close();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.transcript().is_empty());
    assert_eq!(session.step(generation), StepOutcome::Stale);
    // A step scheduled against the post-close generation is a no-op too.
    assert_eq!(session.step(session.generation()), StepOutcome::Idle);
}

#[test]
fn test_complete_state_is_terminal() {
    let mut session = PreviewSession::new(vec![start_block("end"), end_block()]);
    let generation = session.start();

    assert_eq!(session.run_to_suspension(generation), StepOutcome::Complete);
    let settled = contents(&session);
    assert_eq!(session.step(generation), StepOutcome::Complete);
    assert_eq!(contents(&session), settled);
}

#[test]
fn test_sample_flow_end_to_end() {
    let mut session = PreviewSession::new(sample_flow());
    let generation = session.start();
    let outcome = run_with_answers(
        &mut session,
        generation,
        &["Ana Garcia", "ana@example.com", "$250k", "Apartment"],
    );

    assert_eq!(outcome, StepOutcome::Complete);
    assert_eq!(session.variables().len(), 4);
    assert_eq!(
        session.variables().get("property_type").map(String::as_str),
        Some("Apartment")
    );

    // Greeting, four question/answer pairs, both branch messages (the
    // pending integration block is skipped), and the closing line.
    let transcript = contents(&session);
    assert_eq!(transcript.len(), 12);
    assert_eq!(transcript.last().unwrap().1, CLOSING_MESSAGE);
}

#[test]
fn test_step_before_start_is_idle() {
    let mut session = PreviewSession::new(email_flow());
    let generation = session.generation();
    assert_eq!(session.step(generation), StepOutcome::Idle);
    assert!(session.transcript().is_empty());
}

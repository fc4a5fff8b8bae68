//! Common test utilities for building block lists and driving previews.
use botflow::prelude::*;
use serde_json::json;

/// Converts a `json!` object literal into a block config map.
#[allow(dead_code)]
pub fn config(value: serde_json::Value) -> ConfigMap {
    value.as_object().cloned().unwrap_or_default()
}

#[allow(dead_code)]
pub fn start_block(target: &str) -> Block {
    Block::new("start", BlockType::Start).with_connection(BlockConnection::new(
        "c-start",
        "start",
        target,
    ))
}

#[allow(dead_code)]
pub fn end_block() -> Block {
    Block::new("end", BlockType::End)
}

#[allow(dead_code)]
pub fn message_block(id: &str, text: &str, target: &str) -> Block {
    Block::new(id, BlockType::SendMessage)
        .with_config(config(json!({ "message": text })))
        .with_connection(BlockConnection::new(&format!("c-{}", id), id, target))
}

#[allow(dead_code)]
pub fn question_block(id: &str, question: &str, variable: &str, target: &str) -> Block {
    Block::new(id, BlockType::AskQuestion)
        .with_config(config(json!({ "question": question, "variableName": variable })))
        .with_connection(BlockConnection::new(&format!("c-{}", id), id, target))
}

/// The minimal suspend/resume flow: one question collecting an email.
#[allow(dead_code)]
pub fn email_flow() -> Vec<Block> {
    vec![
        start_block("q1"),
        question_block("q1", "Email?", "email", "end"),
        end_block(),
    ]
}

/// Runs a session to completion with scripted answers, panicking if the flow
/// asks more questions than answers were provided.
#[allow(dead_code)]
pub fn run_with_answers(
    session: &mut PreviewSession,
    generation: Generation,
    answers: &[&str],
) -> StepOutcome {
    let mut remaining = answers.iter();
    loop {
        match session.run_to_suspension(generation) {
            StepOutcome::AwaitingInput => {
                let answer = remaining
                    .next()
                    .expect("flow asked more questions than scripted answers");
                session.submit_answer(generation, answer);
            }
            outcome => return outcome,
        }
    }
}

/// The transcript as comparable (role, content) pairs, timestamps dropped.
#[allow(dead_code)]
pub fn contents(session: &PreviewSession) -> Vec<(Role, String)> {
    session
        .transcript()
        .iter()
        .map(|entry| (entry.role, entry.content.clone()))
        .collect()
}

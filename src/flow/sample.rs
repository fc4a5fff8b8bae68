use crate::flow::{Block, BlockConnection, BlockType, ConfigMap};
use serde_json::json;

fn config(value: serde_json::Value) -> ConfigMap {
    value.as_object().cloned().unwrap_or_default()
}

/// Builds the canned lead-generation flow used by demos and tests: a
/// greeting, four data-collection questions, an AI-agent qualifier that
/// branches into a CRM-integration path and a nurture path, and a shared
/// terminal block. The integration block ships pending so the host can walk
/// the builder through connecting it.
pub fn sample_flow() -> Vec<Block> {
    vec![
        Block::new("start", BlockType::Start)
            .with_connection(BlockConnection::new("c1", "start", "msg1")),
        Block::new("msg1", BlockType::SendMessage)
            .with_config(config(json!({
                "message": "Hello! Welcome to XYZ Real Estate. I'm here to help you find your perfect property. Let me gather some information to match you with the best options.",
            })))
            .with_connection(BlockConnection::new("c2", "msg1", "q1")),
        Block::new("q1", BlockType::AskQuestion)
            .with_config(config(json!({
                "question": "May I have your full name?",
                "variableName": "name",
            })))
            .with_connection(BlockConnection::new("c3", "q1", "q2")),
        Block::new("q2", BlockType::AskQuestion)
            .with_config(config(json!({
                "question": "What is your email address?",
                "variableName": "email",
            })))
            .with_connection(BlockConnection::new("c4", "q2", "q3")),
        Block::new("q3", BlockType::AskQuestion)
            .with_config(config(json!({
                "question": "What is your budget range?",
                "variableName": "budget",
            })))
            .with_connection(BlockConnection::new("c5", "q3", "q4")),
        Block::new("q4", BlockType::AskQuestion)
            .with_config(config(json!({
                "question": "What type of property are you looking for?",
                "variableName": "property_type",
            })))
            .with_connection(BlockConnection::new("c6", "q4", "agent1")),
        Block::new("agent1", BlockType::AiAgent)
            .with_config(config(json!({
                "agentName": "Lead Qualifier",
                "agentPrompt": "Analyze if this lead is qualified for our real estate services based on their budget and property preferences. Consider them qualified if they have a realistic budget (>$100k) and clear property needs.",
                "outputs": [
                    { "id": "qualified", "label": "Qualified" },
                    { "id": "not_qualified", "label": "Not Qualified" }
                ],
            })))
            .with_connection(
                BlockConnection::new("c8a", "agent1", "crm1")
                    .with_output("qualified", "Qualified"),
            )
            .with_connection(
                BlockConnection::new("c8b", "agent1", "msg_nurture")
                    .with_output("not_qualified", "Not Qualified"),
            ),
        Block::new("crm1", BlockType::ExternalIntegration)
            .with_connection(BlockConnection::new("c9", "crm1", "msg_qualified")),
        Block::new("msg_qualified", BlockType::SendMessage)
            .with_config(config(json!({
                "message": "Perfect! Your information has been sent to our team at XYZ Real Estate. One of our agents will contact you within 24 hours with property options that match your criteria.",
            })))
            .with_connection(BlockConnection::new("c10", "msg_qualified", "end")),
        Block::new("msg_nurture", BlockType::SendMessage)
            .with_config(config(json!({
                "message": "Thank you for your interest in XYZ Real Estate! While we don't have properties matching your current criteria, we'd love to stay in touch. Our team will add you to our newsletter for future opportunities that may fit your needs.",
            })))
            .with_connection(BlockConnection::new("c11", "msg_nurture", "end")),
        Block::new("end", BlockType::End),
    ]
}

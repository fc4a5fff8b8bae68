use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-dependent configuration storage for a block.
///
/// Kept as a raw JSON object map because each block type reads a different
/// set of keys, and the assistant patches configs with partial objects.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// The closed set of block types a flow can contain.
///
/// `Start` and `End` are singletons: every flow holds exactly one of each,
/// and the editing operations refuse to create or destroy them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Start,
    End,
    SendMessage,
    AskQuestion,
    ExternalIntegration,
    AiAgent,
}

impl BlockType {
    pub fn is_singleton(&self) -> bool {
        matches!(self, BlockType::Start | BlockType::End)
    }

    /// Human-facing label, used by hosts when rendering notices.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Start => "Starting point",
            BlockType::End => "End",
            BlockType::SendMessage => "Send Message",
            BlockType::AskQuestion => "Question",
            BlockType::ExternalIntegration => "CRM Integration",
            BlockType::AiAgent => "AI Agent",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::Start => "start",
            BlockType::End => "end",
            BlockType::SendMessage => "send-message",
            BlockType::AskQuestion => "ask-question",
            BlockType::ExternalIntegration => "external-integration",
            BlockType::AiAgent => "ai-agent",
        };
        write!(f, "{}", name)
    }
}

/// Configuration-completeness status of a block.
///
/// `Pending` is a steady state, not an error: pending blocks are surfaced
/// visually by the host and skipped by the preview simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    Pending,
    Ready,
}

/// Canvas coordinates, owned exclusively by the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A directed outgoing edge from one block to another.
///
/// Most block types carry at most one connection; AI-agent blocks may carry
/// one per declared output, keyed by `source_output_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockConnection {
    pub id: String,
    pub source_block_id: String,
    pub target_block_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_output_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BlockConnection {
    pub fn new(id: &str, source: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            source_block_id: source.to_string(),
            target_block_id: target.to_string(),
            source_output_id: None,
            label: None,
        }
    }

    pub fn with_output(mut self, output_id: &str, label: &str) -> Self {
        self.source_output_id = Some(output_id.to_string());
        self.label = Some(label.to_string());
        self
    }
}

/// A declared output of an AI-agent block (one branch the agent can take).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub id: String,
    pub label: String,
}

/// A typed node in the chatbot flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default)]
    pub position: Position,
    pub status: BlockStatus,
    #[serde(default, skip_serializing_if = "ConfigMap::is_empty")]
    pub config: ConfigMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<BlockConnection>,
}

impl Block {
    /// Creates a bare block at the origin. Start and end blocks need no
    /// configuration and are born ready; everything else starts pending.
    pub fn new(id: &str, kind: BlockType) -> Self {
        let status = if kind.is_singleton() {
            BlockStatus::Ready
        } else {
            BlockStatus::Pending
        };
        Self {
            id: id.to_string(),
            kind,
            position: Position::default(),
            status,
            config: ConfigMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self.refresh_status();
        self
    }

    pub fn with_connection(mut self, connection: BlockConnection) -> Self {
        self.connections.push(connection);
        self
    }

    fn config_str(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// The message template of a send-message block, if configured.
    pub fn message(&self) -> Option<&str> {
        self.config_str("message")
    }

    /// The question text of an ask-question block, if configured.
    pub fn question(&self) -> Option<&str> {
        self.config_str("question")
    }

    /// The variable name an ask-question block stores its answer under.
    pub fn variable_name(&self) -> Option<&str> {
        self.config_str("variableName")
    }

    /// Whether an external-integration block has been connected.
    pub fn connected(&self) -> bool {
        self.config
            .get("connected")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn agent_name(&self) -> Option<&str> {
        self.config_str("agentName")
    }

    pub fn agent_prompt(&self) -> Option<&str> {
        self.config_str("agentPrompt")
    }

    /// The declared outputs of an AI-agent block, in declaration order.
    /// Returns an empty list for other types or malformed config.
    pub fn agent_outputs(&self) -> Vec<AgentOutput> {
        self.config
            .get("outputs")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Whether every config field the block type requires is present and
    /// non-empty.
    pub fn required_config_present(&self) -> bool {
        match self.kind {
            BlockType::Start | BlockType::End => true,
            BlockType::SendMessage => self.message().is_some(),
            // A variable name is optional: an unnamed answer is simply
            // not collected.
            BlockType::AskQuestion => self.question().is_some(),
            BlockType::ExternalIntegration => self.connected(),
            BlockType::AiAgent => {
                self.agent_name().is_some()
                    && self.agent_prompt().is_some()
                    && !self.agent_outputs().is_empty()
            }
        }
    }

    /// Re-derives `status` from the current config. Called by the editor
    /// after every configuration change.
    pub fn refresh_status(&mut self) {
        self.status = if self.required_config_present() {
            BlockStatus::Ready
        } else {
            BlockStatus::Pending
        };
    }
}

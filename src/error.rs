use crate::flow::BlockType;
use thiserror::Error;

/// Errors from the block-list editing operations.
///
/// Every variant carries a user-presentable message; hosts surface these as
/// notices and leave the block list untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Cannot add a '{0}' block: Start and End blocks already exist in your bot")]
    SingletonAdd(BlockType),

    #[error("Cannot remove the '{0}' block: Start and End blocks are required for every bot")]
    SingletonRemove(BlockType),

    #[error("Block with ID \"{0}\" not found")]
    BlockNotFound(String),
}

/// Errors from converting a raw flow snapshot into a validated block list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowImportError {
    #[error("Failed to parse flow JSON: {0}")]
    Json(String),

    #[error("Flow must contain exactly one '{kind}' block, found {found}")]
    SingletonCount { kind: BlockType, found: usize },

    #[error("Duplicate block ID '{0}'")]
    DuplicateId(String),

    #[error(
        "Connection '{connection_id}' on block '{source_block_id}' targets unknown block '{target_block_id}'"
    )]
    UnknownTarget {
        connection_id: String,
        source_block_id: String,
        target_block_id: String,
    },

    #[error(
        "Connection '{connection_id}' on agent block '{source_block_id}' references undeclared output '{output_id}'"
    )]
    UnknownAgentOutput {
        connection_id: String,
        source_block_id: String,
        output_id: String,
    },

    #[error("The start block must have no incoming connections, but block '{0}' targets it")]
    StartHasIncoming(String),

    #[error("The end block must have no outgoing connections")]
    EndHasOutgoing,
}

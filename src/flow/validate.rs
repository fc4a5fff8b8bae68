use crate::error::FlowImportError;
use crate::flow::{Block, BlockType};
use ahash::AHashSet;

/// Checks the structural invariants of a block list.
///
/// Verified: unique ids, exactly one start and one end block, no incoming
/// connections into start, no outgoing connections from end, every
/// connection target exists, and agent connections only reference declared
/// outputs. Reachability from start is deliberately *not* enforced here: a
/// flow with unreachable blocks is a degenerate-but-allowed state that the
/// layout engine and simulator both tolerate.
pub fn validate(blocks: &[Block]) -> Result<(), FlowImportError> {
    let mut ids: AHashSet<&str> = AHashSet::with_capacity(blocks.len());
    for block in blocks {
        if !ids.insert(block.id.as_str()) {
            return Err(FlowImportError::DuplicateId(block.id.clone()));
        }
    }

    for kind in [BlockType::Start, BlockType::End] {
        let found = blocks.iter().filter(|b| b.kind == kind).count();
        if found != 1 {
            return Err(FlowImportError::SingletonCount { kind, found });
        }
    }

    let start_id = blocks
        .iter()
        .find(|b| b.kind == BlockType::Start)
        .map(|b| b.id.clone())
        .unwrap_or_default();

    for block in blocks {
        if block.kind == BlockType::End && !block.connections.is_empty() {
            return Err(FlowImportError::EndHasOutgoing);
        }

        let declared: AHashSet<String> = block
            .agent_outputs()
            .into_iter()
            .map(|output| output.id)
            .collect();

        for connection in &block.connections {
            if !ids.contains(connection.target_block_id.as_str()) {
                return Err(FlowImportError::UnknownTarget {
                    connection_id: connection.id.clone(),
                    source_block_id: block.id.clone(),
                    target_block_id: connection.target_block_id.clone(),
                });
            }
            if connection.target_block_id == start_id {
                return Err(FlowImportError::StartHasIncoming(block.id.clone()));
            }
            if block.kind == BlockType::AiAgent {
                if let Some(output_id) = &connection.source_output_id {
                    if !declared.contains(output_id) {
                        return Err(FlowImportError::UnknownAgentOutput {
                            connection_id: connection.id.clone(),
                            source_block_id: block.id.clone(),
                            output_id: output_id.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

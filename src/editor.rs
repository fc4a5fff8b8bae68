//! Host-side block-list mutation operations.
//!
//! The assistant produces structured tool calls ([`Instruction`]); the host
//! feeds them through a [`FlowEditor`], which owns the working block list,
//! enforces the start/end singleton invariant, and re-runs grid layout after
//! every structural change. Rejected operations leave the list untouched and
//! surface as [`EditError`] notices.

use crate::error::EditError;
use crate::flow::{Block, BlockStatus, BlockType, ConfigMap};
use crate::layout::{LayoutOptions, compute_grid_layout};
use log::debug;
use serde::{Deserialize, Serialize};

/// Optional relative placement for a new block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_block_id: Option<String>,
}

impl PlacementHint {
    pub fn after(id: &str) -> Self {
        Self {
            after_block_id: Some(id.to_string()),
            before_block_id: None,
        }
    }

    pub fn before(id: &str) -> Self {
        Self {
            after_block_id: None,
            before_block_id: Some(id.to_string()),
        }
    }
}

/// The four structured tool calls the assistant can issue, matching its JSON
/// wire format (`{"type": "add_block", "blockType": ..., ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    #[serde(rename_all = "camelCase")]
    AddBlock {
        block_type: BlockType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<ConfigMap>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<PlacementHint>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateBlock {
        block_id: String,
        config: ConfigMap,
        #[serde(default)]
        show_form: bool,
    },
    #[serde(rename_all = "camelCase")]
    ShowForm { block_id: String },
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_ids: Vec<String> },
}

/// What applying an instruction did, for the host to report and act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Added { block_id: String },
    Updated { block_id: String, show_form: bool },
    /// The host should open the configuration form for this block.
    ShowForm { block_id: String },
    /// Per-id results of a removal batch; rejected entries become notices.
    Removed {
        removed: Vec<String>,
        rejected: Vec<(String, EditError)>,
    },
}

/// Owns the working block list and applies edits on behalf of the host.
pub struct FlowEditor {
    blocks: Vec<Block>,
    options: LayoutOptions,
    next_id: u64,
}

impl FlowEditor {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self::with_options(blocks, LayoutOptions::default())
    }

    pub fn with_options(blocks: Vec<Block>, options: LayoutOptions) -> Self {
        Self {
            blocks,
            options,
            next_id: 1,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Creates a block and inserts it into the list, then re-lays out.
    ///
    /// Start/end are rejected (they already exist). A block with a suggested
    /// config comes in ready, demoted to pending if required fields are
    /// missing; without one it comes in pending for later configuration.
    /// A placement naming an unknown id degrades to the default position,
    /// immediately before the end block.
    pub fn add_block(
        &mut self,
        kind: BlockType,
        config: Option<ConfigMap>,
        placement: Option<PlacementHint>,
    ) -> Result<String, EditError> {
        if kind.is_singleton() {
            return Err(EditError::SingletonAdd(kind));
        }

        let id = self.fresh_id();
        let mut block = Block::new(&id, kind);
        if let Some(config) = config {
            block.config = config;
            block.refresh_status();
        }

        let index = self.insert_index(placement);
        self.blocks.insert(index, block);
        self.relayout();
        debug!("added {} block '{}' at index {}", kind, id, index);
        Ok(id)
    }

    /// Merges a partial config into a block and re-derives its status.
    pub fn update_block(&mut self, id: &str, patch: &ConfigMap) -> Result<&Block, EditError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| EditError::BlockNotFound(id.to_string()))?;

        for (key, value) in patch {
            block.config.insert(key.clone(), value.clone());
        }
        block.refresh_status();
        debug!("updated block '{}' (now {:?})", id, block.status);
        Ok(&*block)
    }

    /// Removes a block and re-lays out. Start/end cannot be removed.
    pub fn remove_block(&mut self, id: &str) -> Result<Block, EditError> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| EditError::BlockNotFound(id.to_string()))?;

        if self.blocks[index].kind.is_singleton() {
            return Err(EditError::SingletonRemove(self.blocks[index].kind));
        }

        let removed = self.blocks.remove(index);
        self.relayout();
        debug!("removed {} block '{}'", removed.kind, removed.id);
        Ok(removed)
    }

    /// Removes each id in turn. The batch never fails as a whole: every id
    /// is attempted and per-id rejections are returned alongside the
    /// successes, in input order.
    pub fn remove_blocks(&mut self, ids: &[String]) -> Vec<Result<Block, EditError>> {
        ids.iter().map(|id| self.remove_block(id)).collect()
    }

    /// Applies one assistant tool call.
    ///
    /// Removal batches never fail as a whole: each id is attempted and
    /// per-id rejections are reported in the outcome for the host to render
    /// as notices.
    pub fn apply(&mut self, instruction: Instruction) -> Result<Applied, EditError> {
        match instruction {
            Instruction::AddBlock {
                block_type,
                config,
                position,
            } => {
                let block_id = self.add_block(block_type, config, position)?;
                Ok(Applied::Added { block_id })
            }
            Instruction::UpdateBlock {
                block_id,
                config,
                show_form,
            } => {
                self.update_block(&block_id, &config)?;
                Ok(Applied::Updated {
                    block_id,
                    show_form,
                })
            }
            Instruction::ShowForm { block_id } => {
                if !self.blocks.iter().any(|b| b.id == block_id) {
                    return Err(EditError::BlockNotFound(block_id));
                }
                Ok(Applied::ShowForm { block_id })
            }
            Instruction::RemoveBlock { block_ids } => {
                let results = self.remove_blocks(&block_ids);
                let mut removed = Vec::new();
                let mut rejected = Vec::new();
                for (id, result) in block_ids.into_iter().zip(results) {
                    match result {
                        Ok(block) => removed.push(block.id),
                        Err(error) => rejected.push((id, error)),
                    }
                }
                Ok(Applied::Removed { removed, rejected })
            }
        }
    }

    /// Whether the flow has any blocks still awaiting configuration.
    pub fn has_pending_blocks(&self) -> bool {
        self.blocks.iter().any(|b| b.status == BlockStatus::Pending)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let candidate = format!("block-{}", self.next_id);
            self.next_id += 1;
            if !self.blocks.iter().any(|b| b.id == candidate) {
                return candidate;
            }
        }
    }

    fn insert_index(&self, placement: Option<PlacementHint>) -> usize {
        // Default: immediately before the end block.
        let fallback = self
            .blocks
            .iter()
            .position(|b| b.kind == BlockType::End)
            .unwrap_or(self.blocks.len());

        let Some(placement) = placement else {
            return fallback;
        };

        if let Some(after) = &placement.after_block_id {
            if let Some(index) = self.blocks.iter().position(|b| &b.id == after) {
                return index + 1;
            }
        } else if let Some(before) = &placement.before_block_id {
            if let Some(index) = self.blocks.iter().position(|b| &b.id == before) {
                return index;
            }
        }
        fallback
    }

    fn relayout(&mut self) {
        self.blocks = compute_grid_layout(&self.blocks, &self.options);
    }
}

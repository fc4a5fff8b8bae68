use super::validate::validate;
use crate::error::FlowImportError;
use crate::flow::Block;
use serde::{Deserialize, Serialize};

/// A trait for host data models that can be converted into a block list.
///
/// This is the extension point that keeps botflow format-agnostic: a host
/// application parses its own canvas or export format, then implements
/// `IntoBlocks` to hand the core a validated `Vec<Block>`.
pub trait IntoBlocks {
    /// Consumes the object and converts it into a validated block list.
    fn into_blocks(self) -> Result<Vec<Block>, FlowImportError>;
}

/// The canonical JSON snapshot format for a whole flow, as exchanged with
/// the assistant and host renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFlow {
    pub blocks: Vec<Block>,
}

impl RawFlow {
    /// Parses a flow snapshot from JSON without validating it.
    pub fn from_json(json: &str) -> Result<Self, FlowImportError> {
        serde_json::from_str(json).map_err(|e| FlowImportError::Json(e.to_string()))
    }
}

impl IntoBlocks for RawFlow {
    fn into_blocks(self) -> Result<Vec<Block>, FlowImportError> {
        validate(&self.blocks)?;
        Ok(self.blocks)
    }
}

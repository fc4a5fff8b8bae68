//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the botflow
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.

// Data model
pub use crate::flow::{
    AgentOutput, Block, BlockConnection, BlockStatus, BlockType, ConfigMap, IntoBlocks, Position,
    RawFlow, sample_flow, validate,
};

// Level assignment and layout
pub use crate::graph::{LevelMap, assign_levels};
pub use crate::layout::{LayoutOptions, compute_grid_layout, compute_layout};

// Preview simulation
pub use crate::preview::{
    CLOSING_MESSAGE, Generation, INTEGRATION_ACK, PreviewSession, Role, SessionState, StepOutcome,
    TranscriptEntry,
};

// Editing
pub use crate::editor::{Applied, FlowEditor, Instruction, PlacementHint};

// Error types
pub use crate::error::{EditError, FlowImportError};

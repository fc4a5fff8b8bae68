//! # Botflow - Flow Layout and Preview Simulation Engine
//!
//! **Botflow** is the algorithmic core of a visual chatbot-flow builder: a
//! canvas of typed blocks (start, end, send-message, ask-question, CRM
//! integration, AI-decision agent) connected into a directed flow. The host
//! application owns the UI shell, forms, and the natural-language assistant;
//! this crate owns the parts with real logic:
//!
//! 1. **Graph Level Assignment** (`graph`) - a pure function from a block
//!    list's connection graph to per-block dependency levels, used to detect
//!    sibling branches.
//! 2. **Layout Engine** (`layout`) - converts a block list into 2D grid
//!    positions, fanning branch siblings out vertically and centering the
//!    terminal block on its own row.
//! 3. **Flow Simulator** (`preview`) - a deterministic state machine that
//!    replays the configured conversation, suspending at questions and
//!    interpolating collected variables into messages.
//! 4. **Editor** (`editor`) - block-list mutations driven by the
//!    assistant's structured tool calls, with the start/end singleton
//!    invariant enforced.
//!
//! ## Quick Start
//!
//! ```rust
//! use botflow::prelude::*;
//!
//! // The host hands the core a block list; here, the canned sample flow.
//! let blocks = sample_flow();
//!
//! // Position blocks for rendering.
//! let placed = compute_layout(&blocks, &LayoutOptions::default());
//! assert_eq!(placed.len(), blocks.len());
//!
//! // Replay the conversation until the first question suspends it.
//! let mut session = PreviewSession::new(blocks);
//! let generation = session.start();
//! session.run_to_suspension(generation);
//! assert!(session.is_awaiting_input());
//!
//! // Answer and continue.
//! session.submit_answer(generation, "Ana");
//! session.run_to_suspension(generation);
//! assert_eq!(session.variables().get("name").map(String::as_str), Some("Ana"));
//! ```

pub mod editor;
pub mod error;
pub mod flow;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod preview;

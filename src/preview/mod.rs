//! Deterministic preview execution of a configured flow.
//!
//! A `PreviewSession` replays what an end user would experience conversing
//! with the bot, with no network or AI calls: it walks the block list in
//! array order, emits bot messages with collected variables interpolated,
//! suspends at configured questions, and records answers. Anything a block
//! cannot do at execution time (missing config, pending status, unknown
//! type) degrades to skip-and-advance, never to a halted error state; a
//! broken block must never hide the rest of the flow from a builder.
//!
//! The session does no scheduling of its own. Hosts drive it by calling
//! [`PreviewSession::step`] (typically after a typing delay) and
//! [`PreviewSession::submit_answer`], passing the [`Generation`] handed out
//! by `start`/`restart`. Every reset path bumps the generation, so a stale
//! scheduled callback can never append to a transcript that has since been
//! reset.

mod transcript;

pub use transcript::{Role, TranscriptEntry};

use crate::flow::{Block, BlockStatus, BlockType};
use ahash::AHashMap;
use log::{debug, trace};

/// Acknowledgement shown when a connected integration block runs. Kept
/// generic: the end user must not learn which third-party service backs it.
pub const INTEGRATION_ACK: &str = "✓ Your information has been saved. Thank you!";

/// Closing line emitted by the end block.
pub const CLOSING_MESSAGE: &str = "Thank you for chatting with us! This conversation has ended.";

/// The simulator's state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Opened or closed; not yet walking the flow.
    Idle,
    /// Visiting blocks; the host should keep scheduling `step`.
    Advancing,
    /// Halted at an ask-question block until an answer arrives.
    AwaitingInput,
    /// Past the end block; no further advancement occurs.
    Complete,
}

/// Cancellation token for scheduled callbacks. Calls carrying a generation
/// that no longer matches the session are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// What a `step` or `submit_answer` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Exactly one transcript entry was appended; schedule the next step.
    Emitted,
    /// Suspended at a question; wait for `submit_answer`.
    AwaitingInput,
    /// The flow has finished.
    Complete,
    /// The session is idle; call `start` first.
    Idle,
    /// The call was valid but not applicable in the current state.
    Ignored,
    /// The generation was stale; the call was discarded.
    Stale,
}

/// A single preview session over a snapshot of the block list.
///
/// The snapshot is taken at open time and not live-updated; restarting the
/// preview replays the same snapshot from the top.
pub struct PreviewSession {
    blocks: Vec<Block>,
    transcript: Vec<TranscriptEntry>,
    collected: AHashMap<String, String>,
    index: usize,
    state: SessionState,
    generation: u64,
}

impl PreviewSession {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            transcript: Vec::new(),
            collected: AHashMap::new(),
            index: 0,
            state: SessionState::Idle,
            generation: 0,
        }
    }

    /// Begins execution from the top and returns the generation the host
    /// must attach to its scheduled `step` callbacks.
    pub fn start(&mut self) -> Generation {
        self.reset(SessionState::Advancing)
    }

    /// Discards the transcript, collected variables, and position, then
    /// re-enters advancement from the top. Valid from any state.
    pub fn restart(&mut self) -> Generation {
        debug!("preview restarted");
        self.reset(SessionState::Advancing)
    }

    /// Releases the session: pending scheduled callbacks become stale and
    /// the session parks idle with cleared state.
    pub fn close(&mut self) {
        debug!("preview closed");
        self.reset(SessionState::Idle);
    }

    fn reset(&mut self, state: SessionState) -> Generation {
        self.generation += 1;
        self.transcript.clear();
        self.collected.clear();
        self.index = 0;
        self.state = state;
        Generation(self.generation)
    }

    /// The token scheduled callbacks must present to be honored.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Advances through the flow until one bot transcript entry has been
    /// emitted, a question suspends the session, or the flow completes.
    /// Blocks that emit nothing (start, pending or unconfigured blocks,
    /// disconnected integrations, agent pass-throughs) are passed over
    /// within the same call.
    pub fn step(&mut self, generation: Generation) -> StepOutcome {
        if generation.0 != self.generation {
            trace!("discarding stale step (generation {})", generation.0);
            return StepOutcome::Stale;
        }
        match self.state {
            SessionState::Idle => StepOutcome::Idle,
            SessionState::AwaitingInput => StepOutcome::AwaitingInput,
            SessionState::Complete => StepOutcome::Complete,
            SessionState::Advancing => self.execute(),
        }
    }

    /// Supplies the user's answer while suspended at a question. Appends a
    /// user transcript entry with the raw text, stores it under the
    /// question's variable name (if one is declared), and resumes
    /// advancement at the next block. Ignored in any other state.
    pub fn submit_answer(&mut self, generation: Generation, text: &str) -> StepOutcome {
        if generation.0 != self.generation {
            trace!("discarding stale answer (generation {})", generation.0);
            return StepOutcome::Stale;
        }
        if self.state != SessionState::AwaitingInput {
            return StepOutcome::Ignored;
        }

        self.transcript.push(TranscriptEntry::user(text));
        if let Some(variable) = self.blocks[self.index].variable_name() {
            trace!("collected variable '{}'", variable);
            self.collected.insert(variable.to_string(), text.to_string());
        }
        self.index += 1;
        self.state = SessionState::Advancing;
        StepOutcome::Emitted
    }

    /// Convenience driver that steps until the session suspends, completes,
    /// or goes idle. Hosts that emulate typing delays schedule individual
    /// `step` calls instead.
    pub fn run_to_suspension(&mut self, generation: Generation) -> StepOutcome {
        loop {
            match self.step(generation) {
                StepOutcome::Emitted => continue,
                outcome => return outcome,
            }
        }
    }

    /// The append-only conversation so far, in block-visit order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Snapshot of the variables collected from answers so far.
    pub fn variables(&self) -> &AHashMap<String, String> {
        &self.collected
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.state == SessionState::AwaitingInput
    }

    fn execute(&mut self) -> StepOutcome {
        loop {
            if self.index >= self.blocks.len() {
                self.state = SessionState::Complete;
                return StepOutcome::Complete;
            }

            let block = &self.blocks[self.index];
            trace!("visiting block '{}' ({})", block.id, block.kind);

            if block.status != BlockStatus::Ready {
                self.index += 1;
                continue;
            }

            match block.kind {
                BlockType::Start => {
                    self.index += 1;
                }
                BlockType::SendMessage => match block.message() {
                    Some(template) => {
                        let content = self.interpolate(template);
                        self.transcript.push(TranscriptEntry::bot(content));
                        self.index += 1;
                        return StepOutcome::Emitted;
                    }
                    None => self.index += 1,
                },
                BlockType::AskQuestion => match block.question() {
                    Some(question) => {
                        let question = question.to_string();
                        self.transcript.push(TranscriptEntry::bot(question));
                        self.state = SessionState::AwaitingInput;
                        return StepOutcome::AwaitingInput;
                    }
                    None => self.index += 1,
                },
                BlockType::ExternalIntegration => {
                    if block.connected() {
                        self.transcript.push(TranscriptEntry::bot(INTEGRATION_ACK));
                        self.index += 1;
                        return StepOutcome::Emitted;
                    }
                    self.index += 1;
                }
                BlockType::End => {
                    self.transcript.push(TranscriptEntry::bot(CLOSING_MESSAGE));
                    self.state = SessionState::Complete;
                    debug!("preview complete after {} entries", self.transcript.len());
                    return StepOutcome::Complete;
                }
                // No decision logic exists in the preview, so agents are a
                // pass-through along their first declared output, which in
                // array order is simply the next block.
                BlockType::AiAgent => {
                    self.index += 1;
                }
            }
        }
    }

    /// Replaces every `{name}` occurrence with the collected value for
    /// `name`. Placeholders with no collected value stay literal. A single
    /// left-to-right pass over the template: substituted values are never
    /// re-scanned, so an answer that happens to contain a placeholder is
    /// inserted verbatim.
    fn interpolate(&self, template: &str) -> String {
        let mut content = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            content.push_str(&rest[..open]);
            let tail = &rest[open..];
            let Some(close) = tail.find('}') else {
                content.push_str(tail);
                return content;
            };
            match self.collected.get(&tail[1..close]) {
                Some(value) => content.push_str(value),
                None => content.push_str(&tail[..=close]),
            }
            rest = &tail[close + 1..];
        }
        content.push_str(rest);
        content
    }
}

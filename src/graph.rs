//! Dependency-level assignment over the flow's connection graph.
//!
//! Every block reachable from the start block is assigned an integer level:
//! its longest-path distance from start. The layout engine uses levels only
//! to detect branches (multiple blocks sharing a level) and fan them out.

use crate::flow::{Block, BlockType};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

const EMPTY_GROUP: &[String] = &[];

/// The result of level assignment: a per-block level plus the blocks grouped
/// by level, in block-array order.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    levels: AHashMap<String, usize>,
    groups: AHashMap<usize, Vec<String>>,
}

impl LevelMap {
    /// The assigned level of a block, or `None` if it is unreachable from
    /// the start block.
    pub fn level_of(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    /// All block ids assigned the given level, in block-array order.
    pub fn group(&self, level: usize) -> &[String] {
        self.groups.get(&level).map_or(EMPTY_GROUP, Vec::as_slice)
    }

    /// The blocks sharing this block's level (including itself). Empty for
    /// unreachable blocks.
    pub fn siblings_of(&self, id: &str) -> &[String] {
        match self.level_of(id) {
            Some(level) => self.group(level),
            None => EMPTY_GROUP,
        }
    }

    /// This block's index among its same-level siblings, used for branch
    /// fan-out. `None` for unreachable blocks.
    pub fn offset_in_level(&self, id: &str) -> Option<usize> {
        self.siblings_of(id).iter().position(|sibling| sibling == id)
    }

    /// Whether this block shares its level with at least one other block.
    pub fn is_branch(&self, id: &str) -> bool {
        self.siblings_of(id).len() > 1
    }

    /// Number of blocks that received a level.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The distinct levels present, ascending.
    pub fn levels(&self) -> Vec<usize> {
        self.groups.keys().copied().sorted().collect()
    }
}

/// Assigns each block its longest-path distance from the start block.
///
/// Depth-first from start: every time a block is reached, its level is
/// raised to `max(current, parent + 1)`, but its subtree is explored only on
/// the first visit. Reaching an already-visited block by a longer path
/// therefore updates that block's own level without re-leveling its
/// descendants. This under-propagates through diamond joins; existing
/// layouts depend on it, so the policy is preserved exactly.
///
/// Blocks unreachable from start receive no level and appear in no group.
pub fn assign_levels(blocks: &[Block]) -> LevelMap {
    let adjacency: AHashMap<&str, Vec<&str>> = blocks
        .iter()
        .map(|block| {
            let targets = block
                .connections
                .iter()
                .map(|c| c.target_block_id.as_str())
                .collect();
            (block.id.as_str(), targets)
        })
        .collect();

    let mut levels: AHashMap<String, usize> = AHashMap::new();
    let mut visited: AHashSet<String> = AHashSet::new();

    if let Some(start) = blocks.iter().find(|b| b.kind == BlockType::Start) {
        visit(&adjacency, &mut levels, &mut visited, &start.id, 0);
    }

    let mut groups: AHashMap<usize, Vec<String>> = AHashMap::new();
    for block in blocks {
        if let Some(level) = levels.get(&block.id) {
            groups.entry(*level).or_default().push(block.id.clone());
        }
    }

    LevelMap { levels, groups }
}

fn visit(
    adjacency: &AHashMap<&str, Vec<&str>>,
    levels: &mut AHashMap<String, usize>,
    visited: &mut AHashSet<String>,
    id: &str,
    level: usize,
) {
    let slot = levels.entry(id.to_string()).or_insert(0);
    if *slot < level {
        *slot = level;
    }

    // The visited set guards against cycles and keeps each subtree explored
    // at most once, even when a node is reached again by a longer path.
    if !visited.insert(id.to_string()) {
        return;
    }

    if let Some(targets) = adjacency.get(id) {
        for target in targets {
            visit(adjacency, levels, visited, target, level + 1);
        }
    }
}

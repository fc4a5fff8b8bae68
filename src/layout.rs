//! Grid positioning for flow blocks.
//!
//! Placement is primarily array-order-based: blocks fill a fixed-width grid
//! left-to-right, top-to-bottom. Graph levels are consulted only to detect
//! branches and fan sibling paths out vertically, and the terminal block
//! always gets its own centered row below everything else.

use crate::flow::{Block, BlockType, Position};
use crate::graph::{LevelMap, assign_levels};

/// Spacing constants for the layout grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub blocks_per_row: usize,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Vertical increment between same-level siblings on a branch.
    pub branch_offset: f64,
    /// Extra clearance between the last regular row and the end block's row.
    pub end_clearance: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            horizontal_spacing: 400.0,
            vertical_spacing: 200.0,
            blocks_per_row: 3,
            origin_x: 100.0,
            origin_y: 100.0,
            branch_offset: 100.0,
            end_clearance: 100.0,
        }
    }
}

/// Positions every block on the grid, spreading branch siblings vertically.
///
/// Pure: returns a new list with only `position` replaced, identical on
/// identical input. Empty and single-block lists degenerate trivially.
pub fn compute_layout(blocks: &[Block], options: &LayoutOptions) -> Vec<Block> {
    let levels = assign_levels(blocks);
    place(blocks, options, Some(&levels))
}

/// Positions every block on the plain grid, with no branch fan-out. The
/// editor uses this variant after add/remove edits.
pub fn compute_grid_layout(blocks: &[Block], options: &LayoutOptions) -> Vec<Block> {
    place(blocks, options, None)
}

fn place(blocks: &[Block], options: &LayoutOptions, levels: Option<&LevelMap>) -> Vec<Block> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let mut placed = block.clone();
            placed.position = if block.kind == BlockType::End {
                end_position(index, options)
            } else {
                let mut position = grid_position(index, options);
                if let Some(levels) = levels {
                    if levels.is_branch(&block.id) {
                        if let Some(offset) = levels.offset_in_level(&block.id) {
                            position.y += offset as f64 * options.branch_offset;
                        }
                    }
                }
                position
            };
            placed
        })
        .collect()
}

fn grid_position(index: usize, options: &LayoutOptions) -> Position {
    // A zero column count from a host-supplied config degrades to one
    // block per row rather than dividing by zero.
    let per_row = options.blocks_per_row.max(1);
    let row = index / per_row;
    let col = index % per_row;
    Position::new(
        options.origin_x + col as f64 * options.horizontal_spacing,
        options.origin_y + row as f64 * options.vertical_spacing,
    )
}

/// The end block sits centered on the row after the block preceding it in
/// array order. Its row comes from that array index, not its graph level.
fn end_position(index: usize, options: &LayoutOptions) -> Position {
    let per_row = options.blocks_per_row.max(1);
    let row = if index == 0 { 0 } else { (index - 1) / per_row + 1 };
    let center_x =
        options.origin_x + (per_row - 1) as f64 * options.horizontal_spacing / 2.0;
    Position::new(
        center_x,
        options.origin_y + row as f64 * options.vertical_spacing + options.end_clearance,
    )
}

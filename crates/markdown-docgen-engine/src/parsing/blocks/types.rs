use serde::Serialize;

use crate::parsing::inline::Run;

/// Deepest heading level the document model accepts.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Clamps any heading depth into `1..=MAX_HEADING_LEVEL`.
pub fn clamp_heading_level(level: usize) -> u8 {
    level.clamp(1, MAX_HEADING_LEVEL as usize) as u8
}

/// A structural unit of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Heading {
        /// Always within `1..=MAX_HEADING_LEVEL`.
        level: u8,
        runs: Vec<Run>,
    },
    Paragraph {
        runs: Vec<Run>,
    },
    /// A run of contiguous list lines of one kind. `ordered` never changes
    /// once the block exists; every item is the runs of one list line.
    List {
        ordered: bool,
        items: Vec<Vec<Run>>,
    },
}

impl Block {
    pub fn heading(level: usize, runs: Vec<Run>) -> Self {
        Block::Heading {
            level: clamp_heading_level(level),
            runs,
        }
    }
}

/// The intermediate representation shared by both renderers.
///
/// Built fresh for every conversion and dropped once rendering is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

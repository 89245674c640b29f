use crate::parsing::inline::Run;

use super::types::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregatorState {
    #[default]
    Idle,
    CollectingUnordered,
    CollectingOrdered,
}

impl AggregatorState {
    fn collecting(ordered: bool) -> Self {
        if ordered {
            AggregatorState::CollectingOrdered
        } else {
            AggregatorState::CollectingUnordered
        }
    }
}

/// Groups contiguous list lines of the same kind into one [`Block::List`].
///
/// Every maximal run of same-kind items becomes exactly one block. A change
/// of kind, an interruption or the end of input flushes the pending group.
/// Flushed blocks are handed back to the caller, which inserts them at the
/// point of interruption.
#[derive(Debug, Default)]
pub struct ListAggregator {
    state: AggregatorState,
    items: Vec<Vec<Run>>,
}

impl ListAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Adds one list item. Returns the previous group when the kind changed.
    pub fn push_item(&mut self, ordered: bool, runs: Vec<Run>) -> Option<Block> {
        let wanted = AggregatorState::collecting(ordered);
        let flushed = if self.state != wanted {
            self.flush()
        } else {
            None
        };
        self.items.push(runs);
        self.state = wanted;
        flushed
    }

    /// Called for headings, text and blank lines. The triggering line itself
    /// is not consumed; the caller handles it after inserting the flush.
    pub fn interrupt(&mut self) -> Option<Block> {
        self.flush()
    }

    /// End of input.
    pub fn finish(mut self) -> Option<Block> {
        self.flush()
    }

    fn flush(&mut self) -> Option<Block> {
        let state = std::mem::take(&mut self.state);
        let items = std::mem::take(&mut self.items);
        match state {
            AggregatorState::Idle => None,
            AggregatorState::CollectingUnordered => Some(Block::List {
                ordered: false,
                items,
            }),
            AggregatorState::CollectingOrdered => Some(Block::List {
                ordered: true,
                items,
            }),
        }
    }
}

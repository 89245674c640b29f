//! # Block Parsing
//!
//! Two-phase block parsing over the lines of the input text.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each trimmed line becomes a
//!    `LineKind` (blank, heading, unordered item, ordered item or text) with
//!    its residual text.
//! 2. **Block Construction** (`builder`): a `DocumentBuilder` feeds list lines
//!    into a `ListAggregator` and emits `Block`s in document order.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `Document` and heading level bounds
//! - **`classify`**: `classify_line` with process-wide patterns
//! - **`aggregate`**: `ListAggregator` state machine
//! - **`builder`**: `DocumentBuilder` for markdown-line mode and
//!   `paragraph_blocks` for paragraph mode
//!
//! ## Key Invariants
//!
//! - A `List` block only holds items of one kind
//! - Kind changes, blank lines, other lines and end of input all flush a
//!   pending list
//! - Heading levels stay within `1..=6`

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod types;

pub use aggregate::{AggregatorState, ListAggregator};
pub use builder::{BuildOptions, DocumentBuilder, ParseMode, paragraph_blocks};
pub use classify::{LineKind, classify_line};
pub use types::{Block, Document, MAX_HEADING_LEVEL, clamp_heading_level};

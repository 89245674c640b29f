//! # Inline Kinds
//!
//! Inline constructs that own their delimiter constants. The parser refers
//! to these; it never hardcodes `**` or `` ` ``.
//!
//! - **`CodeSpan`**: `TICK`
//! - **`Emphasis`**: `BOLD_STAR`, `BOLD_UNDERSCORE`, `STAR`, `UNDERSCORE`
//! - **`Placeholder`**: `OPEN`, `CLOSE` sentinels from the private use area

pub mod code_span;
pub mod emphasis;

pub use code_span::{CodeSpan, Placeholder};
pub use emphasis::Emphasis;

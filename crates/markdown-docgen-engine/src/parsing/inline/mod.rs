//! # Inline Tokenizing
//!
//! Turns the residual text of one line (or one paragraph block) into an
//! ordered sequence of styled [`Run`]s.
//!
//! ## Phases
//!
//! 1. **Code extraction** (`placeholder`): backtick spans are cut out and
//!    replaced by sentinel placeholders so their content never takes part in
//!    emphasis matching.
//! 2. **Scan** (`parser`): a `Cursor` walks the substituted text trying bold,
//!    then italic, then placeholder matches at each position. Anything else
//!    accumulates as plain text.
//! 3. **Resolve**: placeholders become `Run::Code` as the very last step.
//!
//! ## Modules
//!
//! - **`types`**: `Run` enum (Plain, Bold, Italic, Code)
//! - **`kinds`**: delimiter constants owned by each inline construct
//! - **`cursor`**: byte cursor with word-boundary lookups
//! - **`placeholder`**: code span extraction and restoration
//! - **`parser`**: `tokenize()` entry point with `try_parse_*` helpers
//!
//! ## Fidelity limit
//!
//! Styles do not compose. In `**bold *italic* bold**` the bold match wins and
//! the whole span becomes one `Bold` run with the asterisks kept as text.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod placeholder;
pub mod types;

pub use parser::tokenize;
pub use types::Run;

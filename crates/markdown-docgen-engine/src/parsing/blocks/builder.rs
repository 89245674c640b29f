use crate::parsing::inline::tokenize;

use super::{
    aggregate::ListAggregator,
    classify::{LineKind, classify_line},
    types::Block,
};

/// How the builder interprets the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// One semantic line per input line: headings, list items and text
    /// lines are recognised individually.
    #[default]
    Markdown,
    /// Blank-line separated blocks, each one paragraph. Short blocks ending
    /// in `:` or fully upper-case become sub-headings.
    Paragraphs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub mode: ParseMode,
    /// A paragraph-mode block must be shorter than this (in chars) to be
    /// considered for the sub-heading heuristic.
    pub subheading_max_len: usize,
    /// Heading level given to heuristic sub-headings.
    pub subheading_level: u8,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Markdown,
            subheading_max_len: 100,
            subheading_level: 2,
        }
    }
}

/// Line-by-line builder for markdown-line mode.
///
/// List lines go to the [`ListAggregator`]; every other line first flushes
/// the aggregator so a pending list lands before the line that ended it.
pub struct DocumentBuilder {
    lists: ListAggregator,
    out: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            lists: ListAggregator::new(),
            out: vec![],
        }
    }

    pub fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Blank => self.interrupt_list(),
            LineKind::Heading { level, text } => {
                self.interrupt_list();
                self.out.push(Block::heading(level as usize, tokenize(text)));
            }
            LineKind::UnorderedItem(text) => self.push_item(false, text),
            LineKind::OrderedItem(text) => self.push_item(true, text),
            LineKind::Text(text) => {
                self.interrupt_list();
                self.out.push(Block::Paragraph {
                    runs: tokenize(text),
                });
            }
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        if let Some(list) = self.lists.finish() {
            self.out.push(list);
        }
        self.out
    }

    fn push_item(&mut self, ordered: bool, text: &str) {
        if let Some(list) = self.lists.push_item(ordered, tokenize(text)) {
            self.out.push(list);
        }
    }

    fn interrupt_list(&mut self) {
        if let Some(list) = self.lists.interrupt() {
            self.out.push(list);
        }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds blocks in paragraph mode.
pub fn paragraph_blocks(content: &str, options: &BuildOptions) -> Vec<Block> {
    let mut out = vec![];
    let mut pending: Vec<&str> = vec![];

    let flush = |pending: &mut Vec<&str>, out: &mut Vec<Block>| {
        if pending.is_empty() {
            return;
        }
        let text = pending.join(" ");
        pending.clear();
        let runs = tokenize(&text);
        if looks_like_subheading(&text, options.subheading_max_len) {
            out.push(Block::heading(options.subheading_level as usize, runs));
        } else {
            out.push(Block::Paragraph { runs });
        }
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut pending, &mut out);
        } else {
            pending.push(line);
        }
    }
    flush(&mut pending, &mut out);
    out
}

fn looks_like_subheading(text: &str, max_len: usize) -> bool {
    text.chars().count() < max_len && (text.ends_with(':') || is_upper_case(text))
}

/// True when the text has at least one cased char and none are lower case.
fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::Run;
    use pretty_assertions::assert_eq;

    fn plain(s: &str) -> Vec<Run> {
        vec![Run::Plain(s.to_string())]
    }

    fn build(lines: &[&str]) -> Vec<Block> {
        let mut b = DocumentBuilder::new();
        for l in lines {
            b.push_line(l);
        }
        b.finish()
    }

    #[test]
    fn contiguous_bullets_form_one_list() {
        assert_eq!(
            build(&["* a", "* b", "* c"]),
            vec![Block::List {
                ordered: false,
                items: vec![plain("a"), plain("b"), plain("c")],
            }]
        );
    }

    #[test]
    fn blank_line_splits_list() {
        let blocks = build(&["* a", "", "* b"]);
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: vec![plain("a")],
                },
                Block::List {
                    ordered: false,
                    items: vec![plain("b")],
                },
            ]
        );
    }

    #[test]
    fn ordered_item_splits_list() {
        let blocks = build(&["* a", "1. n", "* b"]);
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::List { ordered: true, .. }));
    }

    #[test]
    fn list_flushes_before_interrupting_line() {
        assert_eq!(
            build(&["- a", "## Next", "text"]),
            vec![
                Block::List {
                    ordered: false,
                    items: vec![plain("a")],
                },
                Block::Heading {
                    level: 2,
                    runs: plain("Next"),
                },
                Block::Paragraph {
                    runs: plain("text"),
                },
            ]
        );
    }

    #[test]
    fn markdown_mode_lines_are_separate_paragraphs() {
        assert_eq!(
            build(&["one", "two"]),
            vec![
                Block::Paragraph { runs: plain("one") },
                Block::Paragraph { runs: plain("two") },
            ]
        );
    }

    #[test]
    fn paragraph_mode_joins_lines_and_detects_subheadings() {
        let content = "INTRODUCTION\n\nFirst line\nsecond line.\n\n\n  Terms:  \n\nclosing";
        assert_eq!(
            paragraph_blocks(content, &BuildOptions::default()),
            vec![
                Block::Heading {
                    level: 2,
                    runs: plain("INTRODUCTION"),
                },
                Block::Paragraph {
                    runs: plain("First line second line."),
                },
                Block::Heading {
                    level: 2,
                    runs: plain("Terms:"),
                },
                Block::Paragraph {
                    runs: plain("closing"),
                },
            ]
        );
    }

    #[test]
    fn long_colon_block_stays_paragraph() {
        let options = BuildOptions {
            subheading_max_len: 10,
            ..BuildOptions::default()
        };
        let blocks = paragraph_blocks("this is far too long:", &options);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn upper_case_detection() {
        assert!(is_upper_case("ГЛАВА 1"));
        assert!(!is_upper_case("1234"));
        assert!(!is_upper_case("Mixed"));
    }

    #[test]
    fn paragraph_mode_does_not_detect_lists() {
        let blocks = paragraph_blocks("* a\n* b", &BuildOptions::default());
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }
}

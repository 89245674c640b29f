pub mod blocks;
pub mod inline;

use blocks::{BuildOptions, Document, DocumentBuilder, ParseMode, paragraph_blocks};

/// Builds the document IR for `content` in the configured mode.
///
/// Parsing never fails; malformed markup degrades to plain text.
pub fn parse_document(content: &str, options: &BuildOptions) -> Document {
    let blocks = match options.mode {
        ParseMode::Markdown => {
            let mut builder = DocumentBuilder::new();
            for line in content.lines() {
                builder.push_line(line);
            }
            builder.finish()
        }
        ParseMode::Paragraphs => paragraph_blocks(content, options),
    };
    Document { blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocks::Block;
    use inline::Run;
    use pretty_assertions::assert_eq;

    #[test]
    fn end_to_end_markdown_mode() {
        let doc = parse_document(
            "# H\n\nPara one.\n\n* x\n* y\n\n1. a\n2. b",
            &BuildOptions::default(),
        );
        insta::assert_debug_snapshot!(doc.blocks, @r#"
        [
            Heading {
                level: 1,
                runs: [
                    Plain(
                        "H",
                    ),
                ],
            },
            Paragraph {
                runs: [
                    Plain(
                        "Para one.",
                    ),
                ],
            },
            List {
                ordered: false,
                items: [
                    [
                        Plain(
                            "x",
                        ),
                    ],
                    [
                        Plain(
                            "y",
                        ),
                    ],
                ],
            },
            List {
                ordered: true,
                items: [
                    [
                        Plain(
                            "a",
                        ),
                    ],
                    [
                        Plain(
                            "b",
                        ),
                    ],
                ],
            },
        ]
        "#);
    }

    #[test]
    fn crlf_input_is_handled() {
        let doc = parse_document("# T\r\n* a\r\n* b\r\n", &BuildOptions::default());
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading(1, vec![Run::Plain("T".into())]),
                Block::List {
                    ordered: false,
                    items: vec![vec![Run::Plain("a".into())], vec![Run::Plain("b".into())]],
                },
            ]
        );
    }

    #[test]
    fn empty_document() {
        assert!(parse_document("", &BuildOptions::default()).is_empty());
        assert!(parse_document("\n\n\n", &BuildOptions::default()).is_empty());
    }

    #[test]
    fn identical_input_builds_identical_ir() {
        let content = "## A\n* **b**\n1. `c`\ntext _d_";
        let options = BuildOptions::default();
        assert_eq!(
            parse_document(content, &options),
            parse_document(content, &options)
        );
    }

    #[test]
    fn paragraph_mode_is_selected_by_options() {
        let options = BuildOptions {
            mode: ParseMode::Paragraphs,
            ..BuildOptions::default()
        };
        let doc = parse_document("# not a heading\n* nor a list", &options);
        assert_eq!(doc.blocks.len(), 1);
        assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
    }
}

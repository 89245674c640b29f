use super::{
    cursor::{Cursor, is_word_char},
    kinds::{Emphasis, Placeholder},
    placeholder::{CodeSpans, Slot},
    types::Run,
};

/// Output of the scan phase: placeholders are still unresolved.
#[derive(Debug)]
enum Token {
    Styled(Run),
    Code(Slot),
}

/// Tokenizes one fragment of text into styled runs.
///
/// # Precedence
/// At each position bold is tried first, then italic, then a code
/// placeholder. Text that matches nothing is collected into `Plain` runs;
/// consecutive plain text always ends up in a single run.
///
/// Malformed markup never fails: an unclosed `**` or a stray backtick is
/// kept verbatim as plain text.
pub fn tokenize(text: &str) -> Vec<Run> {
    let spans = CodeSpans::extract(text);
    let tokens = scan(&spans);
    resolve(tokens, &spans)
}

fn scan(spans: &CodeSpans) -> Vec<Token> {
    let mut cur = Cursor::new(&spans.substituted);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Token>, s: &str, start: usize, end: usize) {
        if end > start {
            out.push(Token::Styled(Run::Plain(s[start..end].to_string())));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        let matched = try_parse_bold(&cur, spans)
            .or_else(|| try_parse_italic(&cur, spans))
            .or_else(|| try_parse_placeholder(&cur, spans));

        if let Some((token, end)) = matched {
            flush_text(&mut out, cur.s, text_start, start);
            out.push(token);
            cur.bump_n(end - start);
            text_start = end;
            continue;
        }

        // At least one char is consumed so a failed marker becomes text.
        cur.bump_char();
        while let Some(b) = cur.peek() {
            if is_stop(b) {
                break;
            }
            cur.bump_char();
        }
    }

    flush_text(&mut out, cur.s, text_start, cur.pos());
    out
}

fn is_stop(b: u8) -> bool {
    Emphasis::is_marker(b) || b == Placeholder::OPEN_LEAD
}

/// Replaces placeholder tokens with `Code` runs. This must stay the final
/// step so that code text never reaches the emphasis matchers.
fn resolve(tokens: Vec<Token>, spans: &CodeSpans) -> Vec<Run> {
    tokens
        .into_iter()
        .map(|t| match t {
            Token::Styled(run) => run,
            Token::Code(slot) => Run::Code(spans.original(slot).to_string()),
        })
        .collect()
}

/// Attempts `**X**` or `__X__` at the cursor. Returns the token and the
/// byte offset just past the closing delimiter.
fn try_parse_bold(cur: &Cursor<'_>, spans: &CodeSpans) -> Option<(Token, usize)> {
    let delim: &[u8] = if cur.starts_with(Emphasis::BOLD_STAR) {
        Emphasis::BOLD_STAR
    } else if cur.starts_with(Emphasis::BOLD_UNDERSCORE) {
        Emphasis::BOLD_UNDERSCORE
    } else {
        return None;
    };

    let open_end = cur.pos() + delim.len();
    // Inner text must be at least one char long.
    let first = cur.char_at(open_end)?;
    let search_from = open_end + first.len_utf8();
    let delim_str = std::str::from_utf8(delim).ok()?;
    let close = search_from + cur.s.get(search_from..)?.find(delim_str)?;

    let inner = spans.restore_range(open_end, close);
    if inner.trim().is_empty() {
        return None;
    }
    Some((Token::Styled(Run::Bold(inner)), close + delim.len()))
}

/// Attempts `*X*` or `_X_` at the cursor.
///
/// Rejected when the opening delimiter follows a word char, when the
/// closing delimiter is followed by one, or when the inner text starts or
/// ends with whitespace. The first closing delimiter that satisfies these
/// rules wins.
fn try_parse_italic(cur: &Cursor<'_>, spans: &CodeSpans) -> Option<(Token, usize)> {
    let d = cur.peek()?;
    if d != Emphasis::STAR && d != Emphasis::UNDERSCORE {
        return None;
    }

    let start = cur.pos();
    if cur.char_before(start).is_some_and(is_word_char) {
        return None;
    }

    let inner_start = start + 1;
    let first = cur.char_at(inner_start)?;
    if first.is_whitespace() || first == char::from(d) {
        return None;
    }

    let bytes = cur.s.as_bytes();
    let mut j = inner_start + first.len_utf8();
    while j < bytes.len() {
        if bytes[j] == d {
            let closes_cleanly = cur.char_before(j).is_some_and(|c| !c.is_whitespace())
                && !cur.char_at(j + 1).is_some_and(is_word_char);
            if closes_cleanly {
                let inner = spans.restore_range(inner_start, j);
                return Some((Token::Styled(Run::Italic(inner)), j + 1));
            }
        }
        j += 1;
    }
    None
}

fn try_parse_placeholder(cur: &Cursor<'_>, spans: &CodeSpans) -> Option<(Token, usize)> {
    let slot = spans.slot_at(cur.pos())?;
    Some((Token::Code(slot), slot.at + slot.len))
}

//! Reads the inline tags of a flowable back into styled spans for the
//! typesetter. Unknown tags are dropped; text is entity-decoded.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub mono: bool,
}

#[derive(Default, Clone, Copy)]
struct State {
    bold: u32,
    italic: u32,
    mono: u32,
}

/// Splits `markup` into spans of uniform style.
pub fn parse_markup(markup: &str) -> Vec<Span> {
    let mut out: Vec<Span> = vec![];
    let mut state = State::default();
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut out, rest, state);
            break;
        };
        push_text(&mut out, &rest[..lt], state);

        let Some(gt) = rest[lt..].find('>') else {
            // Escaped text never contains '<', so this is a stray bracket.
            push_text(&mut out, &rest[lt..], state);
            break;
        };
        apply_tag(&rest[lt + 1..lt + gt], &mut state);
        rest = &rest[lt + gt + 1..];
    }
    out
}

fn apply_tag(tag: &str, state: &mut State) {
    let tag = tag.trim();
    let (closing, name) = match tag.strip_prefix('/') {
        Some(name) => (true, name.trim()),
        None => (false, tag.split_whitespace().next().unwrap_or("")),
    };
    let counter = match name {
        "b" => &mut state.bold,
        "i" => &mut state.italic,
        "font" => &mut state.mono,
        _ => return,
    };
    if closing {
        *counter = counter.saturating_sub(1);
    } else {
        *counter += 1;
    }
}

fn push_text(out: &mut Vec<Span>, raw: &str, state: State) {
    if raw.is_empty() {
        return;
    }
    let text = html_escape::decode_html_entities(raw);
    let (bold, italic, mono) = (state.bold > 0, state.italic > 0, state.mono > 0);
    if let Some(last) = out.last_mut()
        && (last.bold, last.italic, last.mono) == (bold, italic, mono)
    {
        last.text.push_str(&text);
        return;
    }
    out.push(Span {
        text: text.into_owned(),
        bold,
        italic,
        mono,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parsing::inline::Run, render::flow::markup_runs};
    use pretty_assertions::assert_eq;

    fn span(text: &str, bold: bool, italic: bool, mono: bool) -> Span {
        Span {
            text: text.to_string(),
            bold,
            italic,
            mono,
        }
    }

    #[test]
    fn plain_markup_is_one_span() {
        assert_eq!(
            parse_markup("just text"),
            vec![span("just text", false, false, false)]
        );
    }

    #[test]
    fn reads_back_serialized_runs() {
        let markup = markup_runs(&[
            Run::Plain("1 < 2 ".into()),
            Run::Bold("&bold".into()),
            Run::Code("<tag>".into()),
        ]);
        assert_eq!(
            parse_markup(&markup),
            vec![
                span("1 < 2 ", false, false, false),
                span("&bold", true, false, false),
                span("<tag>", false, false, true),
            ]
        );
    }

    #[test]
    fn unknown_tags_are_dropped() {
        assert_eq!(
            parse_markup("a<u>b</u>c"),
            vec![span("abc", false, false, false)]
        );
    }

    #[test]
    fn stray_bracket_is_text() {
        assert_eq!(parse_markup("a <b"), vec![span("a <b", false, false, false)]);
    }
}

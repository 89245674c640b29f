use super::kinds::{CodeSpan, Placeholder};

/// Where a placeholder was inserted into the substituted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Byte offset of the placeholder in the substituted text.
    pub at: usize,
    /// Byte length of the placeholder token.
    pub len: usize,
    /// Index into [`CodeSpans::originals`].
    pub index: usize,
}

/// Input text with its code spans cut out.
///
/// Only offsets recorded in `slots` are placeholders; sentinel characters
/// that were already present in the input stay plain text.
#[derive(Debug, Default)]
pub struct CodeSpans {
    pub substituted: String,
    pub originals: Vec<String>,
    pub slots: Vec<Slot>,
}

impl CodeSpans {
    /// Replaces every code span in `text` with a placeholder token.
    ///
    /// A code span is a single tick, non-empty content without ticks, and a
    /// closing tick. Two adjacent ticks are literal text and never open a
    /// span; an unterminated tick stays as text.
    pub fn extract(text: &str) -> Self {
        let mut out = CodeSpans::default();
        let tick = CodeSpan::TICK.len_utf8();
        let mut last = 0;
        let mut i = 0;

        while let Some(off) = text[i..].find(CodeSpan::TICK) {
            let open = i + off;
            let inner_start = open + tick;
            if text[inner_start..].starts_with(CodeSpan::TICK) {
                i = inner_start + tick;
                continue;
            }
            let Some(len) = text[inner_start..].find(CodeSpan::TICK) else {
                break;
            };
            let close = inner_start + len;

            out.substituted.push_str(&text[last..open]);
            let index = out.originals.len();
            let token = Placeholder::token(index);
            out.slots.push(Slot {
                at: out.substituted.len(),
                len: token.len(),
                index,
            });
            out.substituted.push_str(&token);
            out.originals.push(text[inner_start..close].to_string());

            last = close + tick;
            i = last;
        }
        out.substituted.push_str(&text[last..]);
        out
    }

    /// The slot starting exactly at `pos`, if one was inserted there.
    pub fn slot_at(&self, pos: usize) -> Option<Slot> {
        self.slots
            .binary_search_by_key(&pos, |s| s.at)
            .ok()
            .map(|i| self.slots[i])
    }

    pub fn original(&self, slot: Slot) -> &str {
        &self.originals[slot.index]
    }

    /// Copies `substituted[start..end]`, putting the original code span back,
    /// ticks included, in place of any placeholder inside the range.
    ///
    /// Used when an emphasis span swallows a code span: the emphasis wins and
    /// the code span is kept verbatim as part of its content.
    pub fn restore_range(&self, start: usize, end: usize) -> String {
        let mut out = String::with_capacity(end.saturating_sub(start));
        let mut cursor = start;
        for slot in self
            .slots
            .iter()
            .filter(|s| s.at >= start && s.at + s.len <= end)
        {
            out.push_str(&self.substituted[cursor..slot.at]);
            out.push(CodeSpan::TICK);
            out.push_str(&self.originals[slot.index]);
            out.push(CodeSpan::TICK);
            cursor = slot.at + slot.len;
        }
        out.push_str(&self.substituted[cursor..end]);
        out
    }
}

//! Word wrapping of styled text
//!
//! Wrapping works on codepoint offsets and slices the source text, so a
//! span crossing a line break ends up clipped on both lines with its tag.

use crate::text::{Span, StyledText};
use serde::{Deserialize, Serialize};

/// How whitespace in a text is treated before wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Collapse whitespace runs to one space, then wrap greedily
    #[default]
    Normalize,
    /// Keep the text as written; only existing newlines break lines
    Raw,
    /// Normalize and wrap every `\n\n`-separated paragraph on its own,
    /// with a blank line between paragraphs
    Paragraph,
}

/// Collapse every whitespace run to a single space and strip both ends
pub fn normalize_whitespace(text: &StyledText) -> StyledText {
    let mut plain = String::with_capacity(text.plain().len());
    // new_offset[i]: position in the collapsed text of old codepoint i
    let mut new_offset = Vec::with_capacity(text.len() + 1);
    let mut kept = 0;
    let mut previous_was_space = false;

    for c in text.plain().chars() {
        new_offset.push(kept);
        if c.is_whitespace() {
            if !previous_was_space {
                plain.push(' ');
                kept += 1;
            }
            previous_was_space = true;
        } else {
            plain.push(c);
            kept += 1;
            previous_was_space = false;
        }
    }
    new_offset.push(kept);

    let spans = text
        .spans()
        .iter()
        .map(|span| Span::new(new_offset[span.start], new_offset[span.end], span.tag.clone()));
    StyledText::with_spans(plain, spans).strip()
}

/// Wrap `text` into lines of at most `width` codepoints.
///
/// A word longer than `width` gets a line of its own and overflows.
/// Blank input yields no lines.
pub fn wrap(text: &StyledText, width: usize, mode: WrapMode) -> Vec<StyledText> {
    match mode {
        WrapMode::Raw => text.split_lines(),
        WrapMode::Normalize => {
            let normalized = normalize_whitespace(text);
            greedy_lines(&normalized, width.max(1))
                .into_iter()
                .map(|(start, end)| normalized.slice(start, end))
                .collect()
        }
        WrapMode::Paragraph => {
            let mut lines = Vec::new();
            for paragraph in paragraphs(text) {
                let wrapped = wrap(&paragraph, width, WrapMode::Normalize);
                if wrapped.is_empty() {
                    continue;
                }
                if !lines.is_empty() {
                    lines.push(StyledText::default());
                }
                lines.extend(wrapped);
            }
            lines
        }
    }
}

/// Split on every `\n\n`
fn paragraphs(text: &StyledText) -> Vec<StyledText> {
    let chars: Vec<char> = text.plain().chars().collect();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    while offset + 1 < chars.len() {
        if chars[offset] == '\n' && chars[offset + 1] == '\n' {
            pieces.push(text.slice(start, offset));
            offset += 2;
            start = offset;
        } else {
            offset += 1;
        }
    }
    pieces.push(text.slice(start, chars.len()));
    pieces
}

/// Line boundaries of single-space separated words
fn greedy_lines(text: &StyledText, width: usize) -> Vec<(usize, usize)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (word_start, word_end) in word_ranges(text.plain()) {
        current = match current {
            None => Some((word_start, word_end)),
            Some((line_start, _)) if word_end - line_start <= width => {
                Some((line_start, word_end))
            }
            Some(line) => {
                lines.push(line);
                Some((word_start, word_end))
            }
        };
    }
    lines.extend(current);
    lines
}

/// Codepoint ranges of the space-separated words of `plain`
fn word_ranges(plain: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut count = 0;
    for (offset, c) in plain.chars().enumerate() {
        match (c == ' ', start) {
            (true, Some(s)) => {
                ranges.push((s, offset));
                start = None;
            }
            (false, None) => start = Some(offset),
            _ => {}
        }
        count = offset + 1;
    }
    if let Some(s) = start {
        ranges.push((s, count));
    }
    ranges
}

/// Wrap, indent every line and end the block with a blank line
pub fn fill(text: &StyledText, width: usize, indent: &StyledText, mode: WrapMode) -> StyledText {
    let lines: Vec<StyledText> = wrap(text, width, mode)
        .into_iter()
        .map(|line| {
            let mut indented = indent.clone();
            indented.append_text(&line);
            indented
        })
        .collect();

    let mut filled = StyledText::join(&StyledText::new("\n"), lines.iter());
    filled.append("\n\n");
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StyleTag;

    fn plains(lines: &[StyledText]) -> Vec<&str> {
        lines.iter().map(StyledText::plain).collect()
    }

    #[test]
    fn test_normalize_collapses_runs() {
        let text = StyledText::new("  one\t\ttwo\n three  ");
        assert_eq!(normalize_whitespace(&text).plain(), "one two three");
    }

    #[test]
    fn test_normalize_remaps_spans() {
        let mut text = StyledText::new("a   --flag   b");
        text.stylize(4, 10, StyleTag::ARGS);
        let normalized = normalize_whitespace(&text);
        assert_eq!(normalized.plain(), "a --flag b");
        assert_eq!(normalized.spans()[0].start, 2);
        assert_eq!(normalized.spans()[0].end, 8);
    }

    #[test]
    fn test_greedy_wrap() {
        let text = StyledText::new("the quick brown fox jumps over the lazy dog");
        let lines = wrap(&text, 10, WrapMode::Normalize);
        assert_eq!(
            plains(&lines),
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn test_long_word_overflows_alone() {
        let text = StyledText::new("a supercalifragilistic word");
        let lines = wrap(&text, 8, WrapMode::Normalize);
        assert_eq!(plains(&lines), vec!["a", "supercalifragilistic", "word"]);
    }

    #[test]
    fn test_span_split_across_break() {
        let text = StyledText::styled("alpha beta gamma", StyleTag::HELP);
        let mut highlighted = text.clone();
        highlighted.stylize(3, 8, StyleTag::ARGS);

        let lines = wrap(&highlighted, 6, WrapMode::Normalize);
        assert_eq!(plains(&lines), vec!["alpha", "beta", "gamma"]);

        let args: Vec<(usize, usize)> = lines
            .iter()
            .flat_map(|l| l.spans().iter().filter(|s| s.tag == StyleTag::ARGS))
            .map(|s| (s.start, s.end))
            .collect();
        // "ha" on the first line, "be" on the second
        assert_eq!(args, vec![(3, 5), (0, 2)]);
    }

    #[test]
    fn test_span_conservation() {
        let mut text = StyledText::styled("one two  three\tfour five six seven", StyleTag::HELP);
        text.stylize(4, 14, StyleTag::ARGS);
        let normalized = normalize_whitespace(&text);

        for width in 1..20 {
            let lines = wrap(&text, width, WrapMode::Normalize);
            let rejoined: Vec<&str> = lines.iter().map(|l| l.plain()).collect();
            assert_eq!(rejoined.join(" "), normalized.plain());

            for tag in [StyleTag::HELP, StyleTag::ARGS] {
                let covered_in: usize = normalized
                    .spans()
                    .iter()
                    .filter(|s| s.tag == tag)
                    .map(|s| s.len())
                    .sum();
                let covered_out: usize = lines
                    .iter()
                    .flat_map(|l| l.spans().iter())
                    .filter(|s| s.tag == tag)
                    .map(|s| s.len())
                    .sum();
                // only the spaces turned into line breaks are lost
                let breaks = lines.len() - 1;
                assert!(covered_out <= covered_in);
                assert!(covered_out + breaks >= covered_in);
            }
        }
    }

    #[test]
    fn test_raw_mode_keeps_lines() {
        let text = StyledText::new("first  line\n  second line");
        let lines = wrap(&text, 5, WrapMode::Raw);
        assert_eq!(plains(&lines), vec!["first  line", "  second line"]);
    }

    #[test]
    fn test_paragraph_mode_keeps_paragraphs() {
        let mut text = StyledText::new("one  two\nthree\n\nfour five six\n\n\n\nseven");
        text.stylize(21, 25, StyleTag::ARGS);
        let lines = wrap(&text, 9, WrapMode::Paragraph);
        assert_eq!(
            plains(&lines),
            vec!["one two", "three", "", "four five", "six", "", "seven"]
        );
        // "five" keeps its tag
        let args: Vec<(usize, usize)> = lines[3]
            .spans()
            .iter()
            .filter(|s| s.tag == StyleTag::ARGS)
            .map(|s| (s.start, s.end))
            .collect();
        assert_eq!(args, vec![(5, 9)]);
    }

    #[test]
    fn test_paragraph_fill() {
        let text = StyledText::new("aaa bbb\nccc\n\nddd");
        let filled = fill(&text, 20, &StyledText::new("  "), WrapMode::Paragraph);
        assert_eq!(filled.plain(), "  aaa bbb ccc\n  \n  ddd\n\n");
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap(&StyledText::new("   "), 10, WrapMode::Normalize).is_empty());
    }

    #[test]
    fn test_fill_indents_and_ends_with_blank_line() {
        let text = StyledText::new("aaa bbb ccc");
        let filled = fill(&text, 7, &StyledText::new("  "), WrapMode::Normalize);
        assert_eq!(filled.plain(), "  aaa bbb\n  ccc\n\n");
    }
}

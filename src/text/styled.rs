//! Plain text plus ordered style spans

use crate::text::span::{Span, StyleTag};

/// A string and the spans styling it.
///
/// Spans are kept in insertion order, which is also their priority order:
/// when spans overlap, the one added last wins for the attributes it sets.
/// All offsets count codepoints, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    plain: String,
    spans: Vec<Span>,
    length: usize,
}

/// A run of characters sharing the same set of covering spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The characters of the run
    pub text: &'a str,
    /// Tags covering the run, lowest priority first
    pub tags: Vec<&'a StyleTag>,
}

impl StyledText {
    /// Create unstyled text
    pub fn new(text: impl Into<String>) -> Self {
        let plain = text.into();
        let length = plain.chars().count();
        StyledText {
            plain,
            spans: Vec::new(),
            length,
        }
    }

    /// Create text styled over its whole length
    pub fn styled(text: impl Into<String>, tag: StyleTag) -> Self {
        let mut styled = StyledText::new(text);
        styled.stylize_all(tag);
        styled
    }

    /// Create text with precomputed spans; spans outside the text are clipped
    pub fn with_spans(text: impl Into<String>, spans: impl IntoIterator<Item = Span>) -> Self {
        let mut styled = StyledText::new(text);
        for span in spans {
            styled.stylize(span.start, span.end, span.tag);
        }
        styled
    }

    /// The unstyled content
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Spans in priority order
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Visible length in codepoints
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether there is no text at all
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the text is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.plain.trim().is_empty()
    }

    /// Tag a codepoint range. Empty ranges are ignored.
    pub fn stylize(&mut self, start: usize, end: usize, tag: StyleTag) {
        let start = start.min(self.length);
        let end = end.min(self.length);
        if start < end {
            self.spans.push(Span::new(start, end, tag));
        }
    }

    /// Tag the whole text
    pub fn stylize_all(&mut self, tag: StyleTag) {
        self.stylize(0, self.length, tag);
    }

    /// Tag the whole text below every existing span
    pub fn insert_base_span(&mut self, tag: StyleTag) {
        if self.length > 0 {
            self.spans.insert(0, Span::new(0, self.length, tag));
        }
    }

    /// Append unstyled text
    pub fn append(&mut self, text: &str) {
        self.plain.push_str(text);
        self.length += text.chars().count();
    }

    /// Append text styled over its own length
    pub fn append_styled(&mut self, text: &str, tag: StyleTag) {
        let start = self.length;
        self.append(text);
        self.stylize(start, self.length, tag);
    }

    /// Append another styled text, keeping its spans
    pub fn append_text(&mut self, other: &StyledText) {
        let offset = self.length;
        self.plain.push_str(&other.plain);
        self.length += other.length;
        self.spans
            .extend(other.spans.iter().map(|span| span.shifted(offset)));
    }

    /// Byte index of a codepoint offset
    pub fn byte_offset(&self, char_offset: usize) -> usize {
        self.plain
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.plain.len())
    }

    /// Copy out `[start, end)`, clipping every span that crosses the edges
    pub fn slice(&self, start: usize, end: usize) -> StyledText {
        let end = end.min(self.length);
        let start = start.min(end);
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        StyledText {
            plain: self.plain[byte_start..byte_end].to_string(),
            spans: self
                .spans
                .iter()
                .filter_map(|span| span.clip(start, end))
                .collect(),
            length: end - start,
        }
    }

    /// Split on `\n`, dropping the newlines themselves
    pub fn split_lines(&self) -> Vec<StyledText> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        for (offset, c) in self.plain.chars().enumerate() {
            if c == '\n' {
                lines.push(self.slice(line_start, offset));
                line_start = offset + 1;
            }
        }
        lines.push(self.slice(line_start, self.length));
        lines
    }

    /// Join texts with a separator
    pub fn join<'a, I>(separator: &StyledText, items: I) -> StyledText
    where
        I: IntoIterator<Item = &'a StyledText>,
    {
        let mut joined = StyledText::default();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                joined.append_text(separator);
            }
            joined.append_text(item);
        }
        joined
    }

    /// Prepend `count` spaces, shifting every span
    pub fn pad_left(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.plain.insert_str(0, &" ".repeat(count));
        self.length += count;
        for span in &mut self.spans {
            span.start += count;
            span.end += count;
        }
    }

    /// Pad with spaces or truncate to exactly `length` codepoints
    pub fn set_length(&mut self, length: usize) {
        if length >= self.length {
            let missing = length - self.length;
            self.append(&" ".repeat(missing));
        } else {
            *self = self.slice(0, length);
        }
    }

    /// Remove trailing whitespace, clipping spans
    pub fn rstrip(&mut self) {
        let kept = self.plain.trim_end().chars().count();
        if kept < self.length {
            *self = self.slice(0, kept);
        }
    }

    /// Remove leading and trailing whitespace, clipping spans
    pub fn strip(&self) -> StyledText {
        let leading = self.plain.chars().take_while(|c| c.is_whitespace()).count();
        let kept = self.plain.trim_end().chars().count();
        self.slice(leading, kept.max(leading))
    }

    /// Flatten overlapping spans into runs of identical styling
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut bounds: Vec<usize> = Vec::with_capacity(self.spans.len() * 2 + 2);
        bounds.push(0);
        bounds.push(self.length);
        for span in &self.spans {
            bounds.push(span.start);
            bounds.push(span.end);
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut runs: Vec<(usize, usize, Vec<&StyleTag>)> = Vec::new();
        for window in bounds.windows(2) {
            let (start, end) = (window[0], window[1]);
            let tags: Vec<&StyleTag> = self
                .spans
                .iter()
                .filter(|span| span.start <= start && span.end >= end)
                .map(|span| &span.tag)
                .collect();

            match runs.last_mut() {
                Some((_, last_end, last_tags)) if *last_tags == tags => *last_end = end,
                _ => runs.push((start, end, tags)),
            }
        }

        runs.into_iter()
            .map(|(start, end, tags)| Segment {
                text: &self.plain[self.byte_offset(start)..self.byte_offset(end)],
                tags,
            })
            .collect()
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        StyledText::new(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        StyledText::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(text: &StyledText) -> Vec<(usize, usize, &str)> {
        text.spans()
            .iter()
            .map(|s| (s.start, s.end, s.tag.as_str()))
            .collect()
    }

    #[test]
    fn test_append_styled_offsets() {
        let mut text = StyledText::new("-s");
        text.stylize_all(StyleTag::ARGS);
        text.append(", ");
        text.append_styled("--size", StyleTag::ARGS);
        text.append(" ");
        text.append_styled("N", StyleTag::METAVAR);

        assert_eq!(text.plain(), "-s, --size N");
        assert_eq!(
            tags_of(&text),
            vec![(0, 2, "args"), (4, 10, "args"), (11, 12, "metavar")]
        );
    }

    #[test]
    fn test_offsets_count_codepoints() {
        let mut text = StyledText::new("héllo ");
        text.append_styled("wörld", StyleTag::ARGS);
        assert_eq!(text.len(), 11);
        assert_eq!(text.slice(6, 11).plain(), "wörld");
        assert_eq!(tags_of(&text.slice(6, 11)), vec![(0, 5, "args")]);
    }

    #[test]
    fn test_slice_clips_crossing_span() {
        let text = StyledText::with_spans("abcdef", vec![Span::new(1, 5, StyleTag::HELP)]);
        assert_eq!(tags_of(&text.slice(0, 3)), vec![(1, 3, "help")]);
        assert_eq!(tags_of(&text.slice(3, 6)), vec![(0, 2, "help")]);
    }

    #[test]
    fn test_stylize_ignores_empty_ranges() {
        let mut text = StyledText::new("abc");
        text.stylize(2, 2, StyleTag::ARGS);
        text.stylize(5, 9, StyleTag::ARGS);
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_insert_base_span_goes_first() {
        let mut text = StyledText::new("use --flag");
        text.stylize(4, 10, StyleTag::ARGS);
        text.insert_base_span(StyleTag::HELP);
        assert_eq!(tags_of(&text), vec![(0, 10, "help"), (4, 10, "args")]);
    }

    #[test]
    fn test_split_lines_keeps_tags() {
        let text = StyledText::styled("one\ntwo", StyleTag::TEXT);
        let lines = text.split_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].plain(), "two");
        assert_eq!(tags_of(&lines[1]), vec![(0, 3, "text")]);
    }

    #[test]
    fn test_pad_and_set_length() {
        let mut text = StyledText::styled("--x", StyleTag::ARGS);
        text.pad_left(2);
        text.set_length(8);
        assert_eq!(text.plain(), "  --x   ");
        assert_eq!(tags_of(&text), vec![(2, 5, "args")]);

        text.set_length(4);
        assert_eq!(text.plain(), "  --");
        assert_eq!(tags_of(&text), vec![(2, 4, "args")]);
    }

    #[test]
    fn test_rstrip_and_strip() {
        let mut text = StyledText::styled("  body  ", StyleTag::TEXT);
        text.rstrip();
        assert_eq!(text.plain(), "  body");
        let stripped = text.strip();
        assert_eq!(stripped.plain(), "body");
        assert_eq!(tags_of(&stripped), vec![(0, 4, "text")]);
    }

    #[test]
    fn test_join() {
        let items = [
            StyledText::styled("-h", StyleTag::ARGS),
            StyledText::styled("--help", StyleTag::ARGS),
        ];
        let joined = StyledText::join(&StyledText::new(", "), items.iter());
        assert_eq!(joined.plain(), "-h, --help");
        assert_eq!(tags_of(&joined), vec![(0, 2, "args"), (4, 10, "args")]);
    }

    #[test]
    fn test_segments_layer_overlaps() {
        let mut text = StyledText::styled("see --all now", StyleTag::HELP);
        text.stylize(4, 9, StyleTag::ARGS);
        let segments = text.segments();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "see ");
        assert_eq!(segments[0].tags, vec![&StyleTag::HELP]);
        assert_eq!(segments[1].text, "--all");
        assert_eq!(segments[1].tags, vec![&StyleTag::HELP, &StyleTag::ARGS]);
        assert_eq!(segments[2].text, " now");
    }

    #[test]
    fn test_segments_merge_same_style() {
        let text = StyledText::with_spans(
            "abcd",
            vec![
                Span::new(0, 2, StyleTag::ARGS),
                Span::new(2, 4, StyleTag::ARGS),
            ],
        );
        let segments = text.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "abcd");
    }
}

//! Bracketed console markup
//!
//! `[bold]text[/bold]` tags the text between the tags with `bold`; `[/]`
//! closes the innermost open tag and tags left open run to the end. A
//! backslash before a tag (`\[bold]`) keeps it as literal text. Tag names
//! are style tags: theme names such as `args`, or inline style strings
//! such as `bold red` that the theme parses when it renders.

use crate::text::{StyleTag, StyledText};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// An opening or closing tag with the backslashes in front of it
const TAG_PATTERN: &str = r"(?P<escapes>\\*)(?P<tag>\[(?P<name>[a-z#/@][^\[\]]*)\])";

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TAG_PATTERN).expect("markup tag pattern is valid"))
}

struct OpenTag {
    name: String,
    start: usize,
    order: usize,
}

/// Strip the tags of `markup` and turn them into spans.
///
/// Spans are ordered by where their tag opened, so an inner tag wins over
/// the one around it. A closing tag that matches nothing open stays in the
/// text as written.
pub fn parse_markup(markup: &str) -> StyledText {
    let mut text = StyledText::default();
    let mut open: Vec<OpenTag> = Vec::new();
    let mut closed: Vec<(OpenTag, usize)> = Vec::new();
    let mut last = 0;

    for (order, caps) in tag_regex().captures_iter(markup).enumerate() {
        let (Some(whole), Some(tag), Some(name)) = (caps.get(0), caps.name("tag"), caps.name("name"))
        else {
            continue;
        };
        text.append(&markup[last..whole.start()]);
        last = whole.end();

        let escapes = caps.name("escapes").map_or(0, |m| m.as_str().len());
        text.append(&"\\".repeat(escapes / 2));
        if escapes % 2 == 1 {
            text.append(tag.as_str());
            continue;
        }

        let name = name.as_str().trim();
        let Some(closing) = name.strip_prefix('/') else {
            open.push(OpenTag {
                name: name.to_string(),
                start: text.len(),
                order,
            });
            continue;
        };

        let closing = closing.trim();
        let position = if closing.is_empty() {
            open.len().checked_sub(1)
        } else {
            open.iter().rposition(|tag| tag.name == closing)
        };
        match position {
            Some(index) => closed.push((open.remove(index), text.len())),
            None => {
                debug!(tag = %tag.as_str(), "closing tag matches no open tag");
                text.append(tag.as_str());
            }
        }
    }
    text.append(&markup[last..]);

    let end = text.len();
    closed.extend(open.into_iter().map(|tag| (tag, end)));
    closed.sort_by_key(|(tag, _)| tag.order);
    for (tag, end) in closed {
        text.stylize(tag.start, end, StyleTag::new(tag.name));
    }
    text
}

/// Escape `text` so that [`parse_markup`] gives it back unchanged
pub fn escape_markup(text: &str) -> String {
    let escaped = tag_regex().replace_all(text, r"${escapes}${escapes}\${tag}");
    if escaped.ends_with('\\') && !escaped.ends_with("\\\\") {
        format!("{}\\", escaped)
    } else {
        escaped.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(text: &StyledText) -> Vec<(String, &str)> {
        let chars: Vec<char> = text.plain().chars().collect();
        text.spans()
            .iter()
            .map(|s| (chars[s.start..s.end].iter().collect(), s.tag.as_str()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = parse_markup("no tags here, [A] or [1]");
        assert_eq!(text.plain(), "no tags here, [A] or [1]");
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_simple_tag() {
        let text = parse_markup("A [bold]bold[/bold] tool");
        assert_eq!(text.plain(), "A bold tool");
        assert_eq!(spans_of(&text), vec![("bold".to_string(), "bold")]);
    }

    #[test]
    fn test_nested_tags() {
        let text = parse_markup("[red]one [bold]two[/] three[/red]");
        assert_eq!(text.plain(), "one two three");
        assert_eq!(
            spans_of(&text),
            vec![
                ("one two three".to_string(), "red"),
                ("two".to_string(), "bold")
            ]
        );
    }

    #[test]
    fn test_same_start_keeps_outer_first() {
        let text = parse_markup("[red][bold]x[/bold]y[/red]");
        assert_eq!(
            spans_of(&text),
            vec![("xy".to_string(), "red"), ("x".to_string(), "bold")]
        );
    }

    #[test]
    fn test_unclosed_tag_runs_to_end() {
        let text = parse_markup("a [italic]b c");
        assert_eq!(text.plain(), "a b c");
        assert_eq!(spans_of(&text), vec![("b c".to_string(), "italic")]);
    }

    #[test]
    fn test_escaped_bracket_is_literal() {
        let text = parse_markup(r"use \[bold] for bold");
        assert_eq!(text.plain(), "use [bold] for bold");
        assert!(text.spans().is_empty());

        let text = parse_markup(r"path\\[bold]x[/bold]");
        assert_eq!(text.plain(), r"path\x");
        assert_eq!(spans_of(&text), vec![("x".to_string(), "bold")]);
    }

    #[test]
    fn test_stray_closer_is_kept() {
        let text = parse_markup("a [/bold] b");
        assert_eq!(text.plain(), "a [/bold] b");
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_inline_style_names() {
        let text = parse_markup("[bold magenta]loud[/bold magenta]");
        assert_eq!(spans_of(&text), vec![("loud".to_string(), "bold magenta")]);
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("[bold]"), r"\[bold]");
        assert_eq!(escape_markup("['-a', '--all']"), "['-a', '--all']");
        assert_eq!(escape_markup(r"C:\dir\"), r"C:\dir\\");

        for original in ["[bold]x[/bold]", r"a\[b]", "[/]", r"\\[i]"] {
            assert_eq!(parse_markup(&escape_markup(original)).plain(), original);
        }
    }
}

//! Usage span resolution
//!
//! Recovers, from an already formatted usage line, which characters belong
//! to which action. Options are found by bracket scanning: each optional
//! item (standalone option or mutex group) is one top-level `[...]` or
//! `(...)` group, split on `" | "` into alternatives. Required standalone
//! options are printed without brackets and are found by substring search,
//! as are the positionals that follow.

use crate::error::{MalformedUsageError, UsageResult};
use crate::text::{Span, StyleTag};
use crate::usage::action::{ActionDescriptor, MetavarSource};
use crate::usage::{partition, UsageItem};

/// Separator between alternatives of a mutually exclusive group
pub const ALTERNATIVE_SEPARATOR: &str = " | ";

/// Maps a rendered usage line back to per-action spans
#[derive(Debug, Clone)]
pub struct UsageSpanResolver<'a> {
    chars: Vec<char>,
    actions: &'a [ActionDescriptor],
    metavars: MetavarSource,
}

impl<'a> UsageSpanResolver<'a> {
    /// Prepare a resolver for `usage_text` rendered from `actions`
    pub fn new(usage_text: &str, actions: &'a [ActionDescriptor]) -> Self {
        UsageSpanResolver {
            chars: usage_text.chars().collect(),
            actions,
            metavars: MetavarSource::Dest,
        }
    }

    /// Use another default metavar rule for positionals
    pub fn with_metavars(mut self, metavars: MetavarSource) -> Self {
        self.metavars = metavars;
        self
    }

    /// Resolve every visible action, starting at `search_start`.
    ///
    /// Spans are returned left to right with offsets into the whole text.
    pub fn resolve(&self, search_start: usize) -> UsageResult<Vec<Span>> {
        let (items, positionals) = partition(self.actions);
        let expected = items.iter().filter(|item| is_bracketed(item)).count();

        let mut spans = Vec::new();
        let mut cursor = search_start.min(self.chars.len());
        let mut resolved = 0;

        for item in &items {
            if is_bracketed(item) {
                let (open, close) = self.next_group(cursor).ok_or(
                    MalformedUsageError::MissingGroup {
                        expected,
                        found: resolved,
                    },
                )??;
                self.split_alternatives(open, close, &mut spans);
                resolved += 1;
                cursor = close + 1;
            } else if let UsageItem::Optional(action) = item {
                cursor = self.resolve_bare_option(action, cursor, &mut spans)?;
            }
        }

        for action in positionals {
            for token in action.usage_tokens(&self.metavars.for_positional(action)) {
                let (start, end) = self.find(&token, cursor)?;
                spans.push(Span::new(start, end, StyleTag::ARGS));
                cursor = end;
            }
        }

        Ok(spans)
    }

    /// Scan for the next top-level bracket group at or after `from`.
    ///
    /// Returns the interior `[open, close)` of the group; `None` when the
    /// text ends before any group opens.
    fn next_group(&self, from: usize) -> Option<UsageResult<(usize, usize)>> {
        let mut stack: Vec<(char, usize)> = Vec::new();

        for (offset, &c) in self.chars.iter().enumerate().skip(from) {
            match c {
                '[' | '(' => stack.push((c, offset + 1)),
                ']' | ')' => {
                    let Some(&(opener, interior)) = stack.last() else {
                        return Some(Err(MalformedUsageError::UnbalancedCloser {
                            bracket: c,
                            offset,
                        }));
                    };
                    // a closer of the other kind is literal text inside a metavar
                    if matching_opener(c) != opener {
                        continue;
                    }
                    stack.pop();
                    if stack.is_empty() {
                        return Some(Ok((interior, offset)));
                    }
                }
                _ => {}
            }
        }

        stack
            .first()
            .map(|&(_, interior)| Err(MalformedUsageError::UnclosedGroup { offset: interior - 1 }))
    }

    /// Tag each `" | "`-separated alternative of the group interior
    fn split_alternatives(&self, open: usize, close: usize, spans: &mut Vec<Span>) {
        let interior: String = self.chars[open..close].iter().collect();
        let mut offset = open;

        for alternative in interior.split(ALTERNATIVE_SEPARATOR) {
            let len = alternative.chars().count();
            let leading = alternative.chars().take_while(|c| c.is_whitespace()).count();
            let start = offset + leading;
            let end = offset + len;

            if start < end {
                let trimmed = alternative.trim_start();
                match trimmed.find(' ') {
                    Some(byte) => {
                        let space = start + trimmed[..byte].chars().count();
                        spans.push(Span::new(start, space, StyleTag::ARGS));
                        if space + 1 < end {
                            spans.push(Span::new(space + 1, end, StyleTag::METAVAR));
                        }
                    }
                    None => spans.push(Span::new(start, end, StyleTag::ARGS)),
                }
            }

            offset = end + ALTERNATIVE_SEPARATOR.chars().count();
        }
    }

    /// Find `--opt METAVAR` printed without brackets
    fn resolve_bare_option(
        &self,
        action: &ActionDescriptor,
        cursor: usize,
        spans: &mut Vec<Span>,
    ) -> UsageResult<usize> {
        let option = action.option_strings.first().map(String::as_str).unwrap_or("");
        let (start, mut end) = self.find(option, cursor)?;
        spans.push(Span::new(start, end, StyleTag::ARGS));

        if action.nargs.takes_value() {
            let metavar = action.format_args(&self.metavars.for_optional(action));
            let (metavar_start, metavar_end) = self.find(&metavar, end)?;
            spans.push(Span::new(metavar_start, metavar_end, StyleTag::METAVAR));
            end = metavar_end;
        }
        Ok(end)
    }

    /// Codepoint range of the first occurrence of `token` at or after `from`
    fn find(&self, token: &str, from: usize) -> UsageResult<(usize, usize)> {
        let needle: Vec<char> = token.chars().collect();
        let not_found = || MalformedUsageError::TokenNotFound {
            token: token.to_string(),
            from,
        };
        if needle.is_empty() || from >= self.chars.len() {
            return Err(not_found());
        }

        self.chars[from..]
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|pos| (from + pos, from + pos + needle.len()))
            .ok_or_else(not_found)
    }
}

fn is_bracketed(item: &UsageItem<'_>) -> bool {
    match item {
        UsageItem::Optional(action) => !action.required,
        UsageItem::Group(..) => true,
    }
}

fn matching_opener(closer: char) -> char {
    if closer == ']' {
        '['
    } else {
        '('
    }
}

/// Resolve spans for `usage_text`; shorthand for [`UsageSpanResolver`]
pub fn resolve_usage_spans(
    usage_text: &str,
    search_start: usize,
    actions: &[ActionDescriptor],
) -> UsageResult<Vec<Span>> {
    UsageSpanResolver::new(usage_text, actions).resolve(search_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::Nargs;

    fn resolved(text: &str, start: usize, actions: &[ActionDescriptor]) -> Vec<(String, String)> {
        let chars: Vec<char> = text.chars().collect();
        resolve_usage_spans(text, start, actions)
            .unwrap()
            .into_iter()
            .map(|s| (chars[s.start..s.end].iter().collect(), s.tag.to_string()))
            .collect()
    }

    fn pair(text: &str, tag: &str) -> (String, String) {
        (text.to_string(), tag.to_string())
    }

    #[test]
    fn test_bracket_matching() {
        let actions = vec![
            ActionDescriptor::flag(&["-h"]),
            ActionDescriptor::optional(&["--opt"]).metavar("VAL"),
            ActionDescriptor::positional("pos"),
        ];
        let text = "PROG [-h] [--opt VAL] pos";
        let spans = resolve_usage_spans(text, 5, &actions).unwrap();

        assert_eq!(
            resolved(text, 5, &actions),
            vec![
                pair("-h", "args"),
                pair("--opt", "args"),
                pair("VAL", "metavar"),
                pair("pos", "args"),
            ]
        );
        for window in spans.windows(2) {
            assert!(window[0].end <= window[1].start);
        }
    }

    #[test]
    fn test_pipe_split() {
        let actions = vec![
            ActionDescriptor::optional(&["--path"]).in_mutex_group(0),
            ActionDescriptor::optional(&["--url"]).in_mutex_group(0),
        ];
        assert_eq!(
            resolved("PROG (--path PATH | --url URL)", 5, &actions),
            vec![
                pair("--path", "args"),
                pair("PATH", "metavar"),
                pair("--url", "args"),
                pair("URL", "metavar"),
            ]
        );
    }

    #[test]
    fn test_nested_brackets_in_metavar() {
        let actions = vec![
            ActionDescriptor::optional(&["--more"]).nargs(Nargs::ZeroOrMore),
            ActionDescriptor::flag(&["-q"]),
        ];
        assert_eq!(
            resolved("PROG [--more [MORE ...]] [-q]", 5, &actions),
            vec![
                pair("--more", "args"),
                pair("[MORE ...]", "metavar"),
                pair("-q", "args"),
            ]
        );
    }

    #[test]
    fn test_mismatched_closer_inside_metavar_is_literal() {
        let actions = vec![ActionDescriptor::optional(&["--range"]).metavar("LO)")];
        assert_eq!(
            resolved("PROG [--range LO)]", 5, &actions),
            vec![pair("--range", "args"), pair("LO)", "metavar")]
        );
    }

    #[test]
    fn test_required_option_found_without_brackets() {
        let actions = vec![
            ActionDescriptor::flag(&["-h"]),
            ActionDescriptor::optional(&["-o", "--out"]).required(true),
            ActionDescriptor::flag(&["-v"]),
        ];
        assert_eq!(
            resolved("PROG [-h] -o OUT [-v]", 5, &actions),
            vec![
                pair("-h", "args"),
                pair("-o", "args"),
                pair("OUT", "metavar"),
                pair("-v", "args"),
            ]
        );
    }

    #[test]
    fn test_positional_nargs_tokens() {
        let actions = vec![
            ActionDescriptor::positional("src").nargs(Nargs::OneOrMore),
            ActionDescriptor::positional("dst"),
        ];
        assert_eq!(
            resolved("PROG src [src ...] dst", 5, &actions),
            vec![pair("src", "args"), pair("[src ...]", "args"), pair("dst", "args")]
        );
    }

    #[test]
    fn test_wrapped_usage_line() {
        let actions = vec![
            ActionDescriptor::flag(&["-h", "--help"]),
            ActionDescriptor::optional(&["--alpha"]),
            ActionDescriptor::positional("source").nargs(Nargs::OneOrMore),
        ];
        let text = "Usage: PROG [-h] [--alpha ALPHA]\n            source\n            [source ...]";
        assert_eq!(
            resolved(text, 12, &actions),
            vec![
                pair("-h", "args"),
                pair("--alpha", "args"),
                pair("ALPHA", "metavar"),
                pair("source", "args"),
                pair("[source ...]", "args"),
            ]
        );
    }

    #[test]
    fn test_stray_closer_fails() {
        let actions = vec![ActionDescriptor::flag(&["-h"])];
        let result = resolve_usage_spans("PROG ] [-h]", 5, &actions);
        assert_eq!(
            result,
            Err(MalformedUsageError::UnbalancedCloser {
                bracket: ']',
                offset: 5
            })
        );
    }

    #[test]
    fn test_unclosed_group_fails() {
        let actions = vec![ActionDescriptor::flag(&["-h"])];
        let result = resolve_usage_spans("PROG [-h", 5, &actions);
        assert_eq!(result, Err(MalformedUsageError::UnclosedGroup { offset: 5 }));
    }

    #[test]
    fn test_missing_positional_fails() {
        let actions = vec![ActionDescriptor::positional("file")];
        let result = resolve_usage_spans("PROG path", 5, &actions);
        assert!(matches!(result, Err(MalformedUsageError::TokenNotFound { .. })));
    }

    #[test]
    fn test_missing_group_fails() {
        let actions = vec![ActionDescriptor::flag(&["-a"]), ActionDescriptor::flag(&["-b"])];
        let result = resolve_usage_spans("PROG [-a]", 5, &actions);
        assert_eq!(
            result,
            Err(MalformedUsageError::MissingGroup {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_suppressed_actions_are_skipped() {
        let actions = vec![
            ActionDescriptor::flag(&["--secret"]).suppress(),
            ActionDescriptor::flag(&["-v"]),
        ];
        assert_eq!(resolved("PROG [-v]", 5, &actions), vec![pair("-v", "args")]);
    }
}

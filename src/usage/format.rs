//! Usage line generation
//!
//! Optionals come in declaration order (mutex groups bracketed where their
//! first member appears), then the positionals, wrapped under the program
//! name when the line is too long.

use crate::usage::action::{ActionDescriptor, MetavarSource, MutexGroup};
use crate::usage::{partition, UsageItem};

/// A generated usage line and where its parts start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedUsage {
    /// Prefix, program name and action list (no trailing newline)
    pub text: String,
    /// Codepoint offset of the program name
    pub prog_start: usize,
    /// Codepoint offset where the action list begins
    pub actions_start: usize,
}

/// Build the usage line for `prog` and its actions
pub fn format_usage(
    prefix: &str,
    prog: &str,
    actions: &[ActionDescriptor],
    groups: &[MutexGroup],
    width: usize,
    metavars: MetavarSource,
) -> FormattedUsage {
    let (items, positionals) = partition(actions);

    let opt_parts: Vec<String> = items
        .iter()
        .map(|item| item_usage(item, groups, metavars))
        .collect();
    let pos_parts: Vec<String> = positionals
        .iter()
        .flat_map(|action| positional_parts(action, metavars))
        .collect();

    let prefix_len = prefix.chars().count();
    let prog_len = prog.chars().count();

    let all_parts: Vec<&str> = opt_parts
        .iter()
        .chain(pos_parts.iter())
        .map(String::as_str)
        .collect();
    let single_line = std::iter::once(prog)
        .chain(all_parts.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let usage = if prefix_len + single_line.chars().count() <= width {
        single_line
    } else {
        wrap_usage(prefix_len, prog, &opt_parts, &pos_parts, width)
    };

    FormattedUsage {
        text: format!("{}{}", prefix, usage),
        prog_start: prefix_len,
        actions_start: prefix_len + prog_len + 1,
    }
}

/// The bracketed usage of one optionals item
fn item_usage(item: &UsageItem<'_>, groups: &[MutexGroup], metavars: MetavarSource) -> String {
    match item {
        UsageItem::Optional(action) => {
            let usage = option_usage(action, metavars);
            if action.required {
                usage
            } else {
                format!("[{}]", usage)
            }
        }
        UsageItem::Group(id, members) => {
            let required = groups.get(*id).map(|g| g.required).unwrap_or(false);
            let inner = members
                .iter()
                .map(|action| {
                    if action.is_positional() {
                        action.format_args(&metavars.for_positional(action))
                    } else {
                        option_usage(action, metavars)
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            if required {
                format!("({})", inner)
            } else {
                format!("[{}]", inner)
            }
        }
    }
}

/// `--opt METAVAR`, using the first option string
fn option_usage(action: &ActionDescriptor, metavars: MetavarSource) -> String {
    let option = action.option_strings.first().cloned().unwrap_or_default();
    if action.nargs.takes_value() {
        format!("{} {}", option, action.format_args(&metavars.for_optional(action)))
    } else {
        option
    }
}

/// Positional parts that may end up on different lines
fn positional_parts(action: &ActionDescriptor, metavars: MetavarSource) -> Vec<String> {
    let default = metavars.for_positional(action);
    match action.nargs {
        crate::usage::Nargs::ZeroOrMore => vec![action.format_args(&default)],
        _ => action.usage_tokens(&default),
    }
}

fn wrap_usage(
    prefix_len: usize,
    prog: &str,
    opt_parts: &[String],
    pos_parts: &[String],
    width: usize,
) -> String {
    let prog_len = prog.chars().count();

    let lines: Vec<String> = if (prefix_len + prog_len) as f64 <= 0.75 * width as f64 {
        // continuation lines align with the first argument
        let indent = " ".repeat(prefix_len + prog_len + 1);
        let with_prog = |parts: &[String]| {
            std::iter::once(prog.to_string())
                .chain(parts.iter().cloned())
                .collect::<Vec<_>>()
        };
        if !opt_parts.is_empty() {
            let mut lines = wrap_parts(&with_prog(opt_parts), &indent, Some(prefix_len), width);
            lines.extend(wrap_parts(pos_parts, &indent, None, width));
            lines
        } else if !pos_parts.is_empty() {
            wrap_parts(&with_prog(pos_parts), &indent, Some(prefix_len), width)
        } else {
            vec![prog.to_string()]
        }
    } else {
        // program name too long: arguments start on the next line
        let indent = " ".repeat(prefix_len);
        let all: Vec<String> = opt_parts.iter().chain(pos_parts).cloned().collect();
        let mut lines = wrap_parts(&all, &indent, None, width);
        if lines.len() > 1 {
            lines = wrap_parts(opt_parts, &indent, None, width);
            lines.extend(wrap_parts(pos_parts, &indent, None, width));
        }
        std::iter::once(prog.to_string()).chain(lines).collect()
    };

    lines.join("\n")
}

/// Greedily fill lines with parts. When `prefix_len` is given, the first
/// line continues after a prefix of that length and is emitted unindented.
fn wrap_parts(
    parts: &[String],
    indent: &str,
    prefix_len: Option<usize>,
    width: usize,
) -> Vec<String> {
    let indent_len = indent.chars().count();
    let mut lines: Vec<String> = Vec::new();
    let mut line: Vec<&str> = Vec::new();
    let mut line_len = prefix_len.unwrap_or(indent_len) as isize - 1;

    for part in parts {
        let part_len = part.chars().count() as isize;
        if line_len + 1 + part_len > width as isize && !line.is_empty() {
            lines.push(format!("{}{}", indent, line.join(" ")));
            line.clear();
            line_len = indent_len as isize - 1;
        }
        line.push(part);
        line_len += part_len + 1;
    }
    if !line.is_empty() {
        lines.push(format!("{}{}", indent, line.join(" ")));
    }

    if prefix_len.is_some() {
        if let Some(first) = lines.first_mut() {
            *first = first[indent.len()..].to_string();
        }
    }
    lines
}

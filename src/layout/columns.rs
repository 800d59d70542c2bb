//! Two-column argument rows
//!
//! Every row of a document shares one invocation column width, computed
//! over the whole tree so nested sections line up with their parents.

use crate::layout::section::{Row, SectionTree};
use crate::layout::wrap::{wrap, WrapMode};
use crate::text::StyledText;

/// Spaces kept between the invocation column and the help column
pub const COLUMN_GUTTER: usize = 2;

/// Help text never wraps narrower than this
pub const MIN_HELP_WIDTH: usize = 11;

/// Width of the invocation column shared by every row of `tree`.
///
/// The widest indented invocation is clamped to `[min_width, max_width]`
/// and the gutter is added on top. Invocations wider than the clamp spill
/// onto a line of their own when rendered.
pub fn compute_shared_first_column_width(
    tree: &SectionTree,
    min_width: usize,
    max_width: usize,
) -> usize {
    let widest = tree
        .rows()
        .map(|row| row.indent + row.invocation.len())
        .max()
        .unwrap_or(0);
    widest.max(min_width).min(max_width.max(min_width)) + COLUMN_GUTTER
}

/// Render one row against the shared column width.
///
/// Help starts on the invocation line when the invocation fits in the
/// column, otherwise on the next line indented to the column.
pub fn render_row(
    row: &Row,
    column_width: usize,
    total_width: usize,
    help_mode: WrapMode,
) -> Vec<StyledText> {
    let mut invocation = row.invocation.clone();
    invocation.pad_left(row.indent);

    let help_lines = match &row.help {
        Some(help) if !help.is_blank() => {
            let help_width = total_width.saturating_sub(column_width).max(MIN_HELP_WIDTH);
            wrap(help, help_width, help_mode)
        }
        _ => Vec::new(),
    };

    let mut lines = Vec::with_capacity(help_lines.len() + 1);
    let mut help_lines = help_lines.into_iter();

    match help_lines.next() {
        None => lines.push(invocation),
        Some(first) => {
            let mut header = if invocation.len() > column_width.saturating_sub(COLUMN_GUTTER) {
                lines.push(invocation);
                StyledText::new(" ".repeat(column_width))
            } else {
                invocation.set_length(column_width);
                invocation
            };
            header.append_text(&first);
            lines.push(header);
        }
    }

    for help_line in help_lines {
        let mut line = help_line;
        line.pad_left(column_width);
        lines.push(line);
    }

    for line in &mut lines {
        line.rstrip();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::section::Section;
    use crate::text::StyleTag;

    fn row(invocation: &str, help: Option<&str>, indent: usize) -> Row {
        Row {
            invocation: StyledText::styled(invocation, StyleTag::ARGS),
            help: help.map(|h| StyledText::styled(h, StyleTag::HELP)),
            indent,
        }
    }

    fn tree_of(rows: Vec<Row>) -> SectionTree {
        let mut section = Section::new("options");
        section.rows = rows;
        let mut tree = SectionTree::new();
        tree.push_section(section);
        tree
    }

    fn plains(lines: &[StyledText]) -> Vec<&str> {
        lines.iter().map(StyledText::plain).collect()
    }

    #[test]
    fn test_column_width_from_widest_row() {
        let tree = tree_of(vec![row("-h, --help", None, 2), row("--flag", None, 2)]);
        assert_eq!(compute_shared_first_column_width(&tree, 0, 22), 14);
    }

    #[test]
    fn test_column_width_clamped() {
        let tree = tree_of(vec![row("--a-really-long-option-name VALUE", None, 2)]);
        assert_eq!(compute_shared_first_column_width(&tree, 0, 22), 24);

        let tree = tree_of(vec![row("-x", None, 2)]);
        assert_eq!(compute_shared_first_column_width(&tree, 10, 22), 12);
    }

    #[test]
    fn test_column_width_spans_nested_sections() {
        let mut parent = Section::new("outer");
        parent.rows.push(row("--a", None, 2));
        let mut child = Section::new("inner");
        child.indent = 2;
        child.rows.push(row("--longer-name", None, 4));
        parent.children.push(child);

        let mut tree = SectionTree::new();
        tree.push_section(parent);
        assert_eq!(compute_shared_first_column_width(&tree, 0, 22), 19);
    }

    #[test]
    fn test_column_width_is_stable() {
        let tree = tree_of(vec![row("-v, --verbose", Some("talk more"), 2)]);
        let first = compute_shared_first_column_width(&tree, 0, 22);
        let second = compute_shared_first_column_width(&tree, 0, 22);
        assert_eq!(first, second);
    }

    #[test]
    fn test_help_on_same_line() {
        let lines = render_row(&row("--flag", Some("Is flag?"), 2), 14, 100, WrapMode::Normalize);
        assert_eq!(plains(&lines), vec!["  --flag      Is flag?"]);
        let spans = lines[0].spans();
        assert_eq!((spans[0].start, spans[0].end), (2, 8));
        assert_eq!((spans[1].start, spans[1].end), (14, 22));
    }

    #[test]
    fn test_long_invocation_pushes_help_down() {
        let lines = render_row(
            &row("--very-long-option-name NAME", Some("what it does"), 2),
            24,
            60,
            WrapMode::Normalize,
        );
        assert_eq!(
            plains(&lines),
            vec![
                "  --very-long-option-name NAME",
                "                        what it does",
            ]
        );
    }

    #[test]
    fn test_invocation_at_column_boundary() {
        // column 14 leaves 12 for the indented invocation
        let fits = render_row(&row("--abcdefghi", Some("help"), 2), 14, 80, WrapMode::Normalize);
        assert_eq!(plains(&fits), vec!["  --abcdefghi  help"]);

        let spills = render_row(&row("--abcdefghij", Some("help"), 2), 14, 80, WrapMode::Normalize);
        assert_eq!(plains(&spills), vec!["  --abcdefghij", "              help"]);
    }

    #[test]
    fn test_help_wraps_into_column() {
        let lines = render_row(
            &row("-q", Some("one two three four five"), 2),
            6,
            20,
            WrapMode::Normalize,
        );
        assert_eq!(
            plains(&lines),
            vec!["  -q  one two three", "      four five"]
        );
    }

    #[test]
    fn test_help_width_has_floor() {
        let lines = render_row(
            &row("-q", Some("aaaa bbbb cccc"), 2),
            20,
            22,
            WrapMode::Normalize,
        );
        // 11 columns of help even though only 2 remain
        assert_eq!(lines[0].plain(), "  -q                aaaa bbbb");
    }

    #[test]
    fn test_row_without_help() {
        let lines = render_row(&row("--quiet", None, 2), 14, 80, WrapMode::Normalize);
        assert_eq!(plains(&lines), vec!["  --quiet"]);
        let blank = render_row(&row("--quiet", Some("   "), 2), 14, 80, WrapMode::Normalize);
        assert_eq!(plains(&blank), vec!["  --quiet"]);
    }
}

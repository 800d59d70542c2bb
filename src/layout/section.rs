//! Section tree and document rendering

use crate::layout::columns::{compute_shared_first_column_width, render_row};
use crate::layout::wrap::fill;
use crate::layout::LayoutOptions;
use crate::text::{StyleTag, StyledText};
use tracing::debug;

/// One argument: its invocation and optional help
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// e.g. `-s, --size N`
    pub invocation: StyledText,
    /// Help text, wrapped into the second column
    pub help: Option<StyledText>,
    /// Indentation of the invocation
    pub indent: usize,
}

/// A titled group of rows, possibly with nested sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<String>,
    pub description: Option<StyledText>,
    pub rows: Vec<Row>,
    pub children: Vec<Section>,
    /// Indentation of the heading; content sits one increment deeper
    pub indent: usize,
}

impl Section {
    /// Create an empty section with a heading
    pub fn new(heading: impl Into<String>) -> Self {
        Section {
            heading: Some(heading.into()),
            ..Default::default()
        }
    }

    /// True when nothing in the section or its children would be printed
    /// below the heading
    pub fn is_empty(&self) -> bool {
        let has_description = self
            .description
            .as_ref()
            .map(|d| !d.is_blank())
            .unwrap_or(false);
        !has_description && self.rows.is_empty() && self.children.iter().all(Section::is_empty)
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &Row> + '_> {
        Box::new(
            self.rows
                .iter()
                .chain(self.children.iter().flat_map(|child| child.rows())),
        )
    }

    fn render(&self, column_width: usize, options: &LayoutOptions, lines: &mut Vec<StyledText>) {
        if let Some(heading) = self.heading.as_deref().filter(|h| !h.is_empty()) {
            let title = format!("{}:", options.group_name_format.apply(heading));
            let mut line = StyledText::styled(title, StyleTag::GROUPS);
            line.pad_left(self.indent);
            lines.push(line);
        }

        if let Some(description) = self.description.as_ref().filter(|d| !d.is_blank()) {
            let content_indent = self.indent + options.indent_increment;
            let width = options.width.saturating_sub(content_indent).max(11);
            let indent = StyledText::new(" ".repeat(content_indent));
            lines.extend(fill(description, width, &indent, options.text_fill).split_lines());
        }

        for row in &self.rows {
            lines.extend(render_row(row, column_width, options.width, options.help_wrap));
        }

        for child in self.children.iter().filter(|c| !c.is_empty()) {
            lines.push(StyledText::default());
            child.render(column_width, options, lines);
        }
    }
}

/// A top-level piece of a help document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Text that is already laid out, such as the usage line
    Text(StyledText),
    /// Text filled to the document width at render time
    Paragraph(StyledText),
    Section(Section),
}

/// Ordered blocks making up a help document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTree {
    blocks: Vec<Block>,
}

impl SectionTree {
    pub fn new() -> Self {
        SectionTree::default()
    }

    pub fn push_text(&mut self, text: StyledText) {
        self.blocks.push(Block::Text(text));
    }

    pub fn push_paragraph(&mut self, text: StyledText) {
        self.blocks.push(Block::Paragraph(text));
    }

    pub fn push_section(&mut self, section: Section) {
        self.blocks.push(Block::Section(section));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The last block, when it is a section
    pub fn last_section_mut(&mut self) -> Option<&mut Section> {
        match self.blocks.last_mut() {
            Some(Block::Section(section)) => Some(section),
            _ => None,
        }
    }

    /// Every row in document order, nested sections included
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Section(section) => Some(section),
                _ => None,
            })
            .flat_map(|section| section.rows())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Lay the document out into lines.
    ///
    /// Empty sections are dropped, runs of blank lines collapse to one,
    /// leading and trailing blank lines are removed and no line keeps
    /// trailing whitespace.
    pub fn render_lines(&self, options: &LayoutOptions) -> Vec<StyledText> {
        let column_width = compute_shared_first_column_width(
            self,
            options.min_column_width,
            options.max_column_width,
        );
        debug!(column_width, width = options.width, "laying out help");

        let mut lines: Vec<StyledText> = Vec::new();
        for block in &self.blocks {
            let mut block_lines = Vec::new();
            match block {
                Block::Text(text) => block_lines.extend(text.split_lines()),
                Block::Paragraph(text) => {
                    let width = options.width.max(11);
                    block_lines.extend(
                        fill(text, width, &StyledText::default(), options.text_fill).split_lines(),
                    );
                }
                Block::Section(section) if section.is_empty() => continue,
                Block::Section(section) => section.render(column_width, options, &mut block_lines),
            }
            if !lines.is_empty() {
                lines.push(StyledText::default());
            }
            lines.extend(block_lines);
        }

        tidy_lines(lines)
    }
}

/// Strip trailing whitespace, collapse blank runs and trim blank edges
fn tidy_lines(lines: Vec<StyledText>) -> Vec<StyledText> {
    let mut tidy: Vec<StyledText> = Vec::with_capacity(lines.len());
    for mut line in lines {
        line.rstrip();
        let blank = line.is_empty();
        let previous_blank = tidy.last().map(StyledText::is_empty).unwrap_or(true);
        if blank && previous_blank {
            continue;
        }
        tidy.push(line);
    }
    while tidy.last().map(StyledText::is_empty).unwrap_or(false) {
        tidy.pop();
    }
    tidy
}

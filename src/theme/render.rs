//! Turning styled text into terminal or HTML output

use crate::theme::{Color, Style, Theme};
use crate::text::StyledText;
use colored::{Color as AnsiColor, ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Foreground and background assumed for HTML export
const EXPORT_FOREGROUND: (u8, u8, u8) = (255, 255, 255);
const EXPORT_BACKGROUND: (u8, u8, u8) = (0, 0, 0);

/// What a rendered document looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Text without any styling
    #[default]
    Plain,
    /// ANSI escape sequences for terminals
    Ansi,
    /// A standalone HTML page with inline styles
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(OutputFormat::Plain),
            "ansi" => Ok(OutputFormat::Ansi),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Ansi => "ansi",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

/// Render a document in the given format; `title` is used by HTML only
pub fn render(document: &StyledText, theme: &Theme, format: OutputFormat, title: &str) -> String {
    match format {
        OutputFormat::Plain => document.plain().to_string(),
        OutputFormat::Ansi => render_ansi(document, theme),
        OutputFormat::Html => render_html(document, theme, title),
    }
}

/// Render with ANSI escapes.
///
/// Escapes never cross a newline, so every line can be printed on its own.
/// Whether escapes are emitted at all follows `colored`'s global control.
pub fn render_ansi(document: &StyledText, theme: &Theme) -> String {
    let mut output = String::with_capacity(document.plain().len() * 2);
    for segment in document.segments() {
        let style = theme.resolve(segment.tags.iter().copied());
        for (i, piece) in segment.text.split('\n').enumerate() {
            if i > 0 {
                output.push('\n');
            }
            if piece.is_empty() || style.is_plain() {
                output.push_str(piece);
            } else {
                output.push_str(&paint(piece, &style).to_string());
            }
        }
    }
    output
}

fn paint(text: &str, style: &Style) -> ColoredString {
    let mut painted = text.normal();
    if let Some(color) = style.color.and_then(ansi_color) {
        painted = painted.color(color);
    }
    if let Some(color) = style.bgcolor.and_then(ansi_color) {
        painted = painted.on_color(color);
    }
    if style.bold == Some(true) {
        painted = painted.bold();
    }
    if style.dim == Some(true) {
        painted = painted.dimmed();
    }
    if style.italic == Some(true) {
        painted = painted.italic();
    }
    if style.underline == Some(true) {
        painted = painted.underline();
    }
    if style.strike == Some(true) {
        painted = painted.strikethrough();
    }
    if style.reverse == Some(true) {
        painted = painted.reversed();
    }
    if style.conceal == Some(true) {
        painted = painted.hidden();
    }
    painted
}

fn ansi_color(color: Color) -> Option<AnsiColor> {
    let standard = match color {
        Color::Default => return None,
        Color::Palette(index) if index < 16 => index,
        other => {
            return other
                .to_rgb()
                .map(|(r, g, b)| AnsiColor::TrueColor { r, g, b })
        }
    };
    Some(match standard {
        0 => AnsiColor::Black,
        1 => AnsiColor::Red,
        2 => AnsiColor::Green,
        3 => AnsiColor::Yellow,
        4 => AnsiColor::Blue,
        5 => AnsiColor::Magenta,
        6 => AnsiColor::Cyan,
        7 => AnsiColor::White,
        8 => AnsiColor::BrightBlack,
        9 => AnsiColor::BrightRed,
        10 => AnsiColor::BrightGreen,
        11 => AnsiColor::BrightYellow,
        12 => AnsiColor::BrightBlue,
        13 => AnsiColor::BrightMagenta,
        14 => AnsiColor::BrightCyan,
        _ => AnsiColor::BrightWhite,
    })
}

/// Render a standalone HTML page with the document in a `<pre>` block
pub fn render_html(document: &StyledText, theme: &Theme, title: &str) -> String {
    let mut body = String::new();
    for segment in document.segments() {
        let style = theme.resolve(segment.tags.iter().copied());
        let text = escape_html(segment.text);
        let css = css_for(&style);
        if css.is_empty() {
            body.push_str(&text);
        } else {
            body.push_str(&format!("<span style=\"{}\">{}</span>", css, text));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n</head>\n\
         <body style=\"color: {fg}; background-color: {bg};\">\n\
         <pre style=\"font-family: Menlo, 'DejaVu Sans Mono', consolas, 'Courier New', monospace\"><code>{body}</code></pre>\n\
         </body>\n</html>\n",
        title = escape_html(title),
        fg = hex(EXPORT_FOREGROUND),
        bg = hex(EXPORT_BACKGROUND),
        body = body,
    )
}

fn css_for(style: &Style) -> String {
    let mut rules: Vec<String> = Vec::new();
    let mut foreground = style.color.and_then(|c| c.to_rgb());
    let mut background = style.bgcolor.and_then(|c| c.to_rgb());
    if style.reverse == Some(true) {
        let fg = foreground.unwrap_or(EXPORT_FOREGROUND);
        let bg = background.unwrap_or(EXPORT_BACKGROUND);
        foreground = Some(bg);
        background = Some(fg);
    }
    if let Some(fg) = foreground {
        rules.push(format!("color: {}", hex(fg)));
    }
    if let Some(bg) = background {
        rules.push(format!("background-color: {}", hex(bg)));
    }
    if style.bold == Some(true) {
        rules.push("font-weight: bold".to_string());
    }
    if style.dim == Some(true) {
        rules.push("opacity: 0.6".to_string());
    }
    if style.italic == Some(true) {
        rules.push("font-style: italic".to_string());
    }
    let decorations: Vec<&str> = [
        (style.underline, "underline"),
        (style.strike, "line-through"),
    ]
    .into_iter()
    .filter(|(on, _)| *on == Some(true))
    .map(|(_, name)| name)
    .collect();
    if !decorations.is_empty() {
        rules.push(format!("text-decoration: {}", decorations.join(" ")));
    }
    if style.conceal == Some(true) {
        rules.push("visibility: hidden".to_string());
    }
    rules.join("; ")
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Escape the characters HTML gives meaning to
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StyleTag;

    fn sample() -> StyledText {
        let mut text = StyledText::new("  ");
        text.append_styled("--flag", StyleTag::ARGS);
        text.append("  ");
        text.append_styled("Is <flag>?", StyleTag::HELP);
        text.append("\n");
        text
    }

    #[test]
    fn test_plain_output_ignores_styles() {
        let theme = Theme::named("default").unwrap();
        assert_eq!(
            render(&sample(), &theme, OutputFormat::Plain, "t"),
            "  --flag  Is <flag>?\n"
        );
    }

    #[test]
    fn test_ansi_output_colors_args() {
        colored::control::set_override(true);
        let theme = Theme::named("default").unwrap();
        let output = render_ansi(&sample(), &theme);
        assert!(output.contains("\u{1b}[36m--flag\u{1b}[0m"));
        // help is "default" in this theme, so it stays unstyled
        assert!(output.contains("  Is <flag>?\n"));
    }

    #[test]
    fn test_ansi_escapes_stop_at_newlines() {
        colored::control::set_override(true);
        let theme = Theme::named("default").unwrap();
        let text = StyledText::styled("one\ntwo", StyleTag::ARGS);
        let output = render_ansi(&text, &theme);
        for line in output.lines() {
            assert!(line.ends_with("\u{1b}[0m"));
        }
    }

    #[test]
    fn test_html_export() {
        let theme = Theme::named("default").unwrap();
        let html = render_html(&sample(), &theme, "PROG --help");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>PROG --help</title>"));
        assert!(html.contains("<span style=\"color: #008080\">--flag</span>"));
        assert!(html.contains("Is &lt;flag&gt;?"));
    }

    #[test]
    fn test_css_reverse_swaps_colors() {
        let style = Style::parse("white reverse bold").unwrap();
        assert_eq!(
            css_for(&style),
            "color: #000000; background-color: #c0c0c0; font-weight: bold"
        );
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}

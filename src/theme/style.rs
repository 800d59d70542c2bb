//! Visual attributes and the style string syntax
//!
//! A style string is a space separated list of words, e.g.
//! `"bold italic color(147) on #102030"` or `"not dim cyan"`.

use crate::error::{ThemeError, ThemeResult};
use std::fmt;

/// A terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's own foreground or background
    Default,
    /// One of the 256 palette entries; 0-15 are the standard colors
    Palette(u8),
    /// A 24-bit color
    Rgb(u8, u8, u8),
}

const STANDARD_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright_black",
    "bright_red",
    "bright_green",
    "bright_yellow",
    "bright_blue",
    "bright_magenta",
    "bright_cyan",
    "bright_white",
];

/// Palette names beyond the standard sixteen
const EXTENDED_NAMES: [(&str, u8); 10] = [
    ("dark_blue", 18),
    ("dark_green", 22),
    ("dark_cyan", 36),
    ("dark_red", 88),
    ("purple", 129),
    ("dark_orange", 208),
    ("orange1", 214),
    ("grey50", 244),
    ("grey70", 249),
    ("grey93", 255),
];

/// RGB values used when exporting the standard colors
const STANDARD_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl Color {
    /// Parse one color word
    pub fn parse(word: &str) -> Option<Color> {
        let word = word.to_lowercase();
        if word == "default" {
            return Some(Color::Default);
        }
        if let Some(index) = STANDARD_NAMES.iter().position(|name| *name == word) {
            return Some(Color::Palette(index as u8));
        }
        if let Some((_, index)) = EXTENDED_NAMES.iter().find(|(name, _)| *name == word) {
            return Some(Color::Palette(*index));
        }
        if let Some(number) = word
            .strip_prefix("color(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return number.trim().parse::<u8>().ok().map(Color::Palette);
        }
        if let Some(hex) = word.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
            }
        }
        None
    }

    /// The color as RGB, or `None` for the terminal default
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::Default => None,
            Color::Rgb(r, g, b) => Some((r, g, b)),
            Color::Palette(index) if index < 16 => Some(STANDARD_RGB[index as usize]),
            Color::Palette(index) if index < 232 => {
                let cube = index - 16;
                Some((
                    CUBE_LEVELS[(cube / 36) as usize],
                    CUBE_LEVELS[((cube / 6) % 6) as usize],
                    CUBE_LEVELS[(cube % 6) as usize],
                ))
            }
            Color::Palette(index) => {
                let grey = 8 + 10 * (index - 232);
                Some((grey, grey, grey))
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Default => f.write_str("default"),
            Color::Palette(index) if (*index as usize) < STANDARD_NAMES.len() => {
                f.write_str(STANDARD_NAMES[*index as usize])
            }
            Color::Palette(index) => write!(f, "color({})", index),
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Visual attributes of a style tag.
///
/// Every field is optional: `None` leaves whatever a lower layer set,
/// `Some(false)` switches an attribute off explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bgcolor: Option<Color>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
    pub reverse: Option<bool>,
    pub conceal: Option<bool>,
}

impl Style {
    /// Parse a style string
    pub fn parse(definition: &str) -> ThemeResult<Style> {
        let invalid = |reason: String| ThemeError::InvalidStyle {
            style: definition.to_string(),
            reason,
        };

        let mut style = Style::default();
        let mut words = definition.split_whitespace();
        while let Some(word) = words.next() {
            let word = word.to_lowercase();
            match word.as_str() {
                "none" => {}
                "on" => {
                    let color_word = words
                        .next()
                        .ok_or_else(|| invalid("'on' must be followed by a color".to_string()))?;
                    let color = Color::parse(color_word)
                        .ok_or_else(|| invalid(format!("unknown color '{}'", color_word)))?;
                    style.bgcolor = Some(color);
                }
                "not" => {
                    let attribute = words
                        .next()
                        .ok_or_else(|| invalid("'not' must be followed by an attribute".to_string()))?;
                    if !style.set_attribute(attribute, false) {
                        return Err(invalid(format!("unknown attribute '{}'", attribute)));
                    }
                }
                _ => {
                    if style.set_attribute(&word, true) {
                        continue;
                    }
                    let color = Color::parse(&word)
                        .ok_or_else(|| invalid(format!("unknown color or attribute '{}'", word)))?;
                    style.color = Some(color);
                }
            }
        }
        Ok(style)
    }

    fn set_attribute(&mut self, word: &str, value: bool) -> bool {
        let slot = match word.to_lowercase().as_str() {
            "bold" | "b" => &mut self.bold,
            "dim" | "d" => &mut self.dim,
            "italic" | "i" => &mut self.italic,
            "underline" | "u" => &mut self.underline,
            "strike" | "s" => &mut self.strike,
            "reverse" | "r" => &mut self.reverse,
            "conceal" | "c" => &mut self.conceal,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn combine(&self, other: &Style) -> Style {
        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            bold: other.bold.or(self.bold),
            dim: other.dim.or(self.dim),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            strike: other.strike.or(self.strike),
            reverse: other.reverse.or(self.reverse),
            conceal: other.conceal.or(self.conceal),
        }
    }

    /// True when rendering the style changes nothing
    pub fn is_plain(&self) -> bool {
        let color_set = |c: Option<Color>| matches!(c, Some(color) if color != Color::Default);
        !color_set(self.color)
            && !color_set(self.bgcolor)
            && self.attributes().all(|(_, on)| !on)
    }

    /// Attribute names with their effective value
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("bold", self.bold),
            ("dim", self.dim),
            ("italic", self.italic),
            ("underline", self.underline),
            ("strike", self.strike),
            ("reverse", self.reverse),
            ("conceal", self.conceal),
        ]
        .into_iter()
        .map(|(name, value)| (name, value.unwrap_or(false)))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = Vec::new();
        let explicit = [
            ("bold", self.bold),
            ("dim", self.dim),
            ("italic", self.italic),
            ("underline", self.underline),
            ("strike", self.strike),
            ("reverse", self.reverse),
            ("conceal", self.conceal),
        ];
        for (name, value) in explicit {
            match value {
                Some(true) => words.push(name.to_string()),
                Some(false) => words.push(format!("not {}", name)),
                None => {}
            }
        }
        if let Some(color) = self.color {
            words.push(color.to_string());
        }
        if let Some(bgcolor) = self.bgcolor {
            words.push(format!("on {}", bgcolor));
        }
        if words.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&words.join(" "))
        }
    }
}

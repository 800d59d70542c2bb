//! Built-in color themes
//!
//! Every theme also exists as `anti_<name>`, with each style reversed.

/// Prefix of the reversed variant of a theme
pub const ANTI_PREFIX: &str = "anti_";

/// Name of the theme used when none is configured
pub const DEFAULT_THEME: &str = "default";

type ThemeTable = &'static [(&'static str, &'static str)];

const BUILTIN_THEMES: [(&str, ThemeTable); 5] = [
    (
        "default",
        &[
            ("args", "cyan"),
            ("default", "color(245)"),
            ("groups", "dark_orange"),
            ("help", "default"),
            ("metavar", "dark_cyan"),
            ("prog", "color(123)"),
            ("syntax", "bold"),
            ("text", "default"),
        ],
    ),
    (
        "prince",
        &[
            ("args", "italic color(147)"),
            ("default", "color(245)"),
            ("groups", "blue bold"),
            ("help", "color(252)"),
            ("metavar", "color(96)"),
            ("syntax", "#E06C75"),
            ("text", "color(255)"),
        ],
    ),
    (
        "night_prince",
        &[
            ("args", "color(219)"),
            ("default", "color(240) bold"),
            ("groups", "color(174)"),
            ("help", "color(88) dim italic"),
            ("metavar", "color(132) bold italic"),
            ("prog", "color(251)"),
            ("syntax", "color(251)"),
            ("text", "color(93) dim"),
        ],
    ),
    (
        "black_and_white",
        &[
            ("args", "color(248)"),
            ("default", "bright_white bold"),
            ("groups", "white reverse bold"),
            ("help", "color(240) italic"),
            ("metavar", "color(250) dim"),
            ("syntax", "color(247) italic"),
            ("text", "color(255) bold"),
        ],
    ),
    (
        "grey_area",
        &[
            ("args", "color(248)"),
            ("default", "bright_white bold"),
            ("groups", "white reverse bold"),
            ("help", "color(240) italic"),
            ("metavar", "color(250) dim on color(236)"),
            ("syntax", "color(247) italic"),
            ("text", "color(255) bold"),
        ],
    ),
];

/// Style definitions of a built-in theme, without the `anti_` handling
pub(crate) fn builtin_table(name: &str) -> Option<ThemeTable> {
    BUILTIN_THEMES
        .iter()
        .find(|(theme, _)| *theme == name)
        .map(|(_, table)| *table)
}

/// Names of every built-in theme, reversed variants included
pub fn builtin_theme_names() -> Vec<String> {
    let plain = BUILTIN_THEMES.iter().map(|(name, _)| name.to_string());
    let anti = BUILTIN_THEMES
        .iter()
        .map(|(name, _)| format!("{}{}", ANTI_PREFIX, name));
    plain.chain(anti).collect()
}

/// Whether `name` is a built-in theme
pub fn is_builtin_theme(name: &str) -> bool {
    let base = name.strip_prefix(ANTI_PREFIX).unwrap_or(name);
    builtin_table(base).is_some()
}

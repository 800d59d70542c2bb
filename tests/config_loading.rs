//! Integration tests for configuration loading

mod common;

use common::{create_parser_file, create_test_config, create_test_config_in_subdir};
use richhelp::config::{find_config_file_from, load_config, parse_config, validate_config};
use richhelp::formatter::PlaceholderMode;
use richhelp::layout::WrapMode;
use richhelp::parser::ParserDefinition;
use richhelp::{HelpError, RenderContext};

const PARSER: &str = r#"
prog: tool
arguments:
  - flags: [-o, --output]
    help: write to the file given, or see --force
  - flags: --force
    action: store_true
    help: "overwrite %(prog)s output"
"#;

fn render(context: &RenderContext) -> richhelp::text::StyledText {
    let (_dir, path) = create_parser_file(PARSER);
    ParserDefinition::from_file(&path)
        .unwrap()
        .build(None)
        .unwrap()
        .format_help(context)
        .unwrap()
}

#[test]
fn test_load_explicit_config() {
    let (_dir, path) = create_test_config(
        r#"
width: 60
theme: night_prince
group_name_format: upper
styles:
  args: bold underline
"#,
    );

    let (config, found) = load_config(Some(&path)).unwrap();
    assert_eq!(found, Some(path));

    let context = RenderContext::from_config(&config).unwrap();
    assert_eq!(context.layout.width, 60);
    assert_eq!(context.theme.name(), "night_prince");
    assert_eq!(context.theme.get("args").unwrap().underline, Some(true));

    let help = render(&context);
    assert!(help.plain().starts_with("USAGE: tool [-h] [-o OUTPUT] [--force]\n\nOPTIONS:\n"));
    assert!(help.plain().contains("overwrite tool output"));
}

#[test]
fn test_discovery_from_subdir() {
    let (_dir, config_path, sub_dir) = create_test_config_in_subdir("width: 72\n");
    let found = find_config_file_from(sub_dir).unwrap();
    assert_eq!(found, config_path);
}

#[test]
fn test_empty_highlight_list_disables_highlighting() {
    let config = parse_config("highlights: []\n").unwrap();
    validate_config(&config).unwrap();
    let context = RenderContext::from_config(&config).unwrap().with_width(80);

    let help = render(&context);
    let chars: Vec<char> = help.plain().chars().collect();
    let args: Vec<String> = help
        .spans()
        .iter()
        .filter(|s| s.tag.as_str() == "args")
        .map(|s| chars[s.start..s.end].iter().collect())
        .collect();

    // usage and invocations only; "--force" in the help text stays plain
    assert_eq!(args.iter().filter(|a| *a == "--force").count(), 2);
}

#[test]
fn test_custom_highlights_and_styles() {
    let yaml = r#"
highlights:
  - pattern: '(?P<file>\bfile\b)'
    tags:
      file: metavar
  - '(?P<word>overwrite)'
styles:
  word: red bold
"#;
    let config = parse_config(yaml).unwrap();
    validate_config(&config).unwrap();
    let context = RenderContext::from_config(&config).unwrap().with_width(80);

    let help = render(&context);
    let chars: Vec<char> = help.plain().chars().collect();
    let tagged = |tag: &str| -> Vec<String> {
        help.spans()
            .iter()
            .filter(|s| s.tag.as_str() == tag)
            .map(|s| chars[s.start..s.end].iter().collect())
            .collect()
    };
    assert!(tagged("metavar").contains(&"file".to_string()));
    assert_eq!(tagged("word"), vec!["overwrite"]);
    assert!(context.theme.get("word").unwrap().bold == Some(true));
}

#[test]
fn test_formatter_presets_from_config() {
    let config = parse_config("formatter: raw_text\nshow_defaults: true\nplaceholders: strict\n").unwrap();
    let context = RenderContext::from_config(&config).unwrap();
    assert_eq!(context.layout.help_wrap, WrapMode::Raw);
    assert_eq!(context.layout.text_fill, WrapMode::Raw);
    assert!(context.policy.show_defaults);
    assert_eq!(context.placeholders, PlaceholderMode::Strict);
}

#[test]
fn test_strict_placeholders_propagate() {
    let config = parse_config("placeholders: strict\n").unwrap();
    let context = RenderContext::from_config(&config).unwrap();
    let parser = ParserDefinition::from_yaml("arguments:\n  - flags: --x\n    help: '%(nope)s'\n")
        .unwrap()
        .build(None)
        .unwrap();

    let err = parser.format_help(&context).unwrap_err();
    assert!(matches!(err, HelpError::Placeholder(_)));
    assert!(err.to_string().contains("--x"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, path) = create_test_config("theme: neon\n");
    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("neon"));
}

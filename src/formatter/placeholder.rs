//! `%(name)s` expansion in help strings
//!
//! Help, usage, descriptions and version strings may refer to attributes of
//! their action with printf-style conversions: `%(default)s`,
//! `%(prog)s`, `%(default)5.2f`, `%%` and so on.

use crate::error::{PlaceholderError, PlaceholderResult};
use crate::text::{escape_markup, StyleTag, StyledText};
use crate::usage::{ActionDescriptor, Metavar, ParamValue};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

/// A conversion specifier, or a lone `%` that starts none
const PLACEHOLDER_PATTERN: &str = r"%(?:\((?P<key>[^)]*)\))?(?P<flags>[#0\- +]*)(?P<width>\d+)?(?:\.(?P<precision>\d*))?[hlL]?(?P<conversion>[diouxXeEfFgGcrsa%])|%";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// What happens to a placeholder that cannot be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderMode {
    /// Fail with the offending action's name
    Strict,
    /// Keep the placeholder text as written
    #[default]
    Lenient,
}

/// Values a template may refer to
pub type FieldMap = BTreeMap<&'static str, ParamValue>;

/// Only `%(prog)s`
pub fn prog_fields(prog: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("prog", ParamValue::from(prog));
    fields
}

/// The closed set of attributes an action's help may refer to.
///
/// A hidden default is left out, so `%(default)s` is then a missing key.
pub fn action_fields(action: &ActionDescriptor, prog: &str) -> FieldMap {
    let mut fields = prog_fields(prog);
    fields.insert("dest", ParamValue::from(action.dest.as_str()));
    fields.insert(
        "option_strings",
        ParamValue::Str(sequence_repr(&action.option_strings, "[", "]")),
    );
    let metavar = match &action.metavar {
        None => ParamValue::None,
        Some(Metavar::Single(name)) => ParamValue::from(name.as_str()),
        Some(Metavar::Tuple(names)) => ParamValue::Str(sequence_repr(names, "(", ")")),
    };
    fields.insert("metavar", metavar);
    fields.insert("nargs", action.nargs.as_param());
    if let Some(default) = &action.default {
        fields.insert("default", default.clone());
    }
    fields.insert(
        "type",
        action
            .type_name
            .clone()
            .map(ParamValue::Str)
            .unwrap_or_default(),
    );
    fields.insert(
        "choices",
        action
            .choices
            .as_ref()
            .map(|choices| ParamValue::Str(choices.join(", ")))
            .unwrap_or_default(),
    );
    fields.insert("required", ParamValue::Bool(action.required));
    fields.insert(
        "help",
        action.help.clone().map(ParamValue::Str).unwrap_or_default(),
    );
    fields
}

/// Expand according to `mode`; `action` names the owner in errors
pub fn expand(
    template: &str,
    fields: &FieldMap,
    action: &str,
    mode: PlaceholderMode,
) -> PlaceholderResult<String> {
    let pieces = pieces(template, fields, action, mode)?;
    Ok(pieces.into_iter().map(|piece| piece.text).collect())
}

/// Like [`expand`], but substituted values are escaped so that markup in
/// them comes out as written
pub fn expand_markup(
    template: &str,
    fields: &FieldMap,
    action: &str,
    mode: PlaceholderMode,
) -> PlaceholderResult<String> {
    let pieces = pieces(template, fields, action, mode)?;
    Ok(pieces
        .into_iter()
        .map(|piece| match piece.key {
            Some(_) => escape_markup(&piece.text),
            None => piece.text,
        })
        .collect())
}

/// Expand a usage string, tagging every `%(prog)s` substitution
pub fn expand_usage(
    template: &str,
    prog: &str,
    mode: PlaceholderMode,
) -> PlaceholderResult<StyledText> {
    let mut text = StyledText::default();
    for piece in pieces(template, &prog_fields(prog), "usage", mode)? {
        match piece.key {
            Some("prog") => text.append_styled(&piece.text, StyleTag::PROG),
            _ => text.append(&piece.text),
        }
    }
    Ok(text)
}

struct Piece<'t> {
    text: String,
    /// Set for successful substitutions
    key: Option<&'t str>,
}

fn pieces<'t>(
    template: &'t str,
    fields: &FieldMap,
    action: &str,
    mode: PlaceholderMode,
) -> PlaceholderResult<Vec<Piece<'t>>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            pieces.push(Piece {
                text: template[last..whole.start()].to_string(),
                key: None,
            });
        }
        last = whole.end();

        match expand_one(&caps, fields, action) {
            Ok((text, key)) => pieces.push(Piece { text, key }),
            Err(err) if mode == PlaceholderMode::Lenient => {
                debug!(error = %err, "leaving placeholder unexpanded");
                pieces.push(Piece {
                    text: whole.as_str().to_string(),
                    key: None,
                });
            }
            Err(err) => return Err(err),
        }
    }

    if last < template.len() {
        pieces.push(Piece {
            text: template[last..].to_string(),
            key: None,
        });
    }
    Ok(pieces)
}

fn expand_one<'t>(
    caps: &Captures<'t>,
    fields: &FieldMap,
    action: &str,
) -> PlaceholderResult<(String, Option<&'t str>)> {
    let spec = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let unnamed = || PlaceholderError::Unnamed {
        action: action.to_string(),
        spec: spec.to_string(),
    };

    let conversion = caps
        .name("conversion")
        .and_then(|c| c.as_str().chars().next())
        .ok_or_else(unnamed)?;
    let key = caps.name("key").map(|k| k.as_str());

    if conversion == '%' {
        return Ok(("%".to_string(), None));
    }
    let key = key.ok_or_else(unnamed)?;
    let value = fields.get(key).ok_or_else(|| PlaceholderError::MissingKey {
        action: action.to_string(),
        key: key.to_string(),
    })?;

    let conversion_spec = Conversion {
        flags: caps.name("flags").map(|f| f.as_str()).unwrap_or_default(),
        width: caps.name("width").and_then(|w| w.as_str().parse().ok()),
        precision: caps
            .name("precision")
            .map(|p| p.as_str().parse().unwrap_or(0)),
        kind: conversion,
    };

    format_value(value, &conversion_spec)
        .map(|text| (text, Some(key)))
        .ok_or_else(|| PlaceholderError::InvalidConversion {
            action: action.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            conversion,
        })
}

/// A parsed `%[flags][width][.precision]kind`
struct Conversion<'a> {
    flags: &'a str,
    width: Option<usize>,
    precision: Option<usize>,
    kind: char,
}

impl Conversion<'_> {
    fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.has_flag('+') {
            "+"
        } else if self.has_flag(' ') {
            " "
        } else {
            ""
        }
    }
}

/// `None` when the value cannot be formatted with this conversion
fn format_value(value: &ParamValue, spec: &Conversion<'_>) -> Option<String> {
    let alternate = spec.has_flag('#');
    let (lead, body, numeric) = match spec.kind {
        's' => (String::new(), truncate(value.to_string(), spec.precision), false),
        'r' | 'a' => (String::new(), truncate(value_repr(value), spec.precision), false),
        'c' => (String::new(), char_of(value)?, false),
        'd' | 'i' | 'u' => {
            let n = as_int(value)?;
            let digits = zero_extend(n.unsigned_abs().to_string(), spec.precision);
            (spec.sign(n < 0).to_string(), digits, true)
        }
        'o' | 'x' | 'X' => {
            let n = as_int(value)?;
            let magnitude = n.unsigned_abs();
            let (prefix, digits) = match spec.kind {
                'o' => ("0o", format!("{:o}", magnitude)),
                'x' => ("0x", format!("{:x}", magnitude)),
                _ => ("0X", format!("{:X}", magnitude)),
            };
            let prefix = if alternate { prefix } else { "" };
            let lead = format!("{}{}", spec.sign(n < 0), prefix);
            (lead, zero_extend(digits, spec.precision), true)
        }
        'e' | 'E' | 'f' | 'F' | 'g' | 'G' => {
            let x = as_float(value)?;
            let body = format_float(x.abs(), spec.kind, spec.precision, alternate);
            (spec.sign(x.is_sign_negative() && !x.is_nan()).to_string(), body, true)
        }
        _ => return None,
    };
    Some(pad(lead, body, numeric, spec))
}

fn pad(lead: String, body: String, numeric: bool, spec: &Conversion<'_>) -> String {
    let length = lead.chars().count() + body.chars().count();
    match spec.width {
        Some(width) if width > length => {
            let fill = width - length;
            if spec.has_flag('-') {
                format!("{}{}{}", lead, body, " ".repeat(fill))
            } else if numeric && spec.has_flag('0') {
                format!("{}{}{}", lead, "0".repeat(fill), body)
            } else {
                format!("{}{}{}", " ".repeat(fill), lead, body)
            }
        }
        _ => format!("{}{}", lead, body),
    }
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(limit) => text.chars().take(limit).collect(),
        None => text,
    }
}

fn zero_extend(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(min_digits) if min_digits > digits.len() => {
            format!("{}{}", "0".repeat(min_digits - digits.len()), digits)
        }
        _ => digits,
    }
}

fn as_int(value: &ParamValue) -> Option<i64> {
    match value {
        ParamValue::Int(n) => Some(*n),
        ParamValue::Bool(b) => Some(i64::from(*b)),
        ParamValue::Float(x) if x.is_finite() => Some(x.trunc() as i64),
        _ => None,
    }
}

fn as_float(value: &ParamValue) -> Option<f64> {
    match value {
        ParamValue::Int(n) => Some(*n as f64),
        ParamValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        ParamValue::Float(x) => Some(*x),
        _ => None,
    }
}

fn char_of(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Int(n) => u32::try_from(*n)
            .ok()
            .and_then(char::from_u32)
            .map(String::from),
        ParamValue::Str(s) if s.chars().count() == 1 => Some(s.clone()),
        _ => None,
    }
}

/// Format a non-negative float for `e`, `f` or `g` conversions
fn format_float(x: f64, kind: char, precision: Option<usize>, alternate: bool) -> String {
    let upper = kind.is_ascii_uppercase();
    let body = if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        "inf".to_string()
    } else {
        let precision = precision.unwrap_or(6);
        match kind.to_ascii_lowercase() {
            'f' => {
                let fixed = format!("{:.*}", precision, x);
                if alternate && precision == 0 {
                    fixed + "."
                } else {
                    fixed
                }
            }
            'e' => exponential(x, precision, alternate),
            _ => general(x, precision, alternate),
        }
    };
    if upper {
        body.to_uppercase()
    } else {
        body
    }
}

/// `d.dddddde+XX`
fn exponential(x: f64, precision: usize, alternate: bool) -> String {
    let formatted = format!("{:.*e}", precision, x);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let point = if alternate && precision == 0 { "." } else { "" };
    format!(
        "{}{}e{}{:02}",
        mantissa,
        point,
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

/// Fixed or exponential, whichever `%g` picks, trailing zeros removed
fn general(x: f64, precision: usize, alternate: bool) -> String {
    let significant = precision.max(1);
    let exponent = if x == 0.0 {
        0
    } else {
        let scientific = format!("{:.*e}", significant - 1, x);
        scientific
            .split_once('e')
            .and_then(|(_, e)| e.parse::<i32>().ok())
            .unwrap_or(0)
    };

    let formatted = if exponent < -4 || exponent >= significant as i32 {
        exponential(x, significant - 1, alternate)
    } else {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, x)
    };

    if alternate {
        return formatted;
    }
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", strip_zeros(mantissa), exponent),
        None => strip_zeros(&formatted).to_string(),
    }
}

fn strip_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

fn value_repr(value: &ParamValue) -> String {
    match value {
        ParamValue::Str(s) => quoted_repr(s),
        other => other.to_string(),
    }
}

fn quoted_repr(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s.replace('\\', "\\\\"))
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

fn sequence_repr(items: &[String], open: &str, close: &str) -> String {
    let inner: Vec<String> = items.iter().map(|item| quoted_repr(item)).collect();
    if open == "(" && inner.len() == 1 {
        format!("({},)", inner[0])
    } else {
        format!("{}{}{}", open, inner.join(", "), close)
    }
}

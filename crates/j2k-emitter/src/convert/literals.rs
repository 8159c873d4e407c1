//! Literal spelling.
//!
//! Java and Kotlin literal syntax mostly agree. The differences handled here:
//! octal integers, `l`/`d` suffixes, bare-dot floats, hex and binary `int`
//! values above `Int.MAX_VALUE`, string templates, and escapes Kotlin lacks.

use j2k_syntax::{Literal, Primitive};

use crate::errors::ConvertError;

/// Kotlin spelling of a Java literal.
pub fn convert_literal(literal: &Literal) -> Result<String, ConvertError> {
    Ok(match literal {
        Literal::Int { text } => convert_integer(text, false)?,
        Literal::Long { text } => {
            let body = text.strip_suffix(['l', 'L']).unwrap_or(text);
            let mut out = convert_integer(body, true)?;
            out.push('L');
            out
        }
        Literal::Float { text } => {
            let body = text.strip_suffix(['f', 'F']).unwrap_or(text);
            let mut out = fix_decimal_point(body);
            out.push('f');
            out
        }
        Literal::Double { text } => {
            let body = text.strip_suffix(['d', 'D']).unwrap_or(text);
            let mut out = fix_decimal_point(body);
            if !out.contains(['.', 'e', 'E', 'x', 'X']) {
                out.push_str(".0");
            }
            out
        }
        Literal::Char { text } => format!("'{}'", escape_char_content(text)),
        Literal::String { text } => format!("\"{}\"", escape_string_content(text)),
        Literal::Bool { value } => value.to_string(),
        Literal::Null => "null".to_string(),
    })
}

#[derive(Clone, Copy)]
enum Radix {
    Decimal,
    Octal,
    Hex,
    Binary,
}

fn split_radix(text: &str) -> (Radix, &str) {
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (Radix::Hex, digits)
    } else if let Some(digits) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (Radix::Binary, digits)
    } else if text.len() > 1 && text.starts_with('0') {
        (Radix::Octal, &text[1..])
    } else {
        (Radix::Decimal, text)
    }
}

fn parse_digits(digits: &str, radix: u32, original: &str) -> Result<u64, ConvertError> {
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    u64::from_str_radix(&cleaned, radix).map_err(|_| {
        ConvertError::invalid("literal", format!("`{original}` is not a valid integer"))
    })
}

fn convert_integer(text: &str, long: bool) -> Result<String, ConvertError> {
    let (radix, digits) = split_radix(text);
    let (max, unsigned_max) = if long {
        (i64::MAX as u64, u64::MAX)
    } else {
        (i32::MAX as u64, u64::from(u32::MAX))
    };
    Ok(match radix {
        Radix::Decimal => {
            parse_digits(digits, 10, text)?;
            text.to_string()
        }
        Radix::Octal => {
            let value = parse_digits(digits, 8, text)?;
            if value > unsigned_max {
                return Err(ConvertError::invalid(
                    "literal",
                    format!("`{text}` is out of range"),
                ));
            }
            // Octal is two's complement in Java; Kotlin has no octal syntax.
            if value <= max {
                value.to_string()
            } else if long {
                (value as i64).to_string()
            } else {
                (value as u32 as i32).to_string()
            }
        }
        Radix::Hex | Radix::Binary => {
            let base = if matches!(radix, Radix::Hex) { 16 } else { 2 };
            let value = parse_digits(digits, base, text)?;
            if value > unsigned_max {
                return Err(ConvertError::invalid(
                    "literal",
                    format!("`{text}` is out of range"),
                ));
            }
            if value <= max {
                text.to_string()
            } else if long {
                (value as i64).to_string()
            } else {
                format!("{text}.toInt()")
            }
        }
    })
}

/// Numeric value of an integer literal, with Java's radix prefixes and
/// two's complement wrap for hex, octal and binary spellings.
pub(crate) fn integer_value(literal: &Literal) -> Option<i64> {
    let (text, long) = match literal {
        Literal::Int { text } => (text.as_str(), false),
        Literal::Long { text } => (text.strip_suffix(['l', 'L']).unwrap_or(text), true),
        _ => return None,
    };
    let (radix, digits) = split_radix(text);
    let base = match radix {
        Radix::Decimal => 10,
        Radix::Octal => 8,
        Radix::Hex => 16,
        Radix::Binary => 2,
    };
    let value = parse_digits(digits, base, text).ok()?;
    Some(match (radix, long) {
        (Radix::Decimal, _) => i64::try_from(value).ok()?,
        (_, true) => value as i64,
        (_, false) => i64::from(u32::try_from(value).ok()? as i32),
    })
}

/// Integer literal respelled for a wider primitive target: `1` as `1L`,
/// `1.0f` or `1.0`. `None` when no respelling is needed.
pub(crate) fn widened_literal(literal: &Literal, target: Primitive) -> Option<String> {
    let from_long = matches!(literal, Literal::Long { .. });
    let value = integer_value(literal)?;
    match target {
        Primitive::Long if !from_long => Some(format!("{value}L")),
        Primitive::Float => Some(format!("{value}.0f")),
        Primitive::Double => Some(format!("{value}.0")),
        _ => None,
    }
}

/// `.5` → `0.5`, `1.` → `1.0`, `1.e3` → `1.0e3`.
fn fix_decimal_point(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    if body.starts_with('.') {
        out.push('0');
    }
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '.' && chars.peek().is_none_or(|next| !next.is_ascii_digit()) {
            out.push('0');
        }
    }
    out
}

/// Contents of a Kotlin char literal from Java char literal contents.
pub fn escape_char_content(text: &str) -> String {
    convert_escapes(text, false)
}

/// Contents of a Kotlin string literal from Java string literal contents;
/// `$` is escaped so it never starts a template.
pub fn escape_string_content(text: &str) -> String {
    convert_escapes(text, true)
}

fn convert_escapes(text: &str, in_string: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' if in_string => out.push_str("\\$"),
            '\\' => match chars.next() {
                Some(e @ ('t' | 'b' | 'n' | 'r' | '\'' | '"' | '\\')) => {
                    out.push('\\');
                    out.push(e);
                }
                Some('f') => out.push_str("\\u000c"),
                Some('s') => out.push(' '),
                Some('u') => {
                    while chars.peek() == Some(&'u') {
                        chars.next();
                    }
                    out.push_str("\\u");
                }
                Some(first @ '0'..='7') => {
                    let mut value = first.to_digit(8).unwrap_or(0);
                    let max_len = if first <= '3' { 3 } else { 2 };
                    let mut len = 1;
                    while len < max_len
                        && let Some(digit) = chars.peek().and_then(|d| d.to_digit(8))
                    {
                        value = value * 8 + digit;
                        chars.next();
                        len += 1;
                    }
                    out.push_str(&format!("\\u{value:04x}"));
                }
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push_str("\\\\"),
            },
            _ => out.push(c),
        }
    }
    out
}

//! Decoded string literals and the helpers that move between source form
//! and text form.

use std::fmt;

/// Where a literal was first seen.
///
/// The registry only ever stores `Code` or `Config`; `Both` selects every
/// entry when writing a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Code,
    Config,
    Both,
}

impl Origin {
    /// Whether an entry of origin `self` belongs in a catalog filtered by `filter`.
    pub fn selected_by(self, filter: Origin) -> bool {
        filter == Origin::Both || self == filter
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Code => write!(f, "code"),
            Origin::Config => write!(f, "config"),
            Origin::Both => write!(f, "both"),
        }
    }
}

/// Decoded, unescaped content of a string fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub origin: Origin,
}

impl Literal {
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// Decode a string fragment produced by the scanner.
///
/// Strips the `@`/`$` prefix and the quotes. Verbatim content (prefix with
/// `@`) collapses doubled quotes; everything else interprets C# escapes.
/// Returns `None` when the fragment is not one complete literal, such as an
/// unterminated string or the continuation of a multi-line verbatim string.
pub fn decode_fragment(fragment: &str) -> Option<String> {
    let quote = fragment.find('"')?;
    let prefix = &fragment[..quote];
    if !prefix.bytes().all(|b| b == b'@' || b == b'$') {
        return None;
    }
    let body = &fragment[quote + 1..];
    if prefix.contains('@') {
        decode_verbatim(body)
    } else {
        decode_standard(body)
    }
}

fn decode_verbatim(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '"' {
            out.push(c);
            continue;
        }
        if chars.peek().is_some_and(|&(_, n)| n == '"') {
            chars.next();
            out.push('"');
            continue;
        }
        // Closing quote: must be the last character.
        return (idx + 1 == body.len()).then_some(out);
    }
    None
}

fn decode_standard(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return (idx + 1 == body.len()).then_some(out),
            '\\' => {
                let (_, esc) = chars.next()?;
                match esc {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0C}'),
                    'v' => out.push('\u{0B}'),
                    'u' => out.push(read_hex(&mut chars, 4, 4)?),
                    'U' => out.push(read_hex(&mut chars, 8, 8)?),
                    'x' => out.push(read_hex(&mut chars, 1, 4)?),
                    other => out.push(other),
                }
            }
            _ => out.push(c),
        }
    }
    None
}

fn read_hex(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    min: usize,
    max: usize,
) -> Option<char> {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.peek() {
            Some(&(_, c)) if c.is_ascii_hexdigit() => {
                digits.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    if digits.len() < min {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
}

/// Serialize text as a standard (non-verbatim) quoted C# string.
///
/// Newlines are always written as the two characters `\n`.
pub fn encode_standard(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A literal that is already a catalog key reference, e.g. `#MyMod_Title`.
pub fn is_key_reference(text: &str) -> bool {
    text.strip_prefix('#').is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

//! C# source rewriting.
//!
//! Every translatable string literal is replaced by a catalog key reference,
//! either `Localizer.Format("#KEY")` or, where a call is not a constant
//! expression (attribute arguments, `ATTRIBUTE_LOCALIZATION` regions), a bare
//! `"#KEY"` string.

use crate::core::{
    classify::classify,
    literal::{Origin, decode_fragment, encode_standard, is_key_reference},
    markup::{Segment, split_markup},
    patterns::PatternSet,
    registry::KeyRegistry,
    scanner::{ScanState, Token, WRAP_CALL, scan_line},
};

use super::{FileRewrite, LineChange, LineLayout};

pub const LOCALIZATION_USING: &str = "using KSP.Localization;";

const NO_LOCALIZATION: &str = "NO_LOCALIZATION";
const ATTRIBUTE_LOCALIZATION: &str = "ATTRIBUTE_LOCALIZATION";
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Excluded,
    StringOutput,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenLine {
    pub text: String,
    pub modified: bool,
    /// Byte offset of the first replaced literal in the input line.
    pub offset: usize,
}

impl RewrittenLine {
    fn unchanged(line: &str) -> Self {
        Self {
            text: line.to_string(),
            modified: false,
            offset: 0,
        }
    }
}

/// Per-file rewriting state. Create a new one for every file.
#[derive(Debug)]
pub struct CodeRewriter<'a> {
    exclude: &'a PatternSet,
    scan: ScanState,
    regions: Vec<Region>,
    /// Open `[` brackets of the attribute being scanned; zero outside one.
    attribute_depth: usize,
}

impl<'a> CodeRewriter<'a> {
    pub fn new(exclude: &'a PatternSet) -> Self {
        Self {
            exclude,
            scan: ScanState::default(),
            regions: Vec::new(),
            attribute_depth: 0,
        }
    }

    pub fn rewrite_line(&mut self, line: &str, registry: &mut KeyRegistry) -> RewrittenLine {
        // Directives and attributes only count when the line starts in code.
        let in_code = self.scan == ScanState::default();
        let (tokens, next) = scan_line(line, self.scan);
        self.scan = next;
        let trimmed = line.trim_start();

        if in_code {
            if let Some(region) = region_start(trimmed) {
                self.regions.push(region);
                return RewrittenLine::unchanged(line);
            }
            if is_region_end(trimmed) {
                self.regions.pop();
                return RewrittenLine::unchanged(line);
            }
            if trimmed.starts_with('[') && !self.is_excluded() {
                self.attribute_depth = 0;
                let depth: isize = tokens.iter().map(bracket_delta).sum();
                if depth > 0 && !tokens.iter().any(ends_statement) {
                    self.attribute_depth = depth.unsigned_abs();
                }
                return RewrittenLine::unchanged(line);
            }
        }

        if self.is_excluded() || trimmed.starts_with("case ") || self.exclude.matches_any(line) {
            for token in &tokens {
                self.track_attribute(token);
            }
            return RewrittenLine::unchanged(line);
        }

        self.replace_strings(&tokens, registry)
    }

    fn replace_strings(&mut self, tokens: &[Token], registry: &mut KeyRegistry) -> RewrittenLine {
        let mut text = String::new();
        let mut first_change = None;
        let mut offset = 0;

        for token in tokens {
            match token {
                Token::Code(code) => text.push_str(code),
                Token::Str { text: fragment, raw } => {
                    match self.localize(fragment, *raw, registry) {
                        Some(replacement) => {
                            first_change.get_or_insert(offset);
                            text.push_str(&replacement);
                        }
                        None => text.push_str(fragment),
                    }
                }
            }
            self.track_attribute(token);
            offset += token.text().len();
        }

        RewrittenLine {
            text,
            modified: first_change.is_some(),
            offset: first_change.unwrap_or(0),
        }
    }

    /// Replacement text for one string fragment, or `None` to keep it.
    fn localize(&self, fragment: &str, raw: bool, registry: &mut KeyRegistry) -> Option<String> {
        let literal = decode_fragment(fragment)?;
        if is_key_reference(&literal) || !classify(&literal, raw).is_translatable() {
            return None;
        }

        let segments = split_markup(&literal);
        if !segments.iter().any(|s| matches!(s, Segment::Localized(_))) {
            return None;
        }

        let bare = self.emits_bare_strings();
        let mut units: Vec<String> = segments
            .iter()
            .map(|segment| match segment {
                Segment::Localized(text) => {
                    key_reference(&registry.lookup_or_create(text, Origin::Code), bare)
                }
                Segment::Literal(text) => encode_standard(text),
            })
            .collect();

        if units.len() == 1 {
            units.pop()
        } else {
            Some(format!("({})", units.join(" + ")))
        }
    }

    fn track_attribute(&mut self, token: &Token) {
        if self.attribute_depth == 0 {
            return;
        }
        if ends_statement(token) {
            self.attribute_depth = 0;
            return;
        }
        let depth = self.attribute_depth as isize + bracket_delta(token);
        self.attribute_depth = depth.max(0).unsigned_abs();
    }

    fn is_excluded(&self) -> bool {
        self.regions.contains(&Region::Excluded)
    }

    fn emits_bare_strings(&self) -> bool {
        self.attribute_depth > 0 || self.regions.contains(&Region::StringOutput)
    }
}

/// Rewrite a whole C# file.
///
/// The `using KSP.Localization;` directive is added when the file changed and
/// does not import the namespace yet.
pub fn rewrite_code(source: &str, exclude: &PatternSet, registry: &mut KeyRegistry) -> FileRewrite {
    let (bom, body) = match source.strip_prefix(BYTE_ORDER_MARK) {
        Some(body) => (true, body),
        None => (false, source),
    };
    let mut layout = LineLayout::detect(body);
    let mut rewriter = CodeRewriter::new(exclude);
    let mut lines = Vec::new();
    let mut changes = Vec::new();

    for (idx, line) in body.lines().enumerate() {
        let rewritten = rewriter.rewrite_line(line, registry);
        if rewritten.modified {
            changes.push(LineChange {
                line: idx + 1,
                offset: rewritten.offset,
                before: line.to_string(),
                after: rewritten.text.clone(),
            });
        }
        lines.push(rewritten.text);
    }

    let using_inserted = !changes.is_empty() && !imports_localization(&lines);
    if using_inserted {
        let at = lines.iter().position(|l| is_using_directive(l)).unwrap_or(0);
        lines.insert(at, LOCALIZATION_USING.to_string());
        layout.insert(at);
    }

    let mut content = layout.join(&lines);
    if bom {
        content.insert(0, BYTE_ORDER_MARK);
    }
    FileRewrite {
        content,
        changes,
        using_inserted,
    }
}

fn imports_localization(lines: &[String]) -> bool {
    lines
        .iter()
        .any(|l| l.trim_start().starts_with(LOCALIZATION_USING))
}

/// `using System;`, `using static X;` or `using A = B;`, but not a `using`
/// statement or declaration inside a method body.
fn is_using_directive(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("using ") else {
        return false;
    };
    let rest = rest.trim();
    rest.ends_with(';')
        && !rest.contains('(')
        && !rest.starts_with("var ")
        && rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
}

fn key_reference(key: &str, bare: bool) -> String {
    if bare {
        format!("\"#{}\"", key)
    } else {
        format!("{}\"#{}\")", WRAP_CALL, key)
    }
}

fn region_start(trimmed: &str) -> Option<Region> {
    let directive = trimmed.get(.."#region".len())?;
    if !directive.eq_ignore_ascii_case("#region") {
        return None;
    }
    let upper = trimmed.to_ascii_uppercase();
    Some(if upper.contains(NO_LOCALIZATION) {
        Region::Excluded
    } else if upper.contains(ATTRIBUTE_LOCALIZATION) {
        Region::StringOutput
    } else {
        Region::Neutral
    })
}

fn is_region_end(trimmed: &str) -> bool {
    trimmed
        .get(.."#endregion".len())
        .is_some_and(|d| d.eq_ignore_ascii_case("#endregion"))
}

/// Code part of a fragment, without any trailing line comment.
fn code_text(token: &Token) -> &str {
    match token {
        Token::Code(code) => code.find("//").map_or(code.as_str(), |i| &code[..i]),
        Token::Str { .. } => "",
    }
}

fn ends_statement(token: &Token) -> bool {
    code_text(token).contains(';')
}

fn bracket_delta(token: &Token) -> isize {
    code_text(token)
        .bytes()
        .map(|b| match b {
            b'[' => 1,
            b']' => -1,
            _ => 0,
        })
        .sum()
}

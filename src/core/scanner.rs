//! Line-oriented lexical scanner for C# source text.
//!
//! Splits one line into code and string fragments without building an AST.
//! State that must survive a line break (an open block comment or an open
//! verbatim string) lives in [`ScanState`], which the caller threads from one
//! call to the next and resets for every file.
//!
//! Tokenization is lossless: concatenating the text of every returned token
//! reproduces the input line exactly.

/// Opening of a call that already wraps a catalog key.
///
/// Strings passed directly to this call are absorbed into the surrounding
/// code fragment so they are never wrapped a second time.
pub const WRAP_CALL: &str = "Localizer.Format(";

/// Scanner state carried across line boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_block_comment: bool,
    pub in_raw_string: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Code, comments and already-wrapped calls, copied verbatim.
    Code(String),
    /// A string literal exactly as written, prefix and quotes included.
    ///
    /// `raw` is set for `@`/`$` prefixed strings and for the continuation of
    /// a verbatim string opened on an earlier line.
    Str { text: String, raw: bool },
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Code(text) => text,
            Token::Str { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    LineComment,
    BlockComment,
    Str {
        verbatim: bool,
        raw: bool,
        absorbed: bool,
    },
}

/// Tokenize one line.
///
/// Returns the tokens in left-to-right order and the state to pass in with
/// the next line. An unterminated standard string is closed at end of line;
/// an unterminated verbatim string stays open in the returned state.
pub fn scan_line(line: &str, state: ScanState) -> (Vec<Token>, ScanState) {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();

    let mut mode = if state.in_raw_string {
        Mode::Str {
            verbatim: true,
            raw: true,
            absorbed: false,
        }
    } else if state.in_block_comment {
        Mode::BlockComment
    } else {
        Mode::Code
    };

    // Start of the pending fragment. Only ASCII bytes are ever used as split
    // points, so every slice lands on a char boundary.
    let mut start = 0;
    let mut escape_next = false;
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match mode {
            Mode::LineComment => {
                i = len;
            }
            Mode::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    mode = Mode::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            Mode::Str {
                verbatim,
                raw,
                absorbed,
            } => {
                let closes = if verbatim {
                    if b == b'"' && next == Some(b'"') {
                        i += 2;
                        continue;
                    }
                    b == b'"'
                } else if escape_next {
                    escape_next = false;
                    false
                } else if b == b'\\' {
                    escape_next = true;
                    false
                } else {
                    b == b'"'
                };

                if closes {
                    if !absorbed {
                        tokens.push(Token::Str {
                            text: line[start..=i].to_string(),
                            raw,
                        });
                        start = i + 1;
                    }
                    mode = Mode::Code;
                }
                i += 1;
            }
            Mode::Code => {
                if b == b'/' && next == Some(b'/') {
                    mode = Mode::LineComment;
                    i = len;
                } else if b == b'/' && next == Some(b'*') {
                    mode = Mode::BlockComment;
                    i += 2;
                } else if b == b'\'' {
                    i += char_literal_len(bytes, i).unwrap_or(1);
                } else if b == b'"' {
                    escape_next = false;
                    if follows_wrap_call(bytes, i) {
                        mode = Mode::Str {
                            verbatim: false,
                            raw: false,
                            absorbed: true,
                        };
                    } else {
                        let (prefix_len, verbatim) = prefix_run(bytes, i, start);
                        let quote_start = i - prefix_len;
                        if quote_start > start {
                            tokens.push(Token::Code(line[start..quote_start].to_string()));
                        }
                        start = quote_start;
                        mode = Mode::Str {
                            verbatim,
                            raw: prefix_len > 0,
                            absorbed: false,
                        };
                    }
                    i += 1;
                } else {
                    i += 1;
                }
            }
        }
    }

    if start < len {
        let rest = line[start..].to_string();
        match mode {
            Mode::Str {
                raw,
                absorbed: false,
                ..
            } => tokens.push(Token::Str { text: rest, raw }),
            _ => tokens.push(Token::Code(rest)),
        }
    }

    let out = ScanState {
        in_block_comment: mode == Mode::BlockComment,
        in_raw_string: matches!(
            mode,
            Mode::Str {
                verbatim: true,
                absorbed: false,
                ..
            }
        ),
    };
    (tokens, out)
}

/// Length of the `@`/`$` run ending right before the quote at `quote`, never
/// reaching below `floor`. The flag reports whether the run selects verbatim
/// quoting (contains `@`).
fn prefix_run(bytes: &[u8], quote: usize, floor: usize) -> (usize, bool) {
    let mut p = quote;
    let mut verbatim = false;
    while p > floor {
        match bytes[p - 1] {
            b'@' => verbatim = true,
            b'$' => {}
            _ => break,
        }
        p -= 1;
    }
    (quote - p, verbatim)
}

fn follows_wrap_call(bytes: &[u8], quote: usize) -> bool {
    let marker = WRAP_CALL.as_bytes();
    quote >= marker.len() && &bytes[quote - marker.len()..quote] == marker
}

/// Length of a character literal starting at `start` (`'x'`, `'\''`,
/// `'\u0041'`), or `None` if the quote does not open one.
fn char_literal_len(bytes: &[u8], start: usize) -> Option<usize> {
    let first = *bytes.get(start + 1)?;
    if first == b'\'' {
        return None;
    }
    let (search_from, limit) = if first == b'\\' {
        (start + 3, start + 12)
    } else {
        (start + 2, start + 6)
    };
    let limit = limit.min(bytes.len());
    (search_from..limit)
        .find(|&j| bytes[j] == b'\'')
        .map(|j| j - start + 1)
}

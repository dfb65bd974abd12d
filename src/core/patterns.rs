//! Include/exclude pattern matching.
//!
//! Patterns come from the config file as plain strings. Each one is either a
//! literal substring or a regular expression, decided by [`looks_like_regex`].
//! Matching is always case-insensitive.

use glob::Pattern as GlobPattern;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regex pattern \"{pattern}\": {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid file pattern \"{pattern}\": {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// A single matching unit as written in the config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub text: String,
    pub is_regex: bool,
}

impl Pattern {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_regex: looks_like_regex(text),
        }
    }
}

/// Heuristic regex detection.
///
/// Anchors (`^` at the start, `$` at the end) or any of the metacharacters
/// `* + ? { } | ( ) [ ] \` mark a pattern as a regex.
pub fn looks_like_regex(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if pattern.starts_with('^') || pattern.ends_with('$') {
        return true;
    }
    pattern.chars().any(|c| {
        matches!(
            c,
            '*' | '+' | '?' | '{' | '}' | '|' | '(' | ')' | '[' | ']' | '\\'
        )
    })
}

#[derive(Debug)]
enum Matcher {
    Substring(String),
    Regex(Regex),
}

impl Matcher {
    fn is_match(&self, lowered: &str, original: &str) -> bool {
        match self {
            Matcher::Substring(needle) => lowered.contains(needle.as_str()),
            Matcher::Regex(re) => re.is_match(original),
        }
    }
}

/// A compiled set of text patterns.
#[derive(Debug, Default)]
pub struct PatternSet {
    matchers: Vec<Matcher>,
}

impl PatternSet {
    /// Compile every pattern up front. An invalid regex is an error, never a
    /// silently disabled pattern.
    pub fn compile<S: AsRef<str>>(raw: &[S]) -> Result<Self, PatternError> {
        let mut set = PatternSet::default();
        for text in raw {
            let pattern = Pattern::new(text.as_ref());
            let matcher = if pattern.is_regex {
                let re = RegexBuilder::new(&pattern.text)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PatternError::InvalidRegex {
                        pattern: pattern.text.clone(),
                        source,
                    })?;
                Matcher::Regex(re)
            } else {
                Matcher::Substring(pattern.text.to_lowercase())
            };
            set.matchers.push(matcher);
        }
        Ok(set)
    }

    /// True if `text` matches at least one pattern.
    pub fn matches_any(&self, text: &str) -> bool {
        if self.matchers.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.matchers.iter().any(|m| m.is_match(&lowered, text))
    }
}

/// Check if a file pattern contains glob wildcards.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

#[derive(Debug)]
enum FileMatcher {
    Glob(GlobPattern),
    Substring(String),
}

/// Compiled file-name patterns (`*.Designer.cs`, `AssemblyInfo`).
#[derive(Debug, Default)]
pub struct FilePatternSet {
    matchers: Vec<FileMatcher>,
}

impl FilePatternSet {
    pub fn compile<S: AsRef<str>>(raw: &[S]) -> Result<Self, PatternError> {
        let mut matchers = Vec::with_capacity(raw.len());
        for text in raw {
            let text = text.as_ref();
            if is_glob_pattern(text) {
                let glob = GlobPattern::new(&text.to_lowercase()).map_err(|source| {
                    PatternError::InvalidGlob {
                        pattern: text.to_string(),
                        source,
                    }
                })?;
                matchers.push(FileMatcher::Glob(glob));
            } else {
                matchers.push(FileMatcher::Substring(text.to_lowercase()));
            }
        }
        Ok(Self { matchers })
    }

    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.matchers.iter().any(|m| match m {
            FileMatcher::Glob(glob) => glob.matches(&lowered),
            FileMatcher::Substring(needle) => lowered.contains(needle.as_str()),
        })
    }
}

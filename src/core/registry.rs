//! Run-scoped literal → key registry.
//!
//! The registry is the single source of truth for deduplication: identical
//! literal text always resolves to the same key, and no two literals ever
//! share a key. It is created once per run, passed by `&mut` into every
//! rewriter call, and read for catalog output once all files are processed.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use super::literal::{Literal, Origin};

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]+").unwrap());

/// Fallback key tail for literals without any ASCII letters or digits.
const EMPTY_TAIL: &str = "TXT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// `<prefix>_<sanitized text>` with `_DUP<n>` disambiguation.
    #[default]
    Sanitized,
    /// `<prefix>_<n>` from a counter shared by every file in the run.
    Numeric,
}

#[derive(Debug, Clone)]
pub struct KeySettings {
    pub prefix: String,
    pub mode: KeyMode,
    pub max_tail_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub literal: Literal,
}

#[derive(Debug)]
pub struct KeyRegistry {
    settings: KeySettings,
    /// Insertion order, which is also catalog order.
    entries: Vec<KeyEntry>,
    by_key: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
    /// base key -> highest `_DUP` suffix handed out (sanitized mode only).
    dup_counts: HashMap<String, usize>,
    next_tag: usize,
    seeded: usize,
}

impl KeyRegistry {
    pub fn new(settings: KeySettings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
            by_key: HashMap::new(),
            by_text: HashMap::new(),
            dup_counts: HashMap::new(),
            next_tag: 0,
            seeded: 0,
        }
    }

    /// Return the key for `text`, minting a new one on first sight.
    ///
    /// The origin is recorded on first insertion only.
    pub fn lookup_or_create(&mut self, text: &str, origin: Origin) -> String {
        if let Some(&idx) = self.by_text.get(text) {
            return self.entries[idx].key.clone();
        }

        let key = match self.settings.mode {
            KeyMode::Numeric => self.mint_numeric(),
            KeyMode::Sanitized => self.mint_sanitized(text),
        };
        self.insert(key.clone(), Literal::new(text, origin));
        key
    }

    /// Key already bound to `text`, if any.
    pub fn get(&self, text: &str) -> Option<&str> {
        self.by_text
            .get(text)
            .map(|&idx| self.entries[idx].key.as_str())
    }

    /// Pre-load an entry from an existing catalog.
    ///
    /// Returns false (and changes nothing) when either the key or the text is
    /// already bound, which keeps the mapping injective.
    pub fn seed(&mut self, key: &str, text: &str, origin: Origin) -> bool {
        if self.by_key.contains_key(key) || self.by_text.contains_key(text) {
            return false;
        }
        if let Some(tag) = self.numeric_tag(key) {
            self.next_tag = self.next_tag.max(tag);
        }
        self.insert(key.to_string(), Literal::new(text, origin));
        self.seeded += 1;
        true
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys minted during this run (seeded entries excluded).
    pub fn created_count(&self) -> usize {
        self.entries.len() - self.seeded
    }

    fn insert(&mut self, key: String, literal: Literal) {
        let idx = self.entries.len();
        self.by_key.insert(key.clone(), idx);
        self.by_text.insert(literal.text.clone(), idx);
        self.entries.push(KeyEntry { key, literal });
    }

    fn mint_numeric(&mut self) -> String {
        loop {
            self.next_tag += 1;
            let key = format!("{}_{}", self.settings.prefix, self.next_tag);
            if !self.by_key.contains_key(&key) {
                return key;
            }
        }
    }

    fn mint_sanitized(&mut self, text: &str) -> String {
        let tail = sanitize_tail(text, self.settings.max_tail_len);
        let base = format!("{}_{}", self.settings.prefix, tail);

        let mut candidate = base.clone();
        // `text` is unbound here, so any existing entry for the candidate
        // belongs to a different literal.
        while self.by_key.contains_key(&candidate) {
            let n = self.dup_counts.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{}_DUP{}", base, n);
        }
        candidate
    }

    fn numeric_tag(&self, key: &str) -> Option<usize> {
        key.strip_prefix(self.settings.prefix.as_str())?
            .strip_prefix('_')?
            .parse()
            .ok()
    }
}

/// Identifier tail for a literal: non-alphanumeric runs become `_`, edges are
/// trimmed, and the result is capped at `max_len` characters.
pub fn sanitize_tail(text: &str, max_len: usize) -> String {
    let replaced = NON_ALPHANUMERIC_RUN.replace_all(text, "_");
    let trimmed = replaced.trim_matches('_');
    // Only ASCII survives the replacement, so byte slicing is safe.
    let capped = &trimmed[..trimmed.len().min(max_len)];
    let capped = capped.trim_end_matches('_');
    if capped.is_empty() {
        EMPTY_TAIL.to_string()
    } else {
        capped.to_string()
    }
}

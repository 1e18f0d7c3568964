//! Substitution of discovered identifiers with generated names

use crate::error::{Error, Result};
use crate::namegen::{HexSource, NameGenerator};
use crate::scanner::{is_identifier_char, IdentifierSet, DEFAULT_SIGIL};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How identifier occurrences are located during substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Plain substring replacement, one identifier at a time over the whole
    /// working text. `$a` also hits the front of `$ab`.
    #[default]
    Literal,
    /// Single pass over the original text that only matches whole
    /// identifiers. Inserted names are never re-scanned.
    Token,
}

/// Original identifier text -> replacement identifier text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMapping {
    entries: BTreeMap<String, String>,
}

impl RenameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(original.into(), replacement.into());
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every replacement name in `text` with its original
    ///
    /// Longer replacements go first so none is clipped by a shorter one.
    pub fn restore(&self, text: &str) -> String {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let mut result = text.to_string();
        for (original, replacement) in pairs {
            result = result.replace(replacement, original);
        }
        result
    }
}

/// Result of rewriting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub mapping: RenameMapping,
}

/// Applies a rename mapping to a document
#[derive(Debug, Clone)]
pub struct Rewriter {
    sigil: char,
    mode: ReplaceMode,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(DEFAULT_SIGIL, ReplaceMode::default())
    }
}

impl Rewriter {
    pub fn new(sigil: char, mode: ReplaceMode) -> Self {
        Self { sigil, mode }
    }

    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    /// Assign a generated name to every identifier and substitute them
    pub fn rewrite<S: HexSource>(
        &self,
        text: &str,
        identifiers: &IdentifierSet,
        generator: &mut NameGenerator<S>,
    ) -> Result<Rewrite> {
        let mut mapping = RenameMapping::new();
        for identifier in identifiers {
            let name = generator.generate()?;
            mapping.insert(identifier.as_str(), format!("{}{}", self.sigil, name));
        }

        let text = match self.mode {
            ReplaceMode::Literal => {
                warn_on_overlaps(&mapping);
                replace_literal(text, &mapping)
            }
            ReplaceMode::Token => replace_tokens(text, &mapping)?,
        };

        log::info!(
            "Renamed {} identifier(s) using {:?} replacement",
            mapping.len(),
            self.mode
        );
        Ok(Rewrite { text, mapping })
    }
}

/// Substring replacement in mapping order, each pass over the full text
fn replace_literal(text: &str, mapping: &RenameMapping) -> String {
    let mut result = text.to_string();
    for (original, replacement) in mapping.iter() {
        result = result.replace(original, replacement);
    }
    result
}

/// One regex pass matching whole identifiers only
fn replace_tokens(text: &str, mapping: &RenameMapping) -> Result<String> {
    if mapping.is_empty() {
        return Ok(text.to_string());
    }

    let mut originals: Vec<&str> = mapping.iter().map(|(original, _)| original).collect();
    // Alternation is leftmost-first, so longer names must come first
    originals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = originals
        .iter()
        .map(|original| regex::escape(original))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&alternation).map_err(|e| Error::invalid_option(e.to_string()))?;

    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;
    while let Some(m) = pattern.find_at(text, search_from) {
        let ends_inside_identifier = text[m.end()..]
            .chars()
            .next()
            .is_some_and(is_identifier_char);
        if ends_inside_identifier {
            // A longer, unmapped identifier starts here; no shorter
            // alternative can end on a boundary either.
            search_from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }

        result.push_str(&text[copied..m.start()]);
        result.push_str(mapping.get(m.as_str()).unwrap_or(m.as_str()));
        copied = m.end();
        search_from = m.end();
    }
    result.push_str(&text[copied..]);
    Ok(result)
}

/// Warn about identifiers that are a prefix of another identifier or occur
/// inside another's replacement; literal mode rewrites those incorrectly
fn warn_on_overlaps(mapping: &RenameMapping) {
    for (short, _) in mapping.iter() {
        for (long, replacement) in mapping.iter() {
            if short == long {
                continue;
            }
            let prefixes_long = long
                .strip_prefix(short)
                .and_then(|rest| rest.chars().next())
                .is_some_and(is_identifier_char);
            if prefixes_long || replacement.contains(short) {
                log::warn!(
                    "Identifier {} overlaps {}; literal replacement may corrupt it",
                    short,
                    long
                );
            }
        }
    }
}

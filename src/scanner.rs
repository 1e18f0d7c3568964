//! Discovery of assigned variable identifiers
//!
//! Only identifiers written in assignment position (`$name = ...`) are
//! collected. Read-only references are left to the rewriter, which replaces
//! every occurrence of a discovered name.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Sigil used by PowerShell variables
pub const DEFAULT_SIGIL: char = '$';

static DEFAULT_SCANNER: Lazy<Scanner> = Lazy::new(Scanner::default);

/// Distinct identifier texts (sigil included) found in one document
pub type IdentifierSet = BTreeSet<String>;

/// Returns true for characters that may follow the sigil in an identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lexical scanner for `<sigil><name>` tokens followed by an assignment
#[derive(Debug, Clone)]
pub struct Scanner {
    sigil: char,
    pattern: Regex,
}

impl Scanner {
    /// Build a scanner for the given sigil character
    pub fn new(sigil: char) -> Result<Self> {
        if is_identifier_char(sigil) || sigil.is_whitespace() || sigil == '=' {
            return Err(Error::invalid_option(format!(
                "sigil {:?} cannot mark a variable",
                sigil
            )));
        }

        // The regex crate has no lookahead, so the `\s*=` tail is consumed
        // and only group 1 is kept. Nothing an identifier starts with can
        // be swallowed by the tail, so no match is lost.
        let source = format!(
            r"({}[a-zA-Z0-9_]+)\s*=",
            regex::escape(&sigil.to_string())
        );
        let pattern = Regex::new(&source).map_err(|e| Error::invalid_option(e.to_string()))?;

        Ok(Self { sigil, pattern })
    }

    pub fn sigil(&self) -> char {
        self.sigil
    }

    /// Collect every distinct identifier that appears in assignment position
    pub fn scan(&self, text: &str) -> IdentifierSet {
        let identifiers: IdentifierSet = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        log::debug!(
            "Scanner found {} distinct identifier(s) for sigil {:?}",
            identifiers.len(),
            self.sigil
        );
        identifiers
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(DEFAULT_SIGIL).expect("default sigil is valid")
    }
}

/// Scan `text` with the default `$` scanner
pub fn scan_identifiers(text: &str) -> IdentifierSet {
    DEFAULT_SCANNER.scan(text)
}

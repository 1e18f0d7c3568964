//! Main randomizer module
//!
//! Runs scan, name generation and rewrite for one document.

use crate::error::{Error, Result};
use crate::namegen::{
    HexSource, NameGenerator, UuidHexSource, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_LENGTH,
};
use crate::rewriter::{ReplaceMode, Rewrite, Rewriter};
use crate::scanner::{Scanner, DEFAULT_SIGIL};
use serde::{Deserialize, Serialize};

/// Prefix used when the caller does not choose one
pub const DEFAULT_PREFIX: &str = "windowswindowswindowswindowswindows4444";

/// Options controlling one randomization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizeOptions {
    /// Prefix shared by every generated name
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Exact length of every generated name (sigil excluded)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Variable marker character
    #[serde(default = "default_sigil")]
    pub sigil: char,

    /// How occurrences are substituted
    #[serde(default)]
    pub mode: ReplaceMode,

    /// Candidates tried per name before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_sigil() -> char {
    DEFAULT_SIGIL
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for RandomizeOptions {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            min_length: default_min_length(),
            sigil: default_sigil(),
            mode: ReplaceMode::default(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl RandomizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the generated name length
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the variable sigil
    pub fn sigil(mut self, sigil: char) -> Self {
        self.sigil = sigil;
        self
    }

    /// Set the replacement mode
    pub fn mode(mut self, mode: ReplaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the per-name retry bound
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Reject option combinations that cannot produce a valid run
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(Error::invalid_option("min_length must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(Error::invalid_option("max_attempts must be at least 1"));
        }
        if self.prefix.chars().count() > self.min_length {
            log::warn!(
                "Prefix is longer than {} characters and will be truncated",
                self.min_length
            );
        }
        Ok(())
    }
}

/// Variable name randomizer
pub struct Randomizer<S: HexSource = UuidHexSource> {
    options: RandomizeOptions,
    scanner: Scanner,
    source: S,
}

impl Randomizer<UuidHexSource> {
    /// Create a randomizer drawing names from random UUIDs
    pub fn new(options: RandomizeOptions) -> Result<Self> {
        Self::with_source(options, UuidHexSource)
    }
}

impl<S: HexSource> Randomizer<S> {
    /// Create a randomizer with an explicit hex source
    pub fn with_source(options: RandomizeOptions, source: S) -> Result<Self> {
        options.validate()?;
        let scanner = Scanner::new(options.sigil)?;
        Ok(Self {
            options,
            scanner,
            source,
        })
    }

    pub fn options(&self) -> &RandomizeOptions {
        &self.options
    }

    /// Rename every assigned variable in `text`
    ///
    /// Each call is an independent run with its own used-names set.
    pub fn randomize(&mut self, text: &str) -> Result<Rewrite> {
        let identifiers = self.scanner.scan(text);

        let mut generator = NameGenerator::new(
            self.options.prefix.as_str(),
            self.options.min_length,
            &mut self.source,
        )
        .with_max_attempts(self.options.max_attempts);

        Rewriter::new(self.options.sigil, self.options.mode).rewrite(
            text,
            &identifiers,
            &mut generator,
        )
    }
}

/// Randomize `text` with fresh UUID material
pub fn randomize(text: &str, options: &RandomizeOptions) -> Result<Rewrite> {
    Randomizer::new(options.clone())?.randomize(text)
}

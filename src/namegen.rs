//! Fixed-length random name generation
//!
//! Names are built from a prefix followed by hexadecimal blocks taken from a
//! [`HexSource`], then cut to exactly `min_length` characters. The generator
//! owns the set of names already handed out in this run and never returns a
//! duplicate.

use crate::error::{Error, Result};
use std::collections::HashSet;
use uuid::Uuid;

/// Total length of a generated name in the reference behavior
pub const DEFAULT_MIN_LENGTH: usize = 40;

/// Upper bound on fresh candidates tried for a single name
pub const DEFAULT_MAX_ATTEMPTS: usize = 1024;

/// Source of random hexadecimal blocks
pub trait HexSource {
    /// Return the next block of hex characters
    fn next_block(&mut self) -> String;
}

impl<T: HexSource + ?Sized> HexSource for &mut T {
    fn next_block(&mut self) -> String {
        (**self).next_block()
    }
}

/// Hex source backed by a closure, mainly for deterministic tests
pub struct FnHexSource<F>(F);

/// Wrap a closure producing hex blocks
pub fn from_fn<F>(f: F) -> FnHexSource<F>
where
    F: FnMut() -> String,
{
    FnHexSource(f)
}

impl<F> HexSource for FnHexSource<F>
where
    F: FnMut() -> String,
{
    fn next_block(&mut self) -> String {
        (self.0)()
    }
}

/// Hex blocks drawn from random (v4) UUIDs: 32 characters, 128 bits
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidHexSource;

impl HexSource for UuidHexSource {
    fn next_block(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Generates run-unique names sharing one prefix
pub struct NameGenerator<S: HexSource> {
    prefix: String,
    prefix_len: usize,
    min_length: usize,
    max_attempts: usize,
    source: S,
    used: HashSet<String>,
}

impl<S: HexSource> NameGenerator<S> {
    pub fn new(prefix: impl Into<String>, min_length: usize, source: S) -> Self {
        let prefix = prefix.into();
        let prefix_len = prefix.chars().count();
        Self {
            prefix,
            prefix_len,
            min_length,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            source,
            used: HashSet::new(),
        }
    }

    /// Limit how many candidates are tried before giving up
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Names handed out so far in this run
    pub fn used_names(&self) -> &HashSet<String> {
        &self.used
    }

    /// Number of distinct names this generator can ever produce, or `None`
    /// when it does not fit in a `u64`
    pub fn capacity(&self) -> Option<u64> {
        let random_chars = self.min_length.saturating_sub(self.prefix_len);
        let exponent = u32::try_from(random_chars).ok()?;
        16u64.checked_pow(exponent)
    }

    /// Produce a name not used before in this run and reserve it
    pub fn generate(&mut self) -> Result<String> {
        if let Some(capacity) = self.capacity() {
            if self.used.len() as u64 >= capacity {
                log::warn!(
                    "All {} name(s) for prefix {:?} are taken",
                    capacity,
                    self.prefix
                );
                return Err(self.exhausted(0));
            }
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate();
            if self.used.insert(candidate.clone()) {
                if attempt > 1 {
                    log::debug!("Generated unique name after {} attempts", attempt);
                }
                return Ok(candidate);
            }
            log::debug!("Name collision on attempt {}, retrying", attempt);
        }

        Err(self.exhausted(self.max_attempts))
    }

    /// One candidate name: prefix extended with hex blocks, then truncated
    fn candidate(&mut self) -> String {
        let mut name = self.prefix.clone();
        let mut len = self.prefix_len;
        while len < self.min_length {
            let block = self.source.next_block();
            let block_len = block.chars().count();
            if block_len == 0 {
                // An empty block would never reach the target length
                break;
            }
            name.push_str(&block);
            len += block_len;
        }
        truncate_chars(&mut name, self.min_length);
        name
    }

    fn exhausted(&self, attempts: usize) -> Error {
        Error::NameSpaceExhausted {
            prefix: self.prefix.clone(),
            attempts,
        }
    }
}

impl NameGenerator<UuidHexSource> {
    /// Generator backed by random UUIDs
    pub fn with_uuid_source(prefix: impl Into<String>, min_length: usize) -> Self {
        Self::new(prefix, min_length, UuidHexSource)
    }
}

/// Cut `s` to at most `max` characters
fn truncate_chars(s: &mut String, max: usize) {
    if let Some((index, _)) = s.char_indices().nth(max) {
        s.truncate(index);
    }
}

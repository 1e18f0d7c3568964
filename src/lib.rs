//! var-randomizer: variable name randomization for PowerShell-style scripts
//!
//! This library finds variables assigned in a script, gives each one a long
//! random name sharing a common prefix, and substitutes every occurrence.

pub mod cli;
pub mod error;
pub mod namegen;
pub mod randomizer;
pub mod rewriter;
pub mod scanner;

pub use error::{Error as RandomizerError, Result as RandomizerResult};
pub use randomizer::{randomize, RandomizeOptions, Randomizer, DEFAULT_PREFIX};

// Re-export commonly used types
pub use namegen::{from_fn, HexSource, NameGenerator, UuidHexSource};
pub use rewriter::{RenameMapping, ReplaceMode, Rewrite, Rewriter};
pub use scanner::{scan_identifiers, IdentifierSet, Scanner};

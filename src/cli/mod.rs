//! Command-line interface module
//!
//! This module contains the implementation behind the `var-randomizer` binary.

pub mod randomize;

/// Common CLI utilities
pub mod utils {
    use crate::error::{Error as RandomizerError, Result as RandomizerResult};
    use std::io::ErrorKind;
    use std::path::Path;

    /// Read a script into a string
    pub fn read_script(path: &Path) -> RandomizerResult<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => {
                RandomizerError::Io(format!("{} is not valid UTF-8 text", path.display()))
            }
            _ => RandomizerError::FileNotFound {
                path: path.display().to_string(),
            },
        })
    }

    /// Write output to file, creating or overwriting it
    pub fn write_file(path: &Path, content: &str) -> RandomizerResult<()> {
        std::fs::write(path, content).map_err(|e| {
            RandomizerError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

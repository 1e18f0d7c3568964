use crate::cli::utils::{read_script, write_file};
use crate::error::{Error as RandomizerError, Result as RandomizerResult};
use crate::randomizer::{RandomizeOptions, Randomizer};
use crate::rewriter::{ReplaceMode, Rewrite};
use std::path::PathBuf;

/// Arguments for a randomize run
#[derive(Debug, Clone)]
pub struct RandomizeArgs {
    pub script_path: PathBuf,
    pub prefix: String,
    pub output_path: Option<PathBuf>,
    pub min_length: usize,
    pub sigil: char,
    pub token_aware: bool,
    pub mapping_path: Option<PathBuf>,
}

impl RandomizeArgs {
    /// Convert to RandomizeOptions
    pub fn to_options(&self) -> RandomizeOptions {
        let mode = if self.token_aware {
            ReplaceMode::Token
        } else {
            ReplaceMode::Literal
        };

        RandomizeOptions::new()
            .prefix(self.prefix.as_str())
            .min_length(self.min_length)
            .sigil(self.sigil)
            .mode(mode)
    }
}

/// Read the script, rename its variables and emit the result
pub fn randomize(args: &RandomizeArgs) -> RandomizerResult<()> {
    let rewrite = randomize_file(args)?;

    if let Some(path) = &args.mapping_path {
        let json = serde_json::to_string_pretty(&rewrite.mapping)
            .map_err(|e| RandomizerError::Io(format!("Failed to encode mapping: {}", e)))?;
        write_file(path, &json)?;
        log::info!("Rename mapping written to {}", path.display());
    }

    match &args.output_path {
        Some(path) => {
            write_file(path, &rewrite.text)?;
            println!("Modified script written to {}", path.display());
        }
        None => {
            println!("{}", rewrite.text);
        }
    }

    Ok(())
}

/// Run the pipeline on the input file without emitting anything
pub fn randomize_file(args: &RandomizeArgs) -> RandomizerResult<Rewrite> {
    let source = read_script(&args.script_path)?;
    log::debug!(
        "Read {} bytes from {}",
        source.len(),
        args.script_path.display()
    );

    let mut randomizer = Randomizer::new(args.to_options())?;
    randomizer.randomize(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namegen::DEFAULT_MIN_LENGTH;
    use crate::randomizer::DEFAULT_PREFIX;
    use std::fs;

    fn args_for(script_path: PathBuf) -> RandomizeArgs {
        RandomizeArgs {
            script_path,
            prefix: DEFAULT_PREFIX.to_string(),
            output_path: None,
            min_length: DEFAULT_MIN_LENGTH,
            sigil: '$',
            token_aware: false,
            mapping_path: None,
        }
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ps1");

        let err = randomize(&args_for(missing.clone())).unwrap_err();
        assert_eq!(
            err,
            RandomizerError::FileNotFound {
                path: missing.display().to_string()
            }
        );
        assert!(err.to_string().starts_with("File not found: "));
    }

    #[test]
    fn test_writes_output_and_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ps1");
        let output = dir.path().join("out.ps1");
        let mapping = dir.path().join("map.json");
        fs::write(&input, "$user = 'x'\nWrite-Host $user").unwrap();

        let mut args = args_for(input);
        args.output_path = Some(output.clone());
        args.mapping_path = Some(mapping.clone());
        randomize(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("$user"));

        let map: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&mapping).unwrap()).unwrap();
        let replacement = &map["$user"];
        assert_eq!(written, format!("{0} = 'x'\nWrite-Host {0}", replacement));
    }

    #[test]
    fn test_default_prefix_leaves_one_random_char() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ps1");
        fs::write(&input, "$a = 1").unwrap();

        let rewrite = randomize_file(&args_for(input)).unwrap();
        let replacement = rewrite.mapping.get("$a").unwrap();
        assert_eq!(replacement.len(), 41);
        assert!(replacement.starts_with(&format!("${}", DEFAULT_PREFIX)));
    }
}

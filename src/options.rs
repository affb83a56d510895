//! Command-line options
//!
//! ```text
//! cminus [--scan | --view] <file>
//! ```
//!
//! A file name without an extension gets `.c` appended.

use std::fmt;
use std::path::PathBuf;

/// Extension assumed when the file name has none
pub const DEFAULT_EXTENSION: &str = "c";

/// What a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Print the syntax tree listing
    #[default]
    Parse,
    /// Print one listing row per token, without parsing
    Scan,
    /// Browse the source and syntax tree in the terminal UI
    View,
}

/// Error for a malformed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub message: String,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UsageError {}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub path: PathBuf,
}

impl Options {
    /// Parse the arguments after the program name
    pub fn from_args<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut mode = Mode::default();
        let mut path = None;

        for arg in args {
            match arg.as_str() {
                "--scan" => mode = Mode::Scan,
                "--view" => mode = Mode::View,
                flag if flag.starts_with("--") => {
                    return Err(UsageError {
                        message: format!("Unknown option '{}'", flag),
                    });
                }
                _ if path.is_some() => {
                    return Err(UsageError {
                        message: format!("Unexpected extra argument '{}'", arg),
                    });
                }
                _ => path = Some(PathBuf::from(arg)),
            }
        }

        let mut path = path.ok_or_else(|| UsageError {
            message: "No input file provided".to_string(),
        })?;
        if path.extension().is_none() {
            path.set_extension(DEFAULT_EXTENSION);
        }

        Ok(Options { mode, path })
    }

    /// Name used in the listing header
    pub fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

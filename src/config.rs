//! Run configuration, built from command-line arguments.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "usage: dfunc [--entry NAME] [--no-prelude] [--structural-equality] FILE...";

/// How `==` compares list elements that are themselves lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListEquality {
    /// Nested lists must compare equal and also be the same allocation.
    #[default]
    IdentityChecked,
    /// Nested lists compare element by element only.
    Structural,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub entry: String,
    pub prelude: bool,
    pub list_equality: ListEquality,
    pub files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            entry: String::from("main"),
            prelude: true,
            list_equality: ListEquality::default(),
            files: vec![],
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("flag {flag} expects a value")]
    MissingValue { flag: String },
    #[error("unknown flag {flag}")]
    UnknownFlag { flag: String },
    #[error("no input files given")]
    NoInputFiles,
    #[error("help requested")]
    HelpRequested,
}

impl Config {
    /// Parses arguments, excluding the program name. Files are read later in the
    /// order given.
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--entry" => {
                    config.entry = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue {
                            flag: String::from("--entry"),
                        })?;
                }
                "--no-prelude" => config.prelude = false,
                "--structural-equality" => config.list_equality = ListEquality::Structural,
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag {
                        flag: flag.to_string(),
                    })
                }
                path => config.files.push(PathBuf::from(path)),
            }
        }

        if config.files.is_empty() {
            return Err(ConfigError::NoInputFiles);
        }

        Ok(config)
    }
}

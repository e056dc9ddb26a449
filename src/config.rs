//! Configuration management for Chunklens Server
//!
//! Server settings come from the environment (optionally via `.env`). The
//! target word list comes from a separate file, read once at startup.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::document::{ChunkingOptions, DocumentError, DEFAULT_BLOCK_SIZE, DEFAULT_PARSE_TIMEOUT_SECS};
use crate::locator::TargetWords;
use crate::mupdf::{WordOptions, DEFAULT_X_TOLERANCE};

/// Key holding the target words in the word list file
pub const WORDS_KEY: &str = "word_to_extract";

/// Default word list file
pub const DEFAULT_WORDS_FILE: &str = "config.yaml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    #[error("Invalid chunking settings: {0}")]
    Chunking(#[from] DocumentError),

    #[error("Failed to read word list: {0}")]
    WordList(#[from] config::ConfigError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub chunking: ChunkingOptions,
    pub extraction: WordOptions,
    /// Seconds a request waits for a parse; 0 waits indefinitely
    pub parse_timeout_secs: u64,
    pub words_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_bytes: 100 * 1024 * 1024,
            },
            chunking: ChunkingOptions::default(),
            extraction: WordOptions::default(),
            parse_timeout_secs: DEFAULT_PARSE_TIMEOUT_SECS,
            words_file: PathBuf::from(DEFAULT_WORDS_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |name: &str| env::var(name).ok();

        let block_size = parse_value("CHUNK_BLOCK_SIZE", var("CHUNK_BLOCK_SIZE"), DEFAULT_BLOCK_SIZE)?;
        let line_break_every = match var("CHUNK_LINE_BREAK_EVERY") {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_value("CHUNK_LINE_BREAK_EVERY", Some(raw), 0usize)?)
            }
            _ => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_value("SERVER_PORT", var("SERVER_PORT"), 8000)?,
                max_upload_bytes: parse_value(
                    "MAX_UPLOAD_BYTES",
                    var("MAX_UPLOAD_BYTES"),
                    100 * 1024 * 1024,
                )?,
            },
            chunking: ChunkingOptions::new(block_size, line_break_every)?,
            extraction: WordOptions {
                x_tolerance: parse_value(
                    "WORD_X_TOLERANCE",
                    var("WORD_X_TOLERANCE"),
                    DEFAULT_X_TOLERANCE,
                )?,
            },
            parse_timeout_secs: parse_value(
                "PARSE_TIMEOUT_SECS",
                var("PARSE_TIMEOUT_SECS"),
                DEFAULT_PARSE_TIMEOUT_SECS,
            )?,
            words_file: var("WORDS_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_FILE)),
        })
    }
}

/// Parse an optional raw setting, falling back to `default` when unset
fn parse_value<T: FromStr>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
    }
}

/// Load the ordered target word list
///
/// The format follows the file extension (YAML, TOML, JSON, ...). A file
/// without the `word_to_extract` key yields an empty list.
pub fn load_target_words(path: impl AsRef<Path>) -> Result<TargetWords, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .build()?;

    let words = match settings.get::<Vec<String>>(WORDS_KEY) {
        Ok(words) => words,
        Err(config::ConfigError::NotFound(_)) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    Ok(TargetWords::new(words))
}

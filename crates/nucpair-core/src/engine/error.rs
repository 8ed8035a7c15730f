use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Structure has {count} nucleotides, above the configured limit of {limit}")]
    TooManyNucleotides { count: usize, limit: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

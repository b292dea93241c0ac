use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Unknown category: {slug}")]
    UnknownCategory { slug: String },

    #[error("Invalid registry source: {message}")]
    InvalidRegistryShape { message: String },

    #[error("Process-wide registry is already initialized")]
    RegistryAlreadyInitialized,

    #[error("Scan root does not exist: {path}")]
    ScanRootNotFound { path: PathBuf },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;

impl TaxonomyError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownCategory { .. } => 2,
            Self::InvalidRegistryShape { .. } | Self::Json(_) => 3,
            Self::ScanRootNotFound { .. } => 4,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidConfigValue { .. } => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = TaxonomyError::UnknownCategory {
            slug: "nope".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Unknown category: nope");

        let err = TaxonomyError::ConfigKeyNotFound {
            key: "registry.nope".to_string(),
        };
        assert_eq!(err.exit_code(), 5);
        assert_eq!(TaxonomyError::RegistryAlreadyInitialized.exit_code(), 1);
    }
}

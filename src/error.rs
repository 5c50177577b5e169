use thiserror::Error;

/// Errors raised while loading or validating world content.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world toml is malformed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{field} may not be empty")]
    Empty { field: &'static str },

    #[error("duplicate {kind} id: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("start_room '{0}' not found among rooms")]
    MissingStartRoom(String),

    #[error("item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    /// Every reference problem found by the validator, one per line.
    #[error("world failed validation:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Errors from the key-value store backing quicksave/quickload.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

/// Errors reading a `GameConfig` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config toml is malformed: {0}")]
    Parse(#[from] toml::de::Error),
}

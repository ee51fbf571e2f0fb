use std::path::PathBuf;

/// Error type returned by fallible reactions.
pub type ReactionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by dispatch. Unbound or unknown input is never an error.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("reaction for action '{name}' failed: {source}")]
    Reaction {
        name: String,
        #[source]
        source: ReactionError,
    },
}

/// The host surface refused exclusive pointer capture.
#[derive(Debug, thiserror::Error)]
#[error("pointer capture refused: {0}")]
pub struct CaptureError(pub String);

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

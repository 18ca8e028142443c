use thiserror::Error;

/// rxwire 統一エラー型
#[derive(Debug, Error)]
pub enum RxwireError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Registry lookup failed for '{name}': {message} (status: {status})")]
    RegistryLookup {
        name: String,
        status: u16,
        message: String,
    },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Root module not found: {0}")]
    ModuleNotFound(String),

    #[error("File {0} does not exist")]
    MissingFile(String),

    #[error("Invalid workspace: {0}")]
    InvalidWorkspace(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Failed to parse {path}: {message}")]
    ModuleParse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RxwireError>;

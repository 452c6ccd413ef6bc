use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdbiError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted config is not a JSON object. Recovered inside `ConfigStore`.
    #[error("Invalid config file: {0}")]
    ConfigParse(String),

    #[error("{0}")]
    ToolProvisioning(String),

    #[error("`adb {command}` failed: {message}")]
    ToolInvocation { command: String, message: String },

    #[error("No device connected")]
    NoDevice,

    #[error("Only one target is allowed (got {0})")]
    AmbiguousTarget(usize),

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AdbiError {
    pub fn invocation(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolInvocation {
            command: command.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdbiError>;

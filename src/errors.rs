#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("{operation} is not supported by this collection strategy")]
    NotSupported { operation: &'static str },

    #[error("No outer object at embedding level {level}")]
    NoOuterObject { level: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl CollectError {
    pub(crate) fn not_supported(operation: &'static str) -> Self {
        CollectError::NotSupported { operation }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("font size must be at least 1px")]
    ZeroFontSize,

    #[error("paragraph separator {0:?} is a control character")]
    InvalidSeparator(char),

    #[error("cannot parse configuration: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CollectError>;

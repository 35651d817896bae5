use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefsiftError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, RefsiftError>;

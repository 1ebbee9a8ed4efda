use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Logger configuration failed: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid redaction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Tracing initialization failed: {0}")]
    SubscriberInit(String),
}

pub type Result<T> = std::result::Result<T, LoggerError>;

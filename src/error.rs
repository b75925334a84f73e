use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to build gradient: {0}")]
    Gradient(String),

    #[error("failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub type CardResult<T = ()> = Result<T, CardError>;

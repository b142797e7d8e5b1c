use thiserror::Error;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Fixture I/O error: {0}")]
    FixtureIo(#[from] std::io::Error),

    #[error("Fixture parse error: {0}")]
    FixtureParse(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    CoreError(#[from] kalends_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

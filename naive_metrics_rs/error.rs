use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("insufficient data; window is empty")]
    InsufficientData,
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LuminaError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("ui error: {0}")]
    Ui(#[from] slint::PlatformError),
}

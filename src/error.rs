//! Error types for the parsing boundary.
//!
//! Store transitions never fail; these errors only describe untyped input
//! (names coming from JavaScript, JSON config) that could not be turned into
//! a typed payload.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    #[error("unknown activity signal: {0}")]
    UnknownActivity(String),

    #[error("unknown maze direction: {0}")]
    UnknownDirection(String),

    #[error("invalid config: {0}")]
    Config(String),
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Word appears in more than one category")]
    DuplicateWord,
    #[error("Two categories share a color")]
    DuplicateColor,
}

pub type Result<T> = core::result::Result<T, GameError>;

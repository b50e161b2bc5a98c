use thiserror::Error;

/// Reasons an action history is rejected by [`crate::decoder::decode`].
///
/// Offsets are byte positions into the history string. The first error found
/// while scanning left to right is the one reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unexpected character {ch:?} at {at}")]
    UnexpectedCharacter { ch: char, at: usize },
    #[error("Missing bet size at {at}")]
    MissingBetSize { at: usize },
    #[error("Bet size not an integer at {at}")]
    BetSizeNotInteger { at: usize },
    #[error("Bet too small: raise of {size}, minimum: {minimum}")]
    BetTooSmall { size: i64, minimum: u32 },
    #[error("Bet too big: raise of {size}, maximum: {maximum}")]
    BetTooBig { size: i64, maximum: u32 },
    #[error("Missing slash at {at}")]
    MissingSlash { at: usize },
    #[error("Missing slash (end of string)")]
    MissingSlashAtEnd,
    #[error("Extra characters at end of action at {at}")]
    ExtraCharacters { at: usize },
    #[error("Illegal check: facing a bet of {outstanding}")]
    IllegalCheck { outstanding: u32 },
    #[error("Illegal call: nothing to call")]
    IllegalCall,
    #[error("Illegal fold: nothing to call")]
    IllegalFold,
    #[error("Empty action token")]
    EmptyToken,
    #[error("Street {street} exceeds the configured {streets} streets")]
    StreetOverflow { street: u8, streets: u8 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid blinds: small blind {small}, big blind {big}")]
    InvalidBlinds { small: u32, big: u32 },
    #[error("Stack size {stack} must exceed the big blind {big}")]
    StackTooShort { stack: u32, big: u32 },
    #[error("Stack size {stack} exceeds the maximum of {max}")]
    StackTooDeep { stack: u32, max: u32 },
    #[error("Invalid number of streets: {0}")]
    InvalidStreets(u8),
    #[error("Invalid position index: {0}")]
    InvalidPosition(i64),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}

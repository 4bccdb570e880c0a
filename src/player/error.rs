use thiserror::Error;

/// Reasons a player operation refuses its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("episode index {index} is out of range for a queue of {len} episodes")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundIdError {
    #[error("Round id is empty")]
    Empty,
    #[error("Round id contains control characters")]
    ControlCharacter,
}

/// Round ids are opaque tokens. Only ids that cannot be printed or logged
/// safely are rejected; anything else goes to the store, which simply finds
/// no options for ids it does not know.
pub fn validate_round_id(raw: &str) -> Result<(), RoundIdError> {
    if raw.is_empty() { return Err(RoundIdError::Empty); }
    if raw.chars().any(char::is_control) {
        return Err(RoundIdError::ControlCharacter);
    }
    Ok(())
}

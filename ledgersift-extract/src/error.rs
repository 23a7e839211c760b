use thiserror::Error;

/// Failures while turning one document into a transaction table.
///
/// Every variant is fatal to a single document only; callers report it and
/// move on to the next document in the batch. A document that opens fine but
/// yields zero records is not an error.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("document is encrypted and the password was missing or wrong")]
    WrongCredential,

    #[error("document structure unreadable: {0}")]
    Corrupt(String),

    #[error("malformed date {value:?} in matched record")]
    BadDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("malformed amount {value:?} in matched record")]
    BadAmount { value: String },
}

impl ExtractError {
    /// True when retrying with a different password could help.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, ExtractError::WrongCredential)
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

use thiserror::Error;

use crate::storage::StoreError;

/// Failure classes of the word-resolution coordinator. Upstream detail is
/// classified here, not carried through; the transport maps each class to
/// a status code.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("dictionary credentials are not configured")]
    Configuration,

    #[error("word text must not be empty")]
    EmptyText,

    #[error("word '{0}' was not found in the dictionary")]
    WordNotFound(String),

    #[error("failed to fetch the word from the dictionary service")]
    Upstream,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl VocabError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Configuration => 500,
            Self::EmptyText => 400,
            Self::WordNotFound(_) => 404,
            Self::Upstream => 502,
            Self::Storage(_) => 500,
        }
    }
}

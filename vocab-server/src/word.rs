use chrono::{DateTime, Utc};
use dictionary::DictionaryEntry;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Definition text stored when the dictionary entry carries none.
pub const NO_DEFINITION: &str = "No definition found";

const DEFAULT_LEXICAL_CATEGORY: &str = "noun";

/// A resolved vocabulary word. Created once on the cache-miss write path
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    /// Canonical spelling as the dictionary returned it. Lookup compares
    /// its normalized form, display keeps the original casing.
    pub text: String,
    pub lexical_category: String,
    pub definition: String,
    pub example: String,
    pub audio_url: String,
    pub pronunciation: String,
    pub created_at: DateTime<Utc>,
}

impl Word {
    /// Build a word from a dictionary entry, assigning a fresh id and
    /// filling in defaults for everything the entry left unset.
    pub fn from_entry(entry: DictionaryEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: entry.word,
            lexical_category: entry
                .lexical_category
                .unwrap_or_else(|| DEFAULT_LEXICAL_CATEGORY.to_owned()),
            definition: entry.definition.unwrap_or_else(|| NO_DEFINITION.to_owned()),
            example: entry.example.unwrap_or_default(),
            audio_url: entry.audio_file.unwrap_or_default(),
            pronunciation: entry.phonetic_spelling.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    /// Normalized form of the stored spelling, the store uniqueness key.
    pub fn key(&self) -> String {
        normalize(&self.text)
    }
}

/// Trim surrounding whitespace and lower-case, producing the cache key.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

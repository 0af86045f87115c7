use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, query, query_as, Pool, Sqlite, SqlitePool};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::word::Word;

#[derive(Debug, Error)]
#[error("storage failure: {0}")]
pub struct StoreError(#[from] sqlx::Error);

/// Storage port for the word collection. Implementations keep at most one
/// word per normalized key and never mutate stored words.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Find the word whose stored spelling matches `key` case-insensitively.
    async fn find_by_key(&self, key: &str) -> Result<Option<Word>, StoreError>;

    /// Insert a new word. Existing entries are never overwritten.
    async fn append(&self, word: Word) -> Result<(), StoreError>;

    /// All stored words, newest first.
    async fn list(&self) -> Result<Vec<Word>, StoreError>;
}

/// Process-lifetime store backed by a plain vector: initialized empty at
/// startup, discarded at exit. Used by the tests and for ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    words: RwLock<Vec<Word>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<Word>, StoreError> {
        let words = self.words.read().await;
        Ok(words.iter().find(|word| word.key() == key).cloned())
    }

    async fn append(&self, word: Word) -> Result<(), StoreError> {
        self.words.write().await.push(word);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Word>, StoreError> {
        let words = self.words.read().await;
        Ok(words.iter().rev().cloned().collect())
    }
}

/// Durable store on SQLite. Insertion order is the rowid order, so the
/// newest-first listing reads in reverse rowid.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open the database at `url`, creating it if needed, and bring the
    /// schema up to date.
    pub async fn initialize(url: &str) -> Result<Self, StoreError> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePool::connect(url).await?;
        sqlx::migrate!().run(&pool).await.map_err(sqlx::Error::from)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl WordStore for SqliteStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<Word>, StoreError> {
        let word = query_as::<_, Word>("SELECT * FROM words WHERE LOWER(text) = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(word)
    }

    async fn append(&self, word: Word) -> Result<(), StoreError> {
        query(
            "INSERT INTO words(id, text, lexical_category, definition, example, audio_url, pronunciation, created_at)
             VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&word.id)
        .bind(&word.text)
        .bind(&word.lexical_category)
        .bind(&word.definition)
        .bind(&word.example)
        .bind(&word.audio_url)
        .bind(&word.pronunciation)
        .bind(word.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Word>, StoreError> {
        let words = query_as::<_, Word>("SELECT * FROM words ORDER BY rowid DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(words)
    }
}

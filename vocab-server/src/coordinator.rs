use std::sync::Arc;

use async_trait::async_trait;
use dictionary::{Dictionary, DictionaryEntry, DictionaryError};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::VocabError;
use crate::storage::WordStore;
use crate::word::{normalize, Word};

/// Upstream lookup port. Production wires in the Oxford client; the tests
/// substitute a scripted stub.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, DictionaryError>;
}

#[async_trait]
impl LookupProvider for Dictionary {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, DictionaryError> {
        self.get_definition(word).await
    }
}

/// Decides whether a word is served from the store or fetched upstream.
///
/// The store is the single source of truth for resolved words; the
/// coordinator owns all writes to it. `provider` is `None` when the
/// dictionary credentials were not configured, which turns every cache
/// miss into a configuration error without touching the network.
pub struct Coordinator {
    store: Arc<dyn WordStore>,
    provider: Option<Arc<dyn LookupProvider>>,
    insert_lock: Mutex<()>,
}

impl Coordinator {
    pub fn new(store: Arc<dyn WordStore>, provider: Option<Arc<dyn LookupProvider>>) -> Self {
        Self {
            store,
            provider,
            insert_lock: Mutex::new(()),
        }
    }

    /// All stored words, newest first.
    pub async fn list_words(&self) -> Result<Vec<Word>, VocabError> {
        Ok(self.store.list().await?)
    }

    /// Stored words whose spelling contains `query` case-insensitively,
    /// newest first. The empty query matches everything.
    pub async fn search_words(&self, query: &str) -> Result<Vec<Word>, VocabError> {
        let needle = query.to_lowercase();
        let words = self.store.list().await?;
        Ok(words
            .into_iter()
            .filter(|word| word.text.to_lowercase().contains(&needle))
            .collect())
    }

    /// Resolve `raw` to a stored word, fetching it from the dictionary on
    /// a cache miss. Idempotent per normalized spelling: repeated calls
    /// return the already-stored word without another lookup.
    pub async fn add_word(&self, raw: &str) -> Result<Word, VocabError> {
        let clean = normalize(raw);
        if clean.is_empty() {
            return Err(VocabError::EmptyText);
        }
        if let Some(existing) = self.store.find_by_key(&clean).await? {
            return Ok(existing);
        }
        let provider = self.provider.as_ref().ok_or(VocabError::Configuration)?;

        // Serialize the miss path so concurrent callers cannot fetch and
        // store the same word twice. Re-check after taking the lock: the
        // word may have landed while we waited.
        let _guard = self.insert_lock.lock().await;
        if let Some(existing) = self.store.find_by_key(&clean).await? {
            return Ok(existing);
        }

        let entry = provider.lookup(&clean).await.map_err(|error| match error {
            DictionaryError::NotFound => VocabError::WordNotFound(clean.clone()),
            other => {
                warn!(word = %clean, error = %other, "dictionary lookup failed");
                VocabError::Upstream
            }
        })?;

        let word = Word::from_entry(entry);
        self.store.append(word.clone()).await?;
        info!(word = %word.text, "stored new word");
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::storage::MemoryStore;

    use super::*;

    enum Script {
        /// Answer with an entry for the requested spelling.
        Echo,
        /// Answer with this exact entry.
        Entry(DictionaryEntry),
        NotFound,
        Failure,
    }

    struct StubProvider {
        script: Script,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LookupProvider for StubProvider {
        async fn lookup(&self, word: &str) -> Result<DictionaryEntry, DictionaryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Echo => Ok(entry(word)),
                Script::Entry(entry) => Ok(entry.clone()),
                Script::NotFound => Err(DictionaryError::NotFound),
                Script::Failure => Err(DictionaryError::Status(500)),
            }
        }
    }

    fn entry(word: &str) -> DictionaryEntry {
        DictionaryEntry {
            word: word.to_owned(),
            lexical_category: Some("Noun".to_owned()),
            definition: Some(format!("definition of {word}")),
            example: None,
            audio_file: None,
            phonetic_spelling: None,
        }
    }

    fn coordinator(provider: Arc<StubProvider>) -> Coordinator {
        Coordinator::new(
            Arc::new(MemoryStore::new()),
            Some(provider as Arc<dyn LookupProvider>),
        )
    }

    #[tokio::test]
    async fn add_word_is_idempotent_across_casing_and_whitespace() {
        let provider = StubProvider::new(Script::Entry(entry("ace")));
        let coordinator = coordinator(provider.clone());

        let first = coordinator.add_word("Ace").await.unwrap();
        let second = coordinator.add_word("ace").await.unwrap();
        let third = coordinator.add_word("  ACE  ").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.id, third.id);
        assert_eq!(first.key(), "ace");
        assert_eq!(provider.calls(), 1);
        assert_eq!(coordinator.list_words().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_words_returns_newest_first() {
        let coordinator = coordinator(StubProvider::new(Script::Echo));
        for word in ["alpha", "beta", "gamma"] {
            coordinator.add_word(word).await.unwrap();
        }

        let texts: Vec<String> = coordinator
            .list_words()
            .await
            .unwrap()
            .into_iter()
            .map(|word| word.text)
            .collect();
        assert_eq!(texts, ["gamma", "beta", "alpha"]);
    }

    #[tokio::test]
    async fn search_filters_by_case_insensitive_substring() {
        let coordinator = coordinator(StubProvider::new(Script::Echo));
        for word in ["apple", "application", "banana"] {
            coordinator.add_word(word).await.unwrap();
        }

        let texts: Vec<String> = coordinator
            .search_words("APP")
            .await
            .unwrap()
            .into_iter()
            .map(|word| word.text)
            .collect();
        assert_eq!(texts, ["application", "apple"]);

        assert_eq!(coordinator.search_words("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_anything_else() {
        let provider = StubProvider::new(Script::Echo);
        let coordinator = coordinator(provider.clone());

        let error = coordinator.add_word("   ").await.unwrap_err();
        assert!(matches!(error, VocabError::EmptyText));
        assert_eq!(provider.calls(), 0);
        assert!(coordinator.list_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_a_lookup() {
        let coordinator = Coordinator::new(Arc::new(MemoryStore::new()), None);

        let error = coordinator.add_word("ace").await.unwrap_err();
        assert!(matches!(error, VocabError::Configuration));
        assert!(coordinator.list_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_word_maps_to_not_found_naming_the_text() {
        let coordinator = coordinator(StubProvider::new(Script::NotFound));

        let error = coordinator.add_word("Xyzzyplugh").await.unwrap_err();
        match error {
            VocabError::WordNotFound(word) => assert_eq!(word, "xyzzyplugh"),
            other => panic!("expected WordNotFound, got {other:?}"),
        }
        assert!(coordinator.list_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_maps_to_upstream_and_stores_nothing() {
        let coordinator = coordinator(StubProvider::new(Script::Failure));

        let error = coordinator.add_word("ace").await.unwrap_err();
        assert!(matches!(error, VocabError::Upstream));
        assert!(coordinator.list_words().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sparse_entries_get_default_fields() {
        let sparse = DictionaryEntry {
            word: "code".to_owned(),
            lexical_category: None,
            definition: None,
            example: None,
            audio_file: None,
            phonetic_spelling: None,
        };
        let coordinator = coordinator(StubProvider::new(Script::Entry(sparse)));

        let word = coordinator.add_word("code").await.unwrap();
        assert_eq!(word.lexical_category, "noun");
        assert_eq!(word.definition, crate::word::NO_DEFINITION);
        assert_eq!(word.example, "");
        assert_eq!(word.audio_url, "");
        assert_eq!(word.pronunciation, "");
    }

    #[tokio::test]
    async fn concurrent_misses_store_the_word_once() {
        let provider = StubProvider::new(Script::Echo);
        let coordinator = Arc::new(coordinator(provider.clone()));

        let left = coordinator.clone();
        let right = coordinator.clone();
        let (first, second) = tokio::join!(left.add_word("ace"), right.add_word("ace"));

        assert_eq!(first.unwrap().id, second.unwrap().id);
        assert_eq!(provider.calls(), 1);
        assert_eq!(coordinator.list_words().await.unwrap().len(), 1);
    }
}

// Wire shape of GET /entries/{language}/{word}:
// { results: [ { word, lexicalEntries: [ { lexicalCategory: { text },
//   entries: [ { senses: [ { definitions: [...], examples: [{text}] } ],
//   pronunciations: [{ audioFile, phoneticSpelling }] } ] } ] } ] }
// The response carries far more than this; unknown fields are ignored.

use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::{Credentials, DictionaryEntry, DictionaryError, REQUEST_TIMEOUT};

const LANGUAGE: &str = "en-gb";

#[derive(Debug, Deserialize)]
struct RetrieveEntry {
    #[serde(default)]
    results: Vec<HeadwordEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeadwordEntry {
    word: String,
    #[serde(default)]
    lexical_entries: Vec<LexicalEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexicalEntry {
    lexical_category: Option<LexicalCategory>,
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct LexicalCategory {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    senses: Vec<Sense>,
    #[serde(default)]
    pronunciations: Vec<Pronunciation>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    examples: Vec<Example>,
}

#[derive(Debug, Deserialize)]
struct Example {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pronunciation {
    audio_file: Option<String>,
    phonetic_spelling: Option<String>,
}

pub(crate) async fn retrieve_entry(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
    word: &str,
) -> Result<DictionaryEntry, DictionaryError> {
    let url = format!("{base_url}/entries/{LANGUAGE}/{word}");
    let response = client
        .get(&url)
        .header("app_id", &credentials.app_id)
        .header("app_key", &credentials.app_key)
        .header(header::ACCEPT, "application/json")
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    match response.status() {
        StatusCode::NOT_FOUND => Err(DictionaryError::NotFound),
        status if !status.is_success() => Err(DictionaryError::Status(status.as_u16())),
        _ => {
            let body: RetrieveEntry = response
                .json()
                .await
                .map_err(DictionaryError::Deserialize)?;
            // An empty result list means the service has no entry either.
            first_entry(body).ok_or(DictionaryError::NotFound)
        }
    }
}

fn first_entry(body: RetrieveEntry) -> Option<DictionaryEntry> {
    let result = body.results.into_iter().next()?;
    let lexical = result.lexical_entries.into_iter().next();
    let (lexical_category, sub_entry) = match lexical {
        Some(lexical) => (
            lexical.lexical_category.map(|category| category.text),
            lexical.entries.into_iter().next(),
        ),
        None => (None, None),
    };
    let (sense, pronunciation) = match sub_entry {
        Some(sub_entry) => (
            sub_entry.senses.into_iter().next(),
            sub_entry.pronunciations.into_iter().next(),
        ),
        None => (None, None),
    };
    let (definition, example) = match sense {
        Some(sense) => (
            sense.definitions.into_iter().next(),
            sense.examples.into_iter().next().map(|example| example.text),
        ),
        None => (None, None),
    };
    let (audio_file, phonetic_spelling) = match pronunciation {
        Some(pronunciation) => (pronunciation.audio_file, pronunciation.phonetic_spelling),
        None => (None, None),
    };
    Some(DictionaryEntry {
        word: result.word,
        lexical_category,
        definition,
        example,
        audio_file,
        phonetic_spelling,
    })
}

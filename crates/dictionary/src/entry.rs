/// The slice of a dictionary response the application consumes: the first
/// headword result flattened down to its first lexical entry, first sense
/// and first pronunciation. Fields the service omitted stay `None`; the
/// caller decides how to default them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Canonical spelling as the service returns it.
    pub word: String,
    pub lexical_category: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub audio_file: Option<String>,
    pub phonetic_spelling: Option<String>,
}

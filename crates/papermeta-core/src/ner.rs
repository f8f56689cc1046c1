/// Coarse entity categories produced by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    /// Geopolitical entity: countries, cities, states.
    Gpe,
    Organization,
    Other(String),
}

impl EntityLabel {
    /// Map a conventional NER tag (`PERSON`, `GPE`, `ORG`, ...) to a label.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityLabel::Person,
            "GPE" => EntityLabel::Gpe,
            "ORG" => EntityLabel::Organization,
            _ => EntityLabel::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Organization => "ORG",
            EntityLabel::Other(tag) => tag,
        }
    }
}

/// A recognized span of text. `start`/`end` are byte offsets into the
/// text the recognizer was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }
}

/// Named-entity recognition capability.
///
/// Implementations must be shareable across requests; the pipeline calls
/// `recognize` once per document and treats the result as read-only.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`, returned in order of appearance.
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

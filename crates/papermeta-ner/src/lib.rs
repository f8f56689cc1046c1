//! Lightweight entity recognition for first-page scholarly text.
//!
//! [`GazetteerRecognizer`] tags country mentions (GPE) by matching a
//! gazetteer built from the country registry, and person names (PERSON) by
//! a capitalization heuristic. It is deterministic and needs no model files.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use papermeta_core::{CountryRegistry, EntityLabel, EntityRecognizer, EntitySpan};

mod stop_words;

use stop_words::is_stop_word;

#[derive(Error, Debug)]
pub enum NerError {
    #[error("gazetteer has no usable place names")]
    EmptyGazetteer,
    #[error("failed to compile gazetteer: {0}")]
    Pattern(#[from] regex::Error),
}

/// Two or three capitalized tokens joined by single spaces; leading tokens
/// may be initials, the last one must be a full name.
static PERSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:\p{Lu}\.|\p{Lu}\p{Ll}+(?:-\p{Lu}\p{Ll}+)?) ){1,2}\p{Lu}\p{Ll}+(?:-\p{Lu}\p{Ll}+)?\b")
        .unwrap()
});

/// Shortest place name kept in the gazetteer.
const MIN_PLACE_CHARS: usize = 2;

/// Gazetteer and heuristic based [`EntityRecognizer`].
pub struct GazetteerRecognizer {
    places: Regex,
    place_count: usize,
}

impl GazetteerRecognizer {
    /// Build a recognizer whose GPE gazetteer holds every textual name in
    /// `registry` (canonical, official, common names and aliases; no ISO
    /// codes).
    pub fn new(registry: &CountryRegistry) -> Result<Self, NerError> {
        Self::from_names(
            registry
                .records()
                .iter()
                .flat_map(|record| record.textual_names()),
        )
    }

    /// Build a recognizer from an explicit list of place names.
    pub fn from_names<I, S>(names: I) -> Result<Self, NerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| n.chars().count() >= MIN_PLACE_CHARS)
            .filter(|n| seen.insert(n.clone()))
            .collect();
        if names.is_empty() {
            return Err(NerError::EmptyGazetteer);
        }

        // Longest first so the alternation prefers "United States of America"
        // over "United States" at the same position.
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = names
            .iter()
            .map(|n| bounded_literal(n))
            .collect::<Vec<_>>()
            .join("|");
        let places = RegexBuilder::new(&format!("(?:{})", alternation))
            .size_limit(64 * (1 << 20))
            .build()?;

        tracing::debug!(names = names.len(), "built place gazetteer");

        Ok(Self {
            places,
            place_count: names.len(),
        })
    }

    /// Number of distinct place names in the gazetteer.
    pub fn place_count(&self) -> usize {
        self.place_count
    }

    fn places(&self, text: &str) -> Vec<EntitySpan> {
        self.places
            .find_iter(text)
            .filter(|m| is_whole_word(text, m.start(), m.end()))
            .map(|m| EntitySpan::new(m.as_str(), EntityLabel::Gpe, m.start(), m.end()))
            .collect()
    }
}

/// Escape `name` and require a word boundary on each edge that is an ASCII
/// word character. Names such as `U.S.A.` end in punctuation and get no
/// trailing boundary. ASCII boundaries keep the alternation DFA-friendly.
fn bounded_literal(name: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    let lead = if is_word(name.chars().next()) { r"(?-u:\b)" } else { "" };
    let trail = if is_word(name.chars().next_back()) { r"(?-u:\b)" } else { "" };
    format!("{}{}{}", lead, regex::escape(name), trail)
}

/// Reject a match glued to a letter or digit on an alphanumeric edge. The
/// ASCII boundaries in the alternation treat `ñ` or `é` as non-word, so
/// "Chileño" would otherwise yield "Chile", and non-ASCII edges such as
/// "España" carry no boundary at all.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let glued = |edge: Option<char>, neighbour: Option<char>| {
        edge.is_some_and(char::is_alphanumeric) && neighbour.is_some_and(char::is_alphanumeric)
    };
    !glued(matched.chars().next(), text[..start].chars().next_back())
        && !glued(matched.chars().next_back(), text[end..].chars().next())
}

/// Person-name candidates, trimmed of stop words and dropped when they
/// overlap a place.
fn persons(text: &str, places: &[EntitySpan]) -> Vec<EntitySpan> {
    PERSON_RE
        .find_iter(text)
        .filter_map(|m| name_run(m.as_str(), m.start()))
        .filter(|(start, end)| !places.iter().any(|p| p.start < *end && *start < p.end))
        .map(|(start, end)| EntitySpan::new(&text[start..end], EntityLabel::Person, start, end))
        .collect()
}

/// The first run of at least two consecutive non-stop-word tokens in
/// `candidate`, as absolute byte offsets. A run may not end on an initial.
fn name_run(candidate: &str, offset: usize) -> Option<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    for token in candidate.split(' ') {
        tokens.push((pos, pos + token.len(), token));
        pos += token.len() + 1;
    }
    // Sentinel that closes the last run.
    tokens.push((pos, pos, ""));

    let mut run: Vec<(usize, usize, &str)> = Vec::new();
    for token in tokens {
        let (_, _, word) = token;
        if !word.is_empty() && !is_stop_word(word) {
            run.push(token);
            continue;
        }
        while run.last().is_some_and(|(_, _, w)| w.ends_with('.')) {
            run.pop();
        }
        if run.len() >= 2 {
            let start = run[0].0;
            let end = run[run.len() - 1].1;
            return Some((offset + start, offset + end));
        }
        run.clear();
    }
    None
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let places = self.places(text);
        let people = persons(text, &places);
        tracing::debug!(places = places.len(), persons = people.len(), "recognized entities");

        let mut spans = places;
        spans.extend(people);
        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }
}

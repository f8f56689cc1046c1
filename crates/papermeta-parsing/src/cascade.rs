//! "Try in order, first success wins" helpers shared by the field extractors.

use regex::Regex;

/// A single strategy in a cascade.
pub type Matcher<'a, I, O> = &'a dyn Fn(&I) -> Option<O>;

/// Run `matchers` in order against `input` and return the first `Some`.
/// Later matchers are never evaluated once one succeeds.
pub fn first_match<I: ?Sized, O>(input: &I, matchers: &[Matcher<'_, I, O>]) -> Option<O> {
    matchers.iter().find_map(|m| m(input))
}

/// Return capture group 1 of the first pattern that matches `text`.
///
/// Pattern order decides, not match position: a later pattern matching
/// earlier in the text still loses to an earlier pattern matching anywhere.
pub fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

#[cfg(feature = "pattern")]
use std::convert::Infallible;

#[cfg(feature = "pattern")]
use regex_automata::{meta::Regex, util::captures::Captures, Anchored, Input};

use thiserror::Error;
use tracing::debug;

use crate::subject::Subject;

/// A matcher that can be tried against a subject at a given position.
///
/// Matches are anchored: a match that does not start exactly at `at` does not
/// count. With the `pattern` feature enabled this is implemented for
/// `regex_automata::meta::Regex` over both `&str` and `&[u8]`, yielding the
/// matched sub-sequence.
pub trait Pattern<S: Subject> {
    type Match;
    type Error;

    /// Tries to match at offset `at` of `subject`. On success returns the
    /// match and the offset just past it, which must be an element boundary
    /// no earlier than `at`.
    fn match_at(&self, subject: S, at: usize) -> Result<Option<(Self::Match, usize)>, Self::Error>;
}

impl<S: Subject, P: Pattern<S> + ?Sized> Pattern<S> for &P {
    type Match = P::Match;
    type Error = P::Error;

    fn match_at(&self, subject: S, at: usize) -> Result<Option<(Self::Match, usize)>, Self::Error> {
        (**self).match_at(subject, at)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError<M, T> {
    #[error("pattern failed while matching")]
    Match(#[source] M),
    #[error("pattern matched but its transform failed")]
    Transform(#[source] T),
}

/// A pattern whose matches are passed through a fallible transform, e.g.
/// parsing the matched text into a number.
///
/// A failing transform makes the whole match fail with
/// [`PatternError::Transform`], so a cursor reading this pattern stays put.
#[derive(Debug, Clone)]
pub struct MapMatch<P, F> {
    pattern: P,
    transform: F,
}

impl<P, F> MapMatch<P, F> {
    pub fn new(pattern: P, transform: F) -> Self {
        MapMatch { pattern, transform }
    }
}

impl<S, P, F, T, E> Pattern<S> for MapMatch<P, F>
where
    S: Subject,
    P: Pattern<S>,
    F: Fn(P::Match) -> Result<T, E>,
{
    type Match = T;
    type Error = PatternError<P::Error, E>;

    fn match_at(&self, subject: S, at: usize) -> Result<Option<(T, usize)>, Self::Error> {
        let Some((matched, end)) = self.pattern.match_at(subject, at).map_err(PatternError::Match)? else {
            return Ok(None);
        };
        match (self.transform)(matched) {
            Ok(value) => Ok(Some((value, end))),
            Err(error) => {
                debug!(from = at, to = end, "pattern match rejected by transform");
                Err(PatternError::Transform(error))
            }
        }
    }
}

/// Wraps a regex so that matching yields all capture groups rather than just
/// the overall match.
#[derive(Debug, Clone)]
pub struct Captured<R>(pub R);

// Regex patterns run an anchored search over the whole subject, starting at the
// cursor. The search never looks past the longest possible match, and text
// before the cursor still counts for look-behind assertions such as `\b`.
// Consequently `^` only matches when the cursor is at offset 0. Patterns
// meant to match arbitrary bytes must be built with UTF-8 mode disabled in
// their syntax config.
#[cfg(feature = "pattern")]
fn anchored(haystack: &[u8], at: usize) -> Input<'_> {
    Input::new(haystack).range(at..).anchored(Anchored::Yes)
}

#[cfg(feature = "pattern")]
impl<'a> Pattern<&'a str> for Regex {
    type Match = &'a str;
    type Error = Infallible;

    fn match_at(&self, subject: &'a str, at: usize) -> Result<Option<(&'a str, usize)>, Infallible> {
        Ok(self
            .search(&anchored(subject.as_bytes(), at))
            .filter(|m| subject.is_char_boundary(m.end()))
            .map(|m| (&subject[m.range()], m.end())))
    }
}

#[cfg(feature = "pattern")]
impl<'a> Pattern<&'a [u8]> for Regex {
    type Match = &'a [u8];
    type Error = Infallible;

    fn match_at(&self, subject: &'a [u8], at: usize) -> Result<Option<(&'a [u8], usize)>, Infallible> {
        Ok(self
            .search(&anchored(subject, at))
            .map(|m| (&subject[m.range()], m.end())))
    }
}

#[cfg(feature = "pattern")]
impl<'a> Pattern<&'a str> for Captured<Regex> {
    type Match = Captures;
    type Error = Infallible;

    fn match_at(&self, subject: &'a str, at: usize) -> Result<Option<(Captures, usize)>, Infallible> {
        let mut captures = self.0.create_captures();
        self.0.search_captures(&anchored(subject.as_bytes(), at), &mut captures);
        let end = captures
            .get_match()
            .map(|m| m.end())
            .filter(|&end| subject.is_char_boundary(end));
        Ok(end.map(|end| (captures, end)))
    }
}

#[cfg(feature = "pattern")]
impl<'a> Pattern<&'a [u8]> for Captured<Regex> {
    type Match = Captures;
    type Error = Infallible;

    fn match_at(&self, subject: &'a [u8], at: usize) -> Result<Option<(Captures, usize)>, Infallible> {
        let mut captures = self.0.create_captures();
        self.0.search_captures(&anchored(subject, at), &mut captures);
        let end = captures.get_match().map(|m| m.end());
        Ok(end.map(|end| (captures, end)))
    }
}

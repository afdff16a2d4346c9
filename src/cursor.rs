use std::iter::FusedIterator;

use tracing::trace;

use crate::pattern::Pattern;
use crate::position::{OutOfBounds, Position};
use crate::subject::{PrefixEq, Subject};

/// A reading cursor over a borrowed [`Subject`].
///
/// The cursor only ever moves forward on its own. Backtracking is done by the
/// caller, either by saving a [`Position`] and restoring it with
/// [`set_position`](Cursor::set_position), or by copying the whole cursor.
///
/// Reads are all-or-nothing: an operation that fails to match leaves the
/// position where it was.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<S> {
    subject: S,
    // Offset in the subject's index units. Always an element boundary in
    // 0..=subject.end().
    pos: usize,
}

impl<S: Subject> Cursor<S> {
    pub fn new(subject: S) -> Self {
        Cursor { subject, pos: 0 }
    }

    pub fn at_end(subject: S) -> Self {
        Cursor {
            pos: subject.end(),
            subject,
        }
    }

    /// The whole subject, regardless of the current position.
    pub fn subject(&self) -> S {
        self.subject
    }

    pub fn position(&self) -> Position {
        Position(self.pos)
    }

    /// Moves the cursor to `position`, typically one saved earlier with
    /// [`position`](Cursor::position).
    ///
    /// # Panics
    ///
    /// Panics if `position` is not a valid position in the subject.
    pub fn set_position(&mut self, position: Position) {
        if let Err(error) = self.try_set_position(position) {
            panic!("{}", error);
        }
    }

    pub fn try_set_position(&mut self, position: Position) -> Result<(), OutOfBounds> {
        if !self.subject.is_boundary(position.0) {
            return Err(OutOfBounds::Position {
                offset: position.0,
                end: self.subject.end(),
            });
        }
        self.pos = position.0;
        Ok(())
    }

    pub fn is_at_start(&self) -> bool {
        self.pos == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.subject.end()
    }

    /// Number of index units left, i.e. `rest().end()`.
    pub fn remaining_len(&self) -> usize {
        self.subject.end() - self.pos
    }

    /// Moves past the current element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    pub fn advance_one(&mut self) {
        match self.subject.element_at(self.pos) {
            Some((_, next)) => self.pos = next,
            None => panic!("cannot advance past the end of the subject"),
        }
    }

    /// Moves forward by exactly `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` elements remain.
    pub fn advance_by(&mut self, n: usize) {
        if let Err(error) = self.try_advance_by(n) {
            panic!("{}", error);
        }
    }

    /// Moves forward by exactly `n` elements, or not at all if fewer than `n`
    /// elements remain.
    pub fn try_advance_by(&mut self, n: usize) -> Result<(), OutOfBounds> {
        match self.subject.step_by(self.pos, n) {
            Some(pos) => {
                self.pos = pos;
                Ok(())
            }
            None => Err(OutOfBounds::Advance {
                requested: n,
                available: self.subject.remaining_count(self.pos),
            }),
        }
    }

    pub fn peek(&self) -> Option<S::Element> {
        self.subject.element_at(self.pos).map(|(element, _)| element)
    }

    /// The element after the current one.
    pub fn tail_peek(&self) -> Option<S::Element> {
        let (_, next) = self.subject.element_at(self.pos)?;
        self.subject.element_at(next).map(|(element, _)| element)
    }

    /// The two elements after the current one.
    pub fn tail_peek2(&self) -> Option<(S::Element, S::Element)> {
        let (_, first) = self.subject.element_at(self.pos)?;
        let (a, second) = self.subject.element_at(first)?;
        let (b, _) = self.subject.element_at(second)?;
        Some((a, b))
    }

    /// Everything from the current position to the end.
    pub fn rest(&self) -> S {
        self.subject.slice(self.pos, self.subject.end())
    }

    /// Everything before the current position.
    pub fn consumed(&self) -> S {
        self.subject.slice(0, self.pos)
    }

    pub fn has_prefix_element(&self, element: S::Element) -> bool
    where
        S::Element: PartialEq,
    {
        self.peek() == Some(element)
    }

    pub fn has_prefix(&self, prefix: S) -> bool
    where
        S: PrefixEq,
    {
        PrefixEq::starts_with(self.rest(), prefix)
    }

    pub fn read_one(&mut self) -> Option<S::Element> {
        let (element, next) = self.subject.element_at(self.pos)?;
        self.pos = next;
        Some(element)
    }

    /// Reads the remaining elements one by one. Every element the iterator
    /// yields is consumed from this cursor.
    pub fn elements(&mut self) -> Elements<'_, S> {
        Elements { cursor: self }
    }

    /// Reads exactly `n` elements, or nothing if fewer than `n` remain.
    pub fn read_count(&mut self, n: usize) -> Option<S> {
        let end = self.subject.step_by(self.pos, n)?;
        let read = self.subject.slice(self.pos, end);
        self.pos = end;
        Some(read)
    }

    pub fn read_element(&mut self, element: S::Element) -> bool
    where
        S::Element: PartialEq,
    {
        match self.subject.element_at(self.pos) {
            Some((current, next)) if current == element => {
                self.pos = next;
                true
            }
            _ => false,
        }
    }

    pub fn read_sequence(&mut self, sequence: S) -> bool
    where
        S: PrefixEq,
    {
        if !self.has_prefix(sequence) {
            return false;
        }
        self.pos += sequence.end();
        true
    }

    pub fn read_if(&mut self, predicate: impl FnOnce(S::Element) -> bool) -> Option<S::Element> {
        let (element, next) = self.subject.element_at(self.pos)?;
        if !predicate(element) {
            return None;
        }
        self.pos = next;
        Some(element)
    }

    /// Like [`read_if`](Cursor::read_if) with a fallible predicate. An error
    /// from the predicate is returned as is and the cursor does not move.
    pub fn try_read_if<E>(
        &mut self,
        predicate: impl FnOnce(S::Element) -> Result<bool, E>,
    ) -> Result<Option<S::Element>, E> {
        let Some((element, next)) = self.subject.element_at(self.pos) else {
            return Ok(None);
        };
        if !predicate(element)? {
            return Ok(None);
        }
        self.pos = next;
        Ok(Some(element))
    }

    /// Reads the longest run of elements satisfying `predicate`. The result
    /// may be empty.
    pub fn read_while(&mut self, predicate: impl FnMut(S::Element) -> bool) -> S {
        let end = self.scan_while(predicate);
        let read = self.subject.slice(self.pos, end);
        self.pos = end;
        read
    }

    /// Like [`read_while`](Cursor::read_while) with a fallible predicate. On
    /// error nothing is consumed, including elements that already matched.
    pub fn try_read_while<E>(
        &mut self,
        mut predicate: impl FnMut(S::Element) -> Result<bool, E>,
    ) -> Result<S, E> {
        let mut end = self.pos;
        while let Some((element, next)) = self.subject.element_at(end) {
            if !predicate(element)? {
                break;
            }
            end = next;
        }
        let read = self.subject.slice(self.pos, end);
        self.pos = end;
        Ok(read)
    }

    pub fn advance_while(&mut self, predicate: impl FnMut(S::Element) -> bool) {
        self.pos = self.scan_while(predicate);
    }

    /// Like [`advance_while`](Cursor::advance_while), but the predicate also
    /// sees the cursor as it stands before the element is consumed, so it can
    /// look further ahead with [`tail_peek`](Cursor::tail_peek) and friends.
    pub fn advance_while_inspecting(&mut self, mut predicate: impl FnMut(S::Element, &Self) -> bool) {
        while let Some((element, next)) = self.subject.element_at(self.pos) {
            if !predicate(element, &*self) {
                break;
            }
            self.pos = next;
        }
    }

    /// Whether `pattern` matches at the current position.
    pub fn has_prefix_pattern<P: Pattern<S>>(&self, pattern: &P) -> Result<bool, P::Error> {
        Ok(pattern.match_at(self.subject, self.pos)?.is_some())
    }

    /// Reads a match of `pattern` anchored at the current position. Nothing
    /// is consumed if the pattern does not match or fails.
    pub fn read_pattern<P: Pattern<S>>(&mut self, pattern: &P) -> Result<Option<P::Match>, P::Error> {
        let Some((matched, end)) = pattern.match_at(self.subject, self.pos)? else {
            return Ok(None);
        };
        assert!(
            end >= self.pos && self.subject.is_boundary(end),
            "pattern match ends outside of the subject"
        );
        trace!(from = self.pos, to = end, "pattern matched");
        self.pos = end;
        Ok(Some(matched))
    }

    /// Moves past a match of `pattern` if there is one. Returns whether the
    /// pattern matched.
    pub fn advance_matching_pattern<P: Pattern<S>>(&mut self, pattern: &P) -> Result<bool, P::Error> {
        Ok(self.read_pattern(pattern)?.is_some())
    }

    fn scan_while(&self, mut predicate: impl FnMut(S::Element) -> bool) -> usize {
        let mut index = self.pos;
        while let Some((element, next)) = self.subject.element_at(index) {
            if !predicate(element) {
                break;
            }
            index = next;
        }
        index
    }

}

impl<S: Subject> From<S> for Cursor<S> {
    fn from(subject: S) -> Self {
        Cursor::new(subject)
    }
}

/// Iterator returned by [`Cursor::elements`].
#[derive(Debug)]
pub struct Elements<'c, S> {
    cursor: &'c mut Cursor<S>,
}

impl<'c, S: Subject> Iterator for Elements<'c, S> {
    type Item = S::Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.read_one()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.subject.size_hint(self.cursor.pos)
    }
}

impl<'c, S: Subject> FusedIterator for Elements<'c, S> {}

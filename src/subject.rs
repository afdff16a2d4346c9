/// An ordered, finite collection that a [`Cursor`](crate::Cursor) can read from.
///
/// Implementors are cheap borrowed views (`&[T]`, `&str`). Positions are
/// expressed in the collection's own index units: elements for slices, bytes
/// for strings. The sub-sequence type returned by the cursor is `Self`, so
/// slicing a subject never copies the underlying storage.
pub trait Subject: Copy {
    type Element: Copy;

    /// One-past-the-last index.
    fn end(self) -> usize;

    /// The element starting at `index` together with the index of the
    /// element that follows it, or `None` if `index` is at the end.
    fn element_at(self, index: usize) -> Option<(Self::Element, usize)>;

    /// The sub-sequence `from..to`. Both bounds must be element boundaries.
    fn slice(self, from: usize, to: usize) -> Self;

    /// Whether `index` denotes a position the cursor may rest on.
    fn is_boundary(self, index: usize) -> bool {
        index <= self.end()
    }

    /// The index reached by stepping `n` elements forward from `index`, or
    /// `None` if fewer than `n` elements remain.
    fn step_by(self, index: usize, n: usize) -> Option<usize> {
        let mut index = index;
        for _ in 0..n {
            let (_, next) = self.element_at(index)?;
            index = next;
        }
        Some(index)
    }

    /// Number of elements from `index` to the end.
    fn remaining_count(self, index: usize) -> usize {
        let mut count = 0;
        let mut index = index;
        while let Some((_, next)) = self.element_at(index) {
            count += 1;
            index = next;
        }
        count
    }

    /// Bounds on the number of elements remaining after `index`.
    fn size_hint(self, index: usize) -> (usize, Option<usize>) {
        let remaining = self.end() - index;
        (usize::from(remaining > 0), Some(remaining))
    }
}

/// Subjects whose sub-sequences can be compared for a prefix match.
pub trait PrefixEq: Subject {
    /// Whether `self` begins with all of `prefix`. A prefix longer than
    /// `self` never matches.
    fn starts_with(self, prefix: Self) -> bool;
}

impl<'a, T> Subject for &'a [T] {
    type Element = &'a T;

    fn end(self) -> usize {
        self.len()
    }

    fn element_at(self, index: usize) -> Option<(&'a T, usize)> {
        self.get(index).map(|element| (element, index + 1))
    }

    fn slice(self, from: usize, to: usize) -> Self {
        &self[from..to]
    }

    fn step_by(self, index: usize, n: usize) -> Option<usize> {
        index.checked_add(n).filter(|&index| index <= self.len())
    }

    fn remaining_count(self, index: usize) -> usize {
        self.len() - index
    }

    fn size_hint(self, index: usize) -> (usize, Option<usize>) {
        let remaining = self.len() - index;
        (remaining, Some(remaining))
    }
}

impl<'a, T: PartialEq> PrefixEq for &'a [T] {
    fn starts_with(self, prefix: Self) -> bool {
        <[T]>::starts_with(self, prefix)
    }
}

impl<'a> Subject for &'a str {
    type Element = char;

    fn end(self) -> usize {
        self.len()
    }

    fn element_at(self, index: usize) -> Option<(char, usize)> {
        let c = self.get(index..)?.chars().next()?;
        Some((c, index + c.len_utf8()))
    }

    fn slice(self, from: usize, to: usize) -> Self {
        &self[from..to]
    }

    fn is_boundary(self, index: usize) -> bool {
        self.is_char_boundary(index)
    }

    fn size_hint(self, index: usize) -> (usize, Option<usize>) {
        // A char is between one and four bytes in UTF-8.
        let remaining = self.len() - index;
        ((remaining + 3) / 4, Some(remaining))
    }
}

impl<'a> PrefixEq for &'a str {
    fn starts_with(self, prefix: Self) -> bool {
        str::starts_with(self, prefix)
    }
}

use thiserror::Error;

/// A saved cursor position, used to backtrack with
/// [`Cursor::set_position`](crate::Cursor::set_position).
///
/// The offset is in the subject's index units: elements for slices and bytes
/// for strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub(crate) usize);

impl Position {
    pub fn offset(self) -> usize {
        self.0
    }
}

impl From<usize> for Position {
    fn from(offset: usize) -> Self {
        Position(offset)
    }
}

impl From<Position> for usize {
    fn from(position: Position) -> usize {
        position.0
    }
}

/// Returned by the non-fatal movement operations when the requested
/// position lies outside the subject.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfBounds {
    #[error("cannot advance by {requested} elements, only {available} remain")]
    Advance { requested: usize, available: usize },
    #[error("offset {offset} is not a valid position in a subject of length {end}")]
    Position { offset: usize, end: usize },
}

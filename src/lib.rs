//! Zero-copy reading cursors over borrowed collections.
//!
//! A [`Cursor`] walks a [`Subject`] (a byte slice, a string, or a slice of any
//! element type) front to back. Reads either consume exactly what they
//! promise or leave the cursor untouched, which makes it straightforward to
//! build decoders that try alternatives and backtrack via [`Position`].

pub use cursor::{Cursor, Elements};
pub use pattern::{Captured, MapMatch, Pattern, PatternError};
#[cfg(feature = "pattern")]
pub use regex_automata::meta::Regex;
pub use position::{OutOfBounds, Position};
pub use subject::{PrefixEq, Subject};

mod cursor;
mod pattern;
mod position;
mod subject;

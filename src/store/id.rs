use std::fmt;
use std::str::FromStr;

/// Generated identifier of a stored canvas.
///
/// Ids are random UUIDs rendered in their hyphenated lowercase form, which is also the stem of
/// the canvas file name. Only strings that parse as a UUID can name a canvas, so an id never
/// carries path separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanvasId(uuid::Uuid);

impl CanvasId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse a caller-supplied id; `None` when it cannot name any canvas.
    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw).ok().map(Self)
    }

    /// Canonical text form, used for file names and stripe hashing.
    pub fn as_hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for CanvasId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

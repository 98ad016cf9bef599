//! OEIS sequence identifiers

use core::fmt;
use core::str::FromStr;

use crate::error::FetchError;

/// An OEIS A-number such as `A000045`, stored by its numeric part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceName(u32);

impl SequenceName {
    #[must_use]
    #[inline]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The number after the leading `A`
    #[must_use]
    #[inline]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl FromStr for SequenceName {
    type Err = FetchError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('A')
            .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| FetchError::graph(format!("Not a sequence name: '{s}'")))?;

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|e| FetchError::graph(format!("Sequence number out of range in '{s}': {e}")))
    }
}

impl fmt::Display for SequenceName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:06}", self.0)
    }
}

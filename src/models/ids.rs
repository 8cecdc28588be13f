//! Student identifier
//!
//! Student ids are plain positive integers allocated by the store. The
//! newtype keeps them integral everywhere inside the crate; rendering to text
//! only happens through `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(u32);

impl StudentId {
    /// The id given to the first record of an empty store
    pub const FIRST: StudentId = StudentId(1);

    /// Wrap a raw integer id
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw integer value
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The id that follows this one, or `None` on overflow
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StudentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_plain_integer() {
        assert_eq!(StudentId::new(42).to_string(), "42");
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 7 ".parse::<StudentId>().unwrap(), StudentId::new(7));
        assert!("abc".parse::<StudentId>().is_err());
        assert!("-1".parse::<StudentId>().is_err());
    }

    #[test]
    fn test_next() {
        assert_eq!(StudentId::FIRST.next(), Some(StudentId::new(2)));
        assert_eq!(StudentId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&StudentId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}

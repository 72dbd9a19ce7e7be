//! Photo identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::error::{Error, InvalidInputError};

/// Maximum length of a photo id.
const MAX_LEN: usize = 64;

/// A validated photo record identifier.
///
/// Ids are opaque to everything but the generator. Any short printable
/// token is accepted, so ids written by older builds (`legacy.2`) still load;
/// whitespace, control characters and path separators are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhotoId(String);

impl PhotoId {
    /// Create a new photo id from a string, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| {
            Error::InvalidInput(InvalidInputError::PhotoId {
                value: s.to_string(),
                reason: reason.to_string(),
            })
        };

        if s.is_empty() {
            return Err(invalid("cannot be empty"));
        }

        if s.len() > MAX_LEN {
            return Err(invalid("exceeds maximum length of 64 characters"));
        }

        if s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/' || c == '\\')
        {
            return Err(invalid("contains invalid characters"));
        }

        Ok(())
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhotoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PhotoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhotoId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PhotoId> for String {
    fn from(id: PhotoId) -> Self {
        id.0
    }
}

/// Issues time-derived photo ids.
///
/// Ids are the epoch-millisecond capture time in decimal. When two captures
/// land in the same millisecond (or the clock steps backwards) the generator
/// issues one past the last value instead, so ids from one generator are
/// strictly increasing. Once the numeric range is exhausted (an observed id
/// of `i64::MAX`) it issues `<i64::MAX>-<n>` instead.
#[derive(Debug, Default)]
pub struct PhotoIdGenerator {
    last: AtomicI64,
    spill: AtomicU64,
}

impl PhotoIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id for a capture at `now_millis`.
    pub fn issue(&self, now_millis: i64) -> PhotoId {
        let mut issued = None;
        let _ = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = if now_millis > last {
                    Some(now_millis)
                } else {
                    last.checked_add(1)
                };
                issued
            });

        match issued {
            Some(n) => PhotoId(n.to_string()),
            None => {
                let n = self.spill.fetch_add(1, Ordering::SeqCst) + 1;
                PhotoId(format!("{}-{}", i64::MAX, n))
            }
        }
    }

    /// Seed the generator so it never reissues an id at or below `millis`.
    pub fn observe(&self, millis: i64) {
        self.last.fetch_max(millis, Ordering::SeqCst);
    }
}

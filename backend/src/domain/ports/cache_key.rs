//! Cache key for demographic stats, derived from a person's given name.
use thiserror::Error;

/// Raw given name used verbatim as the cache key.
///
/// Names are not normalised: `"Oliver"` and `"oliver"` are distinct keys, and
/// two people sharing a given name share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonStatsCacheKey(String);

impl PersonStatsCacheKey {
    /// Construct a key, rejecting blank names.
    pub fn new(value: impl Into<String>) -> Result<Self, PersonStatsCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(PersonStatsCacheKeyValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PersonStatsCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PersonStatsCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`PersonStatsCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonStatsCacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("person stats cache key must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::{PersonStatsCacheKey, PersonStatsCacheKeyValidationError};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank(#[case] value: &str) {
        let err = PersonStatsCacheKey::new(value).expect_err("blank keys rejected");
        assert_eq!(err, PersonStatsCacheKeyValidationError::Empty);
    }

    #[rstest]
    #[case("Oliver")]
    #[case(" Oliver")]
    #[case("oliver")]
    fn keeps_the_name_verbatim(#[case] value: &str) {
        let key = PersonStatsCacheKey::new(value).expect("valid key");
        assert_eq!(key.as_str(), value);
        assert_eq!(key.to_string(), value);
    }
}

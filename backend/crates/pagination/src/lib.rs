//! Offset and limit pagination primitives for backend list endpoints.
//!
//! List endpoints accept an `offset` and a `limit`. A `limit` of zero is a
//! sentinel meaning "no limit": every item from `offset` onwards is returned.
//! [`PageRequest`] carries that rule as a typed [`Limit`] so adapters never
//! compare against the magic zero themselves.
//!
//! ```
//! use pagination::{Limit, PageRequest};
//!
//! let page = PageRequest::new(10, 0);
//! assert_eq!(page.limit(), Limit::Unbounded);
//! assert_eq!(page.offset(), 10);
//! ```

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of items a page may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Return every remaining item.
    Unbounded,
    /// Return at most this many items.
    AtMost(NonZeroU64),
}

impl Limit {
    /// Interpret a raw limit where zero means "no limit".
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        match NonZeroU64::new(raw) {
            Some(value) => Self::AtMost(value),
            None => Self::Unbounded,
        }
    }

    /// Return the raw representation, mapping [`Limit::Unbounded`] to zero.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        match self {
            Self::Unbounded => 0,
            Self::AtMost(value) => value.get(),
        }
    }
}

/// Errors raised when a page request cannot be expressed for a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The offset does not fit into a signed 64-bit integer.
    #[error("offset {0} exceeds the supported range")]
    OffsetOutOfRange(u64),
    /// The limit does not fit into a signed 64-bit integer.
    #[error("limit {0} exceeds the supported range")]
    LimitOutOfRange(u64),
}

/// One page of a listing, expressed as an offset and a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    offset: u64,
    limit: Limit,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::all()
    }
}

impl PageRequest {
    /// Build a page request from raw values; `limit == 0` means unbounded.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: Limit::from_raw(limit),
        }
    }

    /// Page covering every item.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(0, 0)
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of items to return.
    #[must_use]
    pub const fn limit(&self) -> Limit {
        self.limit
    }

    /// Offset as a signed integer, as SQL drivers expect.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::OffsetOutOfRange`] when the offset exceeds
    /// `i64::MAX`.
    pub fn offset_i64(&self) -> Result<i64, PageRequestError> {
        i64::try_from(self.offset).map_err(|_| PageRequestError::OffsetOutOfRange(self.offset))
    }

    /// Limit as a signed integer, or `None` when the page is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::LimitOutOfRange`] when the limit exceeds
    /// `i64::MAX`.
    pub fn limit_i64(&self) -> Result<Option<i64>, PageRequestError> {
        match self.limit {
            Limit::Unbounded => Ok(None),
            Limit::AtMost(value) => i64::try_from(value.get())
                .map(Some)
                .map_err(|_| PageRequestError::LimitOutOfRange(value.get())),
        }
    }

    /// Slice an in-memory sequence according to this page.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(1, 2);
    /// assert_eq!(page.apply(vec![1, 2, 3, 4, 5]), vec![2, 3]);
    /// ```
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let remaining = items.into_iter().skip(skip);
        match self.limit {
            Limit::Unbounded => remaining.collect(),
            Limit::AtMost(value) => remaining
                .take(usize::try_from(value.get()).unwrap_or(usize::MAX))
                .collect(),
        }
    }
}

/// Query-string parameters carrying an optional offset and limit.
///
/// Missing values default to zero, so an empty query selects every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Number of items to skip.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Maximum number of items; zero or absent means unbounded.
    #[serde(default)]
    pub limit: Option<u64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        Self::new(params.offset.unwrap_or(0), params.limit.unwrap_or(0))
    }
}

//! The search response of the Gutendex API before it is normalized into the catalog model.
//!
//! Every field the catalog can live without is optional so that an incomplete result is still
//! deserialized and rejected later by [`normalize`](crate::normalize()) instead of failing the
//! whole payload.

use serde::{Deserialize, Deserializer};

use crate::{Error, ErrorKind};

/// One page of search results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    /// Total number of results across all pages.
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, pages are never followed.
    pub next: Option<String>,
    /// URL of the previous page.
    pub previous: Option<String>,
    /// The results on this page in the order the API ranked them.
    #[serde(default)]
    pub results: Vec<RawResult>,
}

/// One entry of the search response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawResult {
    /// Title of the book, results without one are unusable.
    pub title: Option<String>,
    /// Authors of the book, the first one is the main author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<RawAuthor>,
    /// Language codes of the book, such as `en`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    /// Number of times the book was downloaded from Project Gutenberg.
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_count: u64,
}

// a `null` is read the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An author as described by a search result.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawAuthor {
    /// Name of the author, usually in the `Last, First` form.
    pub name: Option<String>,
    /// Year of birth when known.
    pub birth_year: Option<i32>,
    /// Year of death when known.
    pub death_year: Option<i32>,
}

/// Parses a Gutendex JSON payload into its search results.
///
/// # Errors
///
/// An [`Err`] with the [`ErrorKind::MalformedPayload`] kind is returned when the payload is not
/// JSON in the shape of a [`SearchPage`].
pub fn parse(payload: &str) -> Result<Vec<RawResult>, Error> {
    serde_json::from_str::<SearchPage>(payload)
        .map(|page| {
            log::trace!(
                "Parsed {} of {} results from the payload",
                page.results.len(),
                page.count
            );
            page.results
        })
        .map_err(|e| {
            Error::wrap_with(
                ErrorKind::MalformedPayload,
                e,
                "Search response does not match the expected shape",
            )
        })
}

use crate::{
    model::{Author, Book, UNKNOWN_LANGUAGE},
    raw::{RawAuthor, RawResult},
    Error, ErrorKind,
};

/// Turns one search result into a [`Book`] candidate and its [`Author`] candidate.
///
/// Only the first author and the first language of the result are kept. Missing birth and death
/// years become `0` and a result without languages gets the [`UNKNOWN_LANGUAGE`] marker.
///
/// # Errors
///
/// An [`Err`] with the [`ErrorKind::MalformedResult`] kind is returned when the result has no
/// title, no authors or a first author without a name.
pub fn normalize(result: RawResult) -> Result<Book, Error> {
    // Deconstruct result to take ownership of fields (avoids cloning).
    let RawResult {
        title,
        authors,
        languages,
        download_count,
    } = result;

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::new(ErrorKind::MalformedResult, "Result has no title"))?;

    let RawAuthor {
        name,
        birth_year,
        death_year,
    } = authors.into_iter().next().ok_or_else(|| {
        Error::new(
            ErrorKind::MalformedResult,
            format!("Result '{title}' has no authors"),
        )
    })?;

    let name = name.filter(|n| !n.trim().is_empty()).ok_or_else(|| {
        Error::new(
            ErrorKind::MalformedResult,
            format!("First author of '{title}' has no name"),
        )
    })?;

    let author = Author::new(name, birth_year.unwrap_or(0), death_year.unwrap_or(0));

    let language = languages
        .into_iter()
        .next()
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned());

    Ok(Book::new(title, author, language, download_count))
}

//! Read-only lookups over everything in a [`Store`].
//!
//! None of these functions write to the store, and all of them keep the store's insertion order
//! unless stated otherwise.

use crate::{
    model::{Author, Book},
    Error, Store,
};

/// All books of the store.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn list_books<S: Store + ?Sized>(store: &S) -> Result<Vec<Book>, Error> {
    store.books()
}

/// All authors of the store.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn list_authors<S: Store + ?Sized>(store: &S) -> Result<Vec<Author>, Error> {
    store.authors()
}

/// Authors that were alive in `year`, counting both their birth and death year.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn alive_in_year<S: Store + ?Sized>(store: &S, year: i32) -> Result<Vec<Author>, Error> {
    let mut authors = store.authors()?;
    authors.retain(|a| a.is_alive_in(year));
    Ok(authors)
}

/// Books written in the language `code`, compared without case.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn by_language<S: Store + ?Sized>(store: &S, code: &str) -> Result<Vec<Book>, Error> {
    let mut books = store.books()?;
    books.retain(|b| b.is_in_language(code));
    Ok(books)
}

/// All books, the most downloaded first.
///
/// Books with the same download count keep the order they were saved in.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn most_popular<S: Store + ?Sized>(store: &S) -> Result<Vec<Book>, Error> {
    let mut books = store.books()?;
    // sort_by is stable which keeps ties in insertion order
    books.sort_by(|a, b| b.download_count().cmp(&a.download_count()));
    Ok(books)
}

/// Books written by `author`.
///
/// An author that was never saved has no books.
///
/// # Errors
///
/// Returns an [`Err`] when the store cannot be read.
pub fn books_by_author<S: Store + ?Sized>(store: &S, author: &Author) -> Result<Vec<Book>, Error> {
    let Some(id) = author.id() else {
        return Ok(Vec::new());
    };

    let mut books = store.books()?;
    books.retain(|b| b.author().id() == Some(id));
    Ok(books)
}

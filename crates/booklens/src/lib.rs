#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
#![doc = include_str!("../README.md")]

mod api;
mod error;
#[cfg(feature = "file")]
pub mod file;
mod ingest;
pub mod model;
mod normalize;
pub mod query;
pub mod raw;
pub mod store;

pub use error::{Error, ErrorKind};
pub use ingest::{import_first_match, ImportOutcome};
pub use model::{Author, AuthorId, Book, BookId};
pub use normalize::normalize;
pub use store::{Catalog, Store};

use log::trace;
use raw::RawResult;

type Client = reqwest::blocking::Client;

/// Search the Gutendex catalog for books matching `title`.
///
/// The results are returned in the order of the API and are not normalized, see [`normalize`].
/// Only the first page of results is fetched.
///
/// # Errors
///
/// An `Err` with the [`ErrorKind::Transport`] kind is returned when the API cannot be reached.
/// An `Err` with the [`ErrorKind::MalformedPayload`] kind is returned when the response cannot
/// be parsed.
#[inline]
pub fn search_by_title(title: &str) -> Result<Vec<RawResult>, Error> {
    trace!("Search books by title of '{title}'");
    api::gutendex::search_by_title::<Client>(title)
}

/// Search the Gutendex catalog for `title` and import the first result into the store.
///
/// A blank title is a [`ImportOutcome::NoMatch`] without making a request. A response that
/// cannot be parsed is also a [`ImportOutcome::NoMatch`], see [`import_first_match`] for how
/// the first result is imported.
///
/// # Errors
///
/// An `Err` with the [`ErrorKind::Transport`] kind is returned when the API cannot be reached,
/// nothing is written to the store in that case.
/// An `Err` is returned when the store fails to look up or save an entity.
#[inline]
pub fn import_by_title<S: Store + ?Sized>(
    store: &mut S,
    title: &str,
) -> Result<ImportOutcome, Error> {
    trace!("Import first book found for title of '{title}'");
    api::gutendex::import_by_title::<Client, S>(store, title)
}

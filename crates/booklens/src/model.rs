//! The two entities of a catalog: [`Author`] and [`Book`].
//!
//! Both are plain values. Identity is assigned by a [`Store`](crate::Store) when the value is
//! first saved, so a freshly built value (a *candidate*) has no id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language marker used for books whose search result lists no language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Store assigned identity of an [`Author`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(u64);

/// Store assigned identity of a [`Book`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

macro_rules! impl_id {
    ($($id:ident),*) => {
        $(
            impl $id {
                /// Wraps a raw identity value.
                #[must_use]
                pub const fn new(value: u64) -> Self {
                    Self(value)
                }

                /// The raw identity value.
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Display for $id {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        )*
    };
}

impl_id!(AuthorId, BookId);

/// A person credited as the author of one or more books.
///
/// The `name` is the natural key of an author, a catalog never holds two authors with the same
/// name. A year of `0` means the year is unknown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    birth_year: i32,
    death_year: i32,
}

impl Author {
    /// Creates an author candidate which has not been saved to a store yet.
    pub fn new<S: Into<String>>(name: S, birth_year: i32, death_year: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_year,
            death_year,
        }
    }

    /// Returns this author with the identity assigned by a store.
    ///
    /// Only [`Store`](crate::Store) implementations should need to call this.
    #[must_use]
    pub fn with_id(mut self, id: AuthorId) -> Self {
        self.id = Some(id);
        self
    }

    /// The identity of the author, `None` until the author has been saved.
    #[must_use]
    pub const fn id(&self) -> Option<AuthorId> {
        self.id
    }

    /// The name of the author, unique within a store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The birth year, `0` when unknown.
    #[must_use]
    pub const fn birth_year(&self) -> i32 {
        self.birth_year
    }

    /// The death year, `0` when unknown.
    #[must_use]
    pub const fn death_year(&self) -> i32 {
        self.death_year
    }

    /// Whether the author was alive in `year`, both the birth and death year included.
    #[must_use]
    pub const fn is_alive_in(&self, year: i32) -> bool {
        self.birth_year <= year && year <= self.death_year
    }
}

/// A single book of the catalog.
///
/// The `title` is the natural key of a book, a catalog never holds two books with the same
/// title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    id: Option<BookId>,
    title: String,
    author: Author,
    language: String,
    download_count: u64,
}

impl Book {
    /// Creates a book candidate which has not been saved to a store yet.
    pub fn new<T, L>(title: T, author: Author, language: L, download_count: u64) -> Self
    where
        T: Into<String>,
        L: Into<String>,
    {
        Self {
            id: None,
            title: title.into(),
            author,
            language: language.into(),
            download_count,
        }
    }

    /// Returns this book with the identity assigned by a store.
    ///
    /// Only [`Store`](crate::Store) implementations should need to call this.
    #[must_use]
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    /// The identity of the book, `None` until the book has been saved.
    #[must_use]
    pub const fn id(&self) -> Option<BookId> {
        self.id
    }

    /// The title of the book, unique within a store.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The author credited first for the book.
    #[must_use]
    pub const fn author(&self) -> &Author {
        &self.author
    }

    /// Points this book at another author, used when the author already exists in a store.
    pub(crate) fn set_author(&mut self, author: Author) {
        self.author = author;
    }

    /// The language code of the book, such as `en`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the book is written in the language `code`, ignoring case.
    #[must_use]
    pub fn is_in_language(&self, code: &str) -> bool {
        self.language.eq_ignore_ascii_case(code)
    }

    /// Number of downloads of the book at the time it was imported.
    #[must_use]
    pub const fn download_count(&self) -> u64 {
        self.download_count
    }
}

const RULE: &str = "-----------------------------------------";

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "                   Book                  ")?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author.name)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Downloads: {}", self.download_count)?;
        f.write_str(RULE)
    }
}

/// Renders an [`Author`] along with the titles of the books it wrote.
///
/// The titles are not part of [`Author`] so they are supplied by the caller, usually from
/// [`query::books_by_author`](crate::query::books_by_author).
pub struct AuthorCard<'a> {
    author: &'a Author,
    books: &'a [Book],
}

impl<'a> AuthorCard<'a> {
    /// Pairs an author with the books it wrote.
    #[must_use]
    pub const fn new(author: &'a Author, books: &'a [Book]) -> Self {
        Self { author, books }
    }
}

impl fmt::Display for AuthorCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles = self
            .books
            .iter()
            .map(Book::title)
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "{RULE}")?;
        writeln!(f, "                  Author                 ")?;
        writeln!(f, "Name: {}", self.author.name)?;
        writeln!(f, "Birth year: {}", self.author.birth_year)?;
        writeln!(f, "Death year: {}", self.author.death_year)?;
        writeln!(f, "Books: [{titles}]")?;
        f.write_str(RULE)
    }
}

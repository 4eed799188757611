//! Persistence of the catalog entities.
//!
//! The ingestion and query functions only talk to the [`Store`] trait. [`Catalog`] is the
//! default implementation: an insertion ordered, in-memory store which can be serialized as a
//! whole, see [`CatalogFile`](crate::file::CatalogFile) for reading and writing it to disk.

use std::collections::HashSet;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    model::{Author, AuthorId, Book, BookId},
    Error, ErrorKind,
};

/// Storage of authors and books with lookups by their natural keys.
///
/// Implementations assign the identity of an entity the first time it is saved and list
/// entities in the order they were first saved.
pub trait Store {
    /// Finds the book with exactly this title.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be read.
    fn find_book_by_title(&self, title: &str) -> Result<Option<Book>, Error>;

    /// Finds the author with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be read.
    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, Error>;

    /// Saves the author, assigning it an identity when it has none yet.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be written or the write would give two authors
    /// the same name.
    fn save_author(&mut self, author: Author) -> Result<Author, Error>;

    /// Saves the book, assigning it an identity when it has none yet.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be written, the write would give two books the
    /// same title or the author of the book has not been saved to this store.
    fn save_book(&mut self, book: Book) -> Result<Book, Error>;

    /// All books in the order they were first saved.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be read.
    fn books(&self) -> Result<Vec<Book>, Error>;

    /// All authors in the order they were first saved.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] when the store cannot be read.
    fn authors(&self) -> Result<Vec<Author>, Error>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct AuthorRow {
    id: AuthorId,
    name: String,
    birth_year: i32,
    death_year: i32,
}

impl AuthorRow {
    fn to_author(&self) -> Author {
        Author::new(self.name.clone(), self.birth_year, self.death_year).with_id(self.id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct BookRow {
    id: BookId,
    title: String,
    author_id: AuthorId,
    language: String,
    download_count: u64,
}

/// An in-memory [`Store`] that keeps track of whether it changed since it was created or
/// loaded.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    authors: Vec<AuthorRow>,
    #[serde(default)]
    books: Vec<BookRow>,
    #[serde(skip)]
    dirty: bool,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the catalog was changed since it was created or loaded.
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the catalog has neither authors nor books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.books.is_empty()
    }

    /// Checks the invariants of a catalog that was not built through [`Store`] calls, such as
    /// one deserialized from a file.
    ///
    /// # Errors
    ///
    /// An [`Err`] with the [`ErrorKind::Constraint`] kind is returned for duplicate ids,
    /// duplicate author names, duplicate book titles or books pointing at an unknown author.
    pub fn check_integrity(&self) -> Result<(), Error> {
        fn unique<'a, I, T>(values: I, what: &str) -> Result<(), Error>
        where
            I: IntoIterator<Item = &'a T>,
            T: std::fmt::Display + Eq + std::hash::Hash + ?Sized + 'a,
        {
            let mut seen = HashSet::new();
            for value in values {
                if !seen.insert(value) {
                    return Err(Error::new(
                        ErrorKind::Constraint,
                        format!("Duplicate {what} '{value}' in catalog"),
                    ));
                }
            }
            Ok(())
        }

        unique(self.authors.iter().map(|a| &a.id), "author id")?;
        unique(self.authors.iter().map(|a| a.name.as_str()), "author name")?;
        unique(self.books.iter().map(|b| &b.id), "book id")?;
        unique(self.books.iter().map(|b| b.title.as_str()), "book title")?;

        self.books
            .iter()
            .try_for_each(|row| self.author_row(row.author_id).map(|_| ()))
    }

    fn author_row(&self, id: AuthorId) -> Result<&AuthorRow, Error> {
        self.authors.iter().find(|a| a.id == id).ok_or_else(|| {
            Error::new(
                ErrorKind::Constraint,
                format!("No author with the id {id} in catalog"),
            )
        })
    }

    fn to_book(&self, row: &BookRow) -> Result<Book, Error> {
        let author = self.author_row(row.author_id)?.to_author();
        Ok(Book::new(
            row.title.clone(),
            author,
            row.language.clone(),
            row.download_count,
        )
        .with_id(row.id))
    }

    fn next_author_id(&self) -> AuthorId {
        let max = self.authors.iter().map(|a| a.id.get()).max();
        AuthorId::new(max.map_or(1, |id| id + 1))
    }

    fn next_book_id(&self) -> BookId {
        let max = self.books.iter().map(|b| b.id.get()).max();
        BookId::new(max.map_or(1, |id| id + 1))
    }
}

impl Store for Catalog {
    fn find_book_by_title(&self, title: &str) -> Result<Option<Book>, Error> {
        self.books
            .iter()
            .find(|b| b.title == title)
            .map(|row| self.to_book(row))
            .transpose()
    }

    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, Error> {
        Ok(self
            .authors
            .iter()
            .find(|a| a.name == name)
            .map(AuthorRow::to_author))
    }

    fn save_author(&mut self, author: Author) -> Result<Author, Error> {
        let id = author.id().unwrap_or_else(|| self.next_author_id());

        if self.authors.iter().any(|a| a.name == author.name() && a.id != id) {
            return Err(Error::new(
                ErrorKind::Constraint,
                format!("An author named '{}' already exists", author.name()),
            ));
        }

        let row = AuthorRow {
            id,
            name: author.name().to_owned(),
            birth_year: author.birth_year(),
            death_year: author.death_year(),
        };

        if let Some(existing) = self.authors.iter_mut().find(|a| a.id == id) {
            trace!("Updating author {id}");
            *existing = row;
        } else {
            trace!("Inserting author {id}");
            self.authors.push(row);
        }

        self.dirty = true;
        Ok(author.with_id(id))
    }

    fn save_book(&mut self, book: Book) -> Result<Book, Error> {
        let author_id = book.author().id().ok_or_else(|| {
            Error::new(
                ErrorKind::Constraint,
                format!("The author of '{}' has not been saved", book.title()),
            )
        })?;
        let author = self.author_row(author_id)?.to_author();

        let id = book.id().unwrap_or_else(|| self.next_book_id());

        if self.books.iter().any(|b| b.title == book.title() && b.id != id) {
            return Err(Error::new(
                ErrorKind::Constraint,
                format!("A book titled '{}' already exists", book.title()),
            ));
        }

        let row = BookRow {
            id,
            title: book.title().to_owned(),
            author_id,
            language: book.language().to_owned(),
            download_count: book.download_count(),
        };

        if let Some(existing) = self.books.iter_mut().find(|b| b.id == id) {
            trace!("Updating book {id}");
            *existing = row;
        } else {
            trace!("Inserting book {id}");
            self.books.push(row);
        }

        self.dirty = true;

        let mut book = book.with_id(id);
        book.set_author(author);
        Ok(book)
    }

    fn books(&self) -> Result<Vec<Book>, Error> {
        self.books.iter().map(|row| self.to_book(row)).collect()
    }

    fn authors(&self) -> Result<Vec<Author>, Error> {
        Ok(self.authors.iter().map(AuthorRow::to_author).collect())
    }
}

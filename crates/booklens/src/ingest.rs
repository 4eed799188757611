use log::{info, trace, warn};

use crate::{model::Book, normalize, raw::RawResult, Error, Store};

/// What happened to the store when importing search results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum ImportOutcome {
    /// The first result was saved as this book.
    Imported(Book),
    /// A book with the title of the first result is already in the store, nothing was written.
    AlreadyPresent,
    /// There was no usable first result, nothing was written.
    NoMatch,
}

/// Imports the first search result into the store.
///
/// Only the first result is ever considered: when it cannot be normalized, or its title is
/// already in the store, the remaining results are ignored.
///
/// The duplicate title check happens before anything is written. When an author with the same
/// name is already stored the book is linked to that author and the years from the search result
/// are discarded, otherwise the new author is saved first. At most one author and exactly one
/// book are written for an [`ImportOutcome::Imported`] outcome.
///
/// # Errors
///
/// An [`Err`] is only returned when the store fails to look up or save an entity.
pub fn import_first_match<S>(store: &mut S, results: Vec<RawResult>) -> Result<ImportOutcome, Error>
where
    S: Store + ?Sized,
{
    let Some(first) = results.into_iter().next() else {
        trace!("No search results to import");
        return Ok(ImportOutcome::NoMatch);
    };

    let mut book = match normalize(first) {
        Ok(book) => book,
        Err(err) => {
            warn!("First search result is unusable: {err}");
            return Ok(ImportOutcome::NoMatch);
        }
    };

    trace!("Checking the store for a book titled '{}'", book.title());
    if store.find_book_by_title(book.title())?.is_some() {
        info!("'{}' is already in the store", book.title());
        return Ok(ImportOutcome::AlreadyPresent);
    }

    let author = match store.find_author_by_name(book.author().name())? {
        Some(existing) => {
            info!(
                "Linking '{}' to the stored author '{}'",
                book.title(),
                existing.name()
            );
            existing
        }
        None => {
            trace!("Saving new author '{}'", book.author().name());
            store.save_author(book.author().clone())?
        }
    };
    book.set_author(author);

    let book = store.save_book(book)?;
    info!("Imported '{}'", book.title());

    Ok(ImportOutcome::Imported(book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw::RawAuthor, store::Catalog, Author, ErrorKind};

    fn result(
        title: &str,
        author: &str,
        years: (Option<i32>, Option<i32>),
        downloads: u64,
    ) -> RawResult {
        RawResult {
            title: Some(title.to_owned()),
            authors: vec![RawAuthor {
                name: Some(author.to_owned()),
                birth_year: years.0,
                death_year: years.1,
            }],
            languages: vec!["en".to_owned()],
            download_count: downloads,
        }
    }

    fn emma() -> RawResult {
        result("Emma", "Jane Austen", (Some(1775), Some(1817)), 1000)
    }

    fn counts(catalog: &Catalog) -> (usize, usize) {
        (
            catalog.authors().unwrap().len(),
            catalog.books().unwrap().len(),
        )
    }

    #[test]
    fn empty_results_are_no_match() {
        let mut catalog = Catalog::new();

        let outcome = import_first_match(&mut catalog, vec![]).unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
        assert_eq!((0, 0), counts(&catalog));
        assert!(!catalog.dirty());
    }

    #[test]
    fn first_import_saves_author_and_book() {
        let mut catalog = Catalog::new();

        let outcome = import_first_match(&mut catalog, vec![emma()]).unwrap();

        let book = match outcome {
            ImportOutcome::Imported(book) => book,
            other => panic!("Expected the book to be imported but got {other:?}"),
        };
        assert!(book.id().is_some());
        assert!(book.author().id().is_some());
        assert_eq!("Emma", book.title());
        assert_eq!((1, 1), counts(&catalog));
    }

    #[test]
    fn duplicate_title_is_already_present_without_writes() {
        let mut catalog = Catalog::new();
        import_first_match(&mut catalog, vec![emma()]).unwrap();

        let other_author = result("Emma", "Someone Else", (None, None), 3);
        let outcome = import_first_match(&mut catalog, vec![other_author]).unwrap();

        assert_eq!(ImportOutcome::AlreadyPresent, outcome);
        assert_eq!((1, 1), counts(&catalog));
        assert_eq!(None, catalog.find_author_by_name("Someone Else").unwrap());
    }

    #[test]
    fn same_author_name_is_merged_keeping_stored_years() {
        let mut catalog = Catalog::new();
        import_first_match(&mut catalog, vec![emma()]).unwrap();

        let persuasion = result("Persuasion", "Jane Austen", (Some(1700), Some(1900)), 500);
        let outcome = import_first_match(&mut catalog, vec![persuasion]).unwrap();

        let book = match outcome {
            ImportOutcome::Imported(book) => book,
            other => panic!("Expected the book to be imported but got {other:?}"),
        };
        assert_eq!((1, 2), counts(&catalog));

        let authors = catalog.authors().unwrap();
        assert_eq!(1775, authors[0].birth_year());
        assert_eq!(1817, authors[0].death_year());
        assert_eq!(authors[0].id(), book.author().id());

        let emma = catalog.find_book_by_title("Emma").unwrap().unwrap();
        assert_eq!(emma.author().id(), book.author().id());
    }

    #[test]
    fn unusable_first_result_does_not_fall_back() {
        let mut catalog = Catalog::new();
        let mut unusable = emma();
        unusable.authors.clear();

        let outcome = import_first_match(
            &mut catalog,
            vec![unusable, result("Persuasion", "Jane Austen", (None, None), 1)],
        )
        .unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
        assert_eq!((0, 0), counts(&catalog));
    }

    #[test]
    fn duplicate_first_result_does_not_fall_back() {
        let mut catalog = Catalog::new();
        import_first_match(&mut catalog, vec![emma()]).unwrap();

        let outcome = import_first_match(
            &mut catalog,
            vec![emma(), result("Persuasion", "Jane Austen", (None, None), 1)],
        )
        .unwrap();

        assert_eq!(ImportOutcome::AlreadyPresent, outcome);
        assert_eq!(None, catalog.find_book_by_title("Persuasion").unwrap());
    }

    #[derive(Default)]
    struct FailingStore;

    impl Store for FailingStore {
        fn find_book_by_title(&self, _: &str) -> Result<Option<Book>, Error> {
            Ok(None)
        }

        fn find_author_by_name(&self, _: &str) -> Result<Option<Author>, Error> {
            Ok(None)
        }

        fn save_author(&mut self, _: Author) -> Result<Author, Error> {
            Err(Error::new(ErrorKind::IO, "Disk full"))
        }

        fn save_book(&mut self, _: Book) -> Result<Book, Error> {
            unreachable!("The author is saved first")
        }

        fn books(&self) -> Result<Vec<Book>, Error> {
            Ok(vec![])
        }

        fn authors(&self) -> Result<Vec<Author>, Error> {
            Ok(vec![])
        }
    }

    #[test]
    fn store_failure_is_returned_to_the_caller() {
        let err = import_first_match(&mut FailingStore, vec![emma()]).unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
    }
}

use booklens::{model::AuthorCard, query, Author, Book, Catalog, ImportOutcome, Store};

use eyre::{Context, Result};
use log::trace;

const EMPTY_CATALOG: &str = "Your database is empty";

pub fn search(catalog: &mut Catalog, title: &str) -> Result<String> {
    let outcome = booklens::import_by_title(catalog, title)
        .wrap_err_with(|| format!("Search for '{title}' was aborted"))?;

    Ok(match outcome {
        ImportOutcome::Imported(book) => format!("{book}\nBook details processed and saved."),
        ImportOutcome::AlreadyPresent => "Book is already present in the database.".to_owned(),
        ImportOutcome::NoMatch => "No books found.".to_owned(),
    })
}

pub fn list_books(catalog: &Catalog) -> Result<String> {
    let books = query::list_books(catalog)?;
    Ok(render_books(&books).unwrap_or_else(|| EMPTY_CATALOG.to_owned()))
}

pub fn list_authors(catalog: &Catalog) -> Result<String> {
    let authors = query::list_authors(catalog)?;
    Ok(render_authors(catalog, &authors)?.unwrap_or_else(|| EMPTY_CATALOG.to_owned()))
}

pub fn alive_authors(catalog: &Catalog, year: i32) -> Result<String> {
    trace!("Listing authors alive in {year}");
    let authors = query::alive_in_year(catalog, year)?;
    Ok(render_authors(catalog, &authors)?
        .unwrap_or_else(|| format!("No living authors found for the year {year}")))
}

pub fn books_in_language(catalog: &Catalog, code: &str) -> Result<String> {
    trace!("Listing books in the language '{code}'");
    let books = query::by_language(catalog, code)?;
    Ok(render_books(&books).unwrap_or_else(|| format!("No books found in this language: {code}")))
}

pub fn most_popular(catalog: &Catalog) -> Result<String> {
    let books = query::most_popular(catalog)?;
    Ok(render_books(&books).unwrap_or_else(|| EMPTY_CATALOG.to_owned()))
}

/// `None` when there are no books to render.
fn render_books(books: &[Book]) -> Option<String> {
    if books.is_empty() {
        None
    } else {
        Some(
            books
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// `None` when there are no authors to render.
fn render_authors<S: Store>(store: &S, authors: &[Author]) -> Result<Option<String>> {
    if authors.is_empty() {
        return Ok(None);
    }

    let cards = authors
        .iter()
        .map(|author| {
            query::books_by_author(store, author)
                .map(|books| AuthorCard::new(author, &books).to_string())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(cards.join("\n")))
}

use crate::{app, interact};

use booklens::{file::CatalogFile, Catalog};

use clap::Subcommand;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search the Gutendex catalog by title and import the first book found
    ///
    /// Only the first book of the results is ever imported. Nothing is imported when a book with
    /// the same title is already in the catalog, and the author of the book is shared with any
    /// book already in the catalog by an author of the same name.
    #[clap(arg_required_else_help = true)]
    Search {
        /// The title to search for, multiple words do not need to be quoted
        #[clap(required = true)]
        title: Vec<String>,
    },

    /// List the books in the catalog
    Books,

    /// List the authors in the catalog along with their books
    Authors,

    /// List the authors that were alive in a year
    #[clap(arg_required_else_help = true)]
    Alive {
        /// The year, both the birth and death year of an author count as alive
        #[clap(allow_hyphen_values = true)]
        year: i32,
    },

    /// List the books written in a language
    #[clap(arg_required_else_help = true)]
    Language {
        /// The language code, such as en, pt, fr or es (case is ignored)
        code: String,
    },

    /// List all books, the most downloaded first
    Popular,

    /// Open the interactive menu
    Menu,
}

impl Commands {
    pub fn execute(
        self,
        catalog: &mut Catalog,
        file: &mut CatalogFile,
        quiet: bool,
    ) -> eyre::Result<String> {
        match self {
            Commands::Search { title } => {
                let title = title.join(" ");
                trace!("search subcommand called with the value of '{title}'");
                app::search(catalog, &title)
            }
            Commands::Books => app::list_books(catalog),
            Commands::Authors => app::list_authors(catalog),
            Commands::Alive { year } => app::alive_authors(catalog, year),
            Commands::Language { code } => app::books_in_language(catalog, &code),
            Commands::Popular => app::most_popular(catalog),
            Commands::Menu => interact::menu(catalog, file, quiet),
        }
    }
}

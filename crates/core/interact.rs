use std::fmt;

use booklens::{file::CatalogFile, Catalog};
use dialoguer::Input;
use eyre::{eyre, Context, Result};
use log::{error, trace};

use crate::app;

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<Option<usize>> {
    dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))
}

pub fn user_input(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

pub fn user_year() -> Result<i32> {
    Input::new()
        .with_prompt("Type the year")
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuOption {
    Search,
    Books,
    Authors,
    Alive,
    Language,
    Popular,
    Quit,
}

impl MenuOption {
    const ALL: [Self; 7] = [
        Self::Search,
        Self::Books,
        Self::Authors,
        Self::Alive,
        Self::Language,
        Self::Popular,
        Self::Quit,
    ];
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "Search book by title",
            Self::Books => "List registered books",
            Self::Authors => "List registered authors",
            Self::Alive => "List alive authors of certain year",
            Self::Language => "List books with a certain language",
            Self::Popular => "List most popular books",
            Self::Quit => "Close application",
        })
    }
}

/// Languages offered by the menu, other codes can be used with the `language` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Language {
    English,
    Portuguese,
    French,
    Spanish,
}

impl Language {
    const ALL: [Self; 4] = [Self::English, Self::Portuguese, Self::French, Self::Spanish];

    const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
            Self::French => "fr",
            Self::Spanish => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::English => "English",
            Self::Portuguese => "Portuguese",
            Self::French => "French",
            Self::Spanish => "Spanish",
        };
        let mut code = self.code().chars();
        let first = code.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
        write!(f, "{first}{} ({name})", code.as_str())
    }
}

/// Runs the menu until the user closes it.
///
/// The catalog is written to the file after every import so closing the terminal does not lose
/// imported books. With `quiet` the results of the options are not printed.
pub fn menu(catalog: &mut Catalog, file: &mut CatalogFile, quiet: bool) -> Result<String> {
    loop {
        let Some(selection) = user_select("Choose your option", &MenuOption::ALL)? else {
            break;
        };

        let option = MenuOption::ALL[selection];
        trace!("Menu option '{option}' selected");

        let res = match option {
            MenuOption::Search => search(catalog, file),
            MenuOption::Books => app::list_books(catalog),
            MenuOption::Authors => app::list_authors(catalog),
            MenuOption::Alive => user_year().and_then(|year| app::alive_authors(catalog, year)),
            MenuOption::Language => {
                let choice = user_select("Choose the language", &Language::ALL);
                match books_in_chosen_language(catalog, choice) {
                    Some(res) => res,
                    None => continue,
                }
            }
            MenuOption::Popular => app::most_popular(catalog),
            MenuOption::Quit => break,
        };

        if let Some(message) = option_output(res, quiet) {
            println!("{message}");
        }
    }

    Ok("Closing application...".to_owned())
}

/// The message to print for the result of an option, errors are logged and end the current
/// option, never the menu.
fn option_output(res: Result<String>, quiet: bool) -> Option<String> {
    match res {
        Ok(message) if !quiet => Some(message),
        Ok(_) => None,
        Err(err) => {
            error!("An error occurred: {err:#}");
            None
        }
    }
}

/// Lists the books in the language picked from the language menu, `None` when the pick was
/// cancelled.
fn books_in_chosen_language(
    catalog: &Catalog,
    choice: Result<Option<usize>>,
) -> Option<Result<String>> {
    match choice {
        Ok(Some(i)) => Some(app::books_in_language(catalog, Language::ALL[i].code())),
        Ok(None) => None,
        Err(err) => Some(Err(err)),
    }
}

fn search(catalog: &mut Catalog, file: &mut CatalogFile) -> Result<String> {
    let title = user_input("Type the book name")?;
    let message = app::search(catalog, &title)?;

    if catalog.dirty() {
        trace!("Updating the catalog file..");
        file.write_catalog(catalog)?;
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::{books_in_chosen_language, option_output, Language, MenuOption};

    use booklens::{Author, Book, Catalog, Store};
    use eyre::eyre;

    #[test]
    fn language_menu_items() {
        let items = Language::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(
            vec![
                "En (English)",
                "Pt (Portuguese)",
                "Fr (French)",
                "Es (Spanish)"
            ],
            items
        );
    }

    #[test]
    fn quit_is_the_last_menu_option() {
        assert_eq!(Some(&MenuOption::Quit), MenuOption::ALL.last());
    }

    #[test]
    fn failed_language_pick_is_an_option_error() {
        let catalog = Catalog::new();

        let res = books_in_chosen_language(&catalog, Err(eyre!("not a terminal")));

        assert!(matches!(res, Some(Err(_))));
    }

    #[test]
    fn cancelled_language_pick_returns_to_the_menu() {
        let catalog = Catalog::new();

        assert!(books_in_chosen_language(&catalog, Ok(None)).is_none());
    }

    #[test]
    fn picked_language_lists_its_books() {
        let mut catalog = Catalog::new();
        let author = catalog
            .save_author(Author::new("Assis, Machado de", 1839, 1908))
            .unwrap();
        catalog
            .save_book(Book::new("Dom Casmurro", author, "pt", 10))
            .unwrap();

        let message = books_in_chosen_language(&catalog, Ok(Some(1)))
            .unwrap()
            .unwrap();

        assert!(message.contains("Title: Dom Casmurro"), "{message}");
    }

    #[test]
    fn quiet_menu_prints_nothing() {
        assert_eq!(None, option_output(Ok("No books found.".to_owned()), true));
        assert_eq!(
            Some("No books found.".to_owned()),
            option_output(Ok("No books found.".to_owned()), false)
        );
    }

    #[test]
    fn option_error_prints_nothing_and_keeps_the_menu() {
        assert_eq!(None, option_output(Err(eyre!("Disk full")), false));
    }
}

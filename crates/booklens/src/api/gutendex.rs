use log::{info, trace, warn};

use crate::{
    ingest::{import_first_match, ImportOutcome},
    raw::{self, RawResult},
    Error, Store,
};

use super::Client;

const GUTENDEX_URL: &str = "https://gutendex.com/books/?search=";

/// Builds the search URL for a title, the whole title is percent-encoded into the query.
fn search_url(title: &str) -> String {
    format!("{GUTENDEX_URL}{}", urlencoding::encode(title.trim()))
}

pub(crate) fn search_by_title<C: Client>(title: &str) -> Result<Vec<RawResult>, Error> {
    info!("Searching for the title '{title}' using the Gutendex API");
    let url = search_url(title);

    let client = C::default();
    let payload = client.get_text(&url)?;

    trace!("Request was successful");

    raw::parse(&payload)
}

pub(crate) fn import_by_title<C, S>(store: &mut S, title: &str) -> Result<ImportOutcome, Error>
where
    C: Client,
    S: Store + ?Sized,
{
    if title.trim().is_empty() {
        info!("Empty title - nothing to search for");
        return Ok(ImportOutcome::NoMatch);
    }

    let results = match search_by_title::<C>(title) {
        Ok(results) => results,
        Err(err) if err.is_unusable_data() => {
            warn!("Ignoring the search response: {err}");
            return Ok(ImportOutcome::NoMatch);
        }
        Err(err) => return Err(err),
    };

    import_first_match(store, results)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        store::Catalog,
        ErrorKind, ImportOutcome, Store,
    };

    const EMMA_JSON: &str = include_str!("../../tests/data/gutendex_emma.json");

    impl_text_producer! {
        EmmaProducer => Ok(EMMA_JSON.to_owned()),
        NoResultsProducer => Ok(
            r#"{
                "count": 0,
                "next": null,
                "previous": null,
                "results": []
            }"#.to_owned()
        ),
        GarbageProducer => Ok("<html>Bad Gateway</html>".to_owned()),
    }

    type EmmaClient = MockClient<EmmaProducer>;

    #[test]
    fn spaces_in_title_are_escaped_in_url() {
        assert!(super::search_by_title::<EmmaClient>("Pride and Prejudice").is_ok());
        assert_url!("https://gutendex.com/books/?search=Pride%20and%20Prejudice");
    }

    #[test]
    fn reserved_characters_in_title_stay_in_the_search_parameter() {
        assert!(super::search_by_title::<EmmaClient>("Romeo & Juliet #1+2").is_ok());
        assert_url!("https://gutendex.com/books/?search=Romeo%20%26%20Juliet%20%231%2B2");
    }

    #[test]
    fn search_returns_all_results_of_the_page() {
        let results = super::search_by_title::<EmmaClient>("emma").unwrap();
        assert_eq!(3, results.len());
    }

    #[test]
    fn network_error_is_returned_as_transport_error() {
        let mut catalog = Catalog::new();

        let err = super::import_by_title::<MockClient<NetworkErrorProducer>, _>(&mut catalog, "emma")
            .unwrap_err();

        assert_eq!(ErrorKind::Transport, err.kind());
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_payload_is_no_match() {
        let mut catalog = Catalog::new();

        let outcome =
            super::import_by_title::<MockClient<GarbageProducer>, _>(&mut catalog, "emma").unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
    }

    #[test]
    fn empty_response_is_no_match() {
        let mut catalog = Catalog::new();

        let outcome = super::import_by_title::<MockClient, _>(&mut catalog, "emma").unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
    }

    #[test]
    fn no_results_is_no_match() {
        let mut catalog = Catalog::new();

        let outcome =
            super::import_by_title::<MockClient<NoResultsProducer>, _>(&mut catalog, "zzzz")
                .unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
        assert!(!catalog.dirty());
    }

    #[test]
    fn blank_title_is_no_match_without_a_request() {
        let mut catalog = Catalog::new();
        crate::api::URL_SINK.with(|sink| *sink.borrow_mut() = None);

        let outcome = super::import_by_title::<EmmaClient, _>(&mut catalog, "   ").unwrap();

        assert_eq!(ImportOutcome::NoMatch, outcome);
        assert_url!("", "No request should be made for a blank title");
    }

    #[test]
    fn only_first_result_is_imported() {
        let mut catalog = Catalog::new();

        let outcome = super::import_by_title::<EmmaClient, _>(&mut catalog, "emma").unwrap();

        assert!(matches!(outcome, ImportOutcome::Imported(ref book) if book.title() == "Emma"));
        assert_eq!(1, catalog.books().unwrap().len());
        assert_eq!(None, catalog.find_book_by_title("Emma: Roman").unwrap());
    }

    #[test]
    fn searching_twice_is_already_present() {
        let mut catalog = Catalog::new();
        let _ = super::import_by_title::<EmmaClient, _>(&mut catalog, "emma").unwrap();

        let outcome = super::import_by_title::<EmmaClient, _>(&mut catalog, "emma").unwrap();

        assert_eq!(ImportOutcome::AlreadyPresent, outcome);
        assert_eq!(1, catalog.authors().unwrap().len());
        assert_eq!(1, catalog.books().unwrap().len());
    }
}

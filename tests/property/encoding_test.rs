//! Property-based tests for query encoding and navigation.

use proptest::prelude::*;
use url::Url;

use searchview::services::navigation::{encode_component, search_location, NavigationState};
use searchview::types::view::ResolvedView;

const UNRESERVED: &str = "-_.!~*'()";

// **Property 2: Encoded components only use safe characters**
proptest! {
    #[test]
    fn prop_encoded_component_is_url_safe(input in any::<String>()) {
        let encoded = encode_component(&input);
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '%' || UNRESERVED.contains(c)));

        let decoded = percent_encoding::percent_decode_str(&encoded).decode_utf8().unwrap();
        prop_assert_eq!(decoded.as_ref(), input.as_str());
    }
}

// **Property 3: Search location round-trips the trimmed query**
proptest! {
    #[test]
    fn prop_search_location_resolves_to_query(input in "\\PC{0,40}") {
        let location = search_location(&input);
        let trimmed = input.trim();
        let resolved = NavigationState::parse(&location).unwrap().resolve();

        if trimmed.is_empty() {
            prop_assert_eq!(location, "/");
            prop_assert_eq!(resolved, ResolvedView::Search {
                raw: String::new(),
                encoded: String::new(),
            });
        } else {
            prop_assert!(Url::parse("http://localhost/").unwrap().join(&location).is_ok());
            prop_assert_eq!(resolved, ResolvedView::Search {
                raw: trimmed.to_string(),
                encoded: encode_component(trimmed),
            });
        }
    }
}

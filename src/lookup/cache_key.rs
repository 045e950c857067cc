//! Cache key derivation for the persistent cache bins.
//!
//! Keys are read by anything else sharing the bins, so the format is fixed:
//!
//! - search results: `{provider}:{base64url(sha256(term))}[:{country}]`
//! - address details: `{provider}:{address_id}`
//!
//! The base64 alphabet is URL-safe without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};

/// Derives the `addresses` bin key for a search term.
pub fn search_cache_key(provider_id: &str, search_term: &str, country: Option<&str>) -> String {
    let digest = Sha256::digest(search_term.as_bytes());
    let mut key = format!("{provider_id}:{}", URL_SAFE_NO_PAD.encode(digest));

    if let Some(country) = country.filter(|code| !code.is_empty()) {
        key.push(':');
        key.push_str(country);
    }

    key
}

/// Derives the `address-details` bin key for an address identifier.
pub fn details_cache_key(provider_id: &str, address_id: &str) -> String {
    format!("{provider_id}:{address_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_search_key_known_digest() {
        // sha256("abc") = ba7816bf...15ad
        assert_eq!(
            search_cache_key("example", "abc", None),
            "example:ungWv48Bz-pBQUDeXa4iI7ADYaOWF3qctBD_YfIAFa0"
        );
    }

    #[test]
    fn test_search_key_appends_country() {
        let key = search_cache_key("example", "abc", Some("FR"));
        assert!(key.ends_with(":FR"));
        assert_eq!(key, format!("{}:FR", search_cache_key("example", "abc", None)));
    }

    #[test]
    fn test_search_key_ignores_empty_country() {
        assert_eq!(
            search_cache_key("example", "TS1 1ST", Some("")),
            search_cache_key("example", "TS1 1ST", None)
        );
    }

    #[test]
    fn test_details_key() {
        assert_eq!(details_cache_key("example", "1234"), "example:1234");
    }

    proptest! {
        #[test]
        fn prop_search_key_is_stable(
            provider in "[a-z_]{1,16}",
            term in "\\PC{1,64}",
            country in proptest::option::of("[A-Z]{2}"),
        ) {
            let first = search_cache_key(&provider, &term, country.as_deref());
            let second = search_cache_key(&provider, &term, country.as_deref());
            prop_assert_eq!(&first, &second);

            let prefix = format!("{}:", provider);
            prop_assert!(first.starts_with(&prefix));
            // 32 digest bytes encode to 43 unpadded characters
            let hash = first[prefix.len()..].split(':').next().unwrap_or_default();
            prop_assert_eq!(hash.len(), 43);
            prop_assert!(hash.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }

        #[test]
        fn prop_distinct_terms_get_distinct_keys(a in "[A-Z0-9 ]{1,10}", b in "[A-Z0-9 ]{1,10}") {
            prop_assume!(a != b);
            prop_assert_ne!(
                search_cache_key("example", &a, None),
                search_cache_key("example", &b, None)
            );
        }
    }
}
